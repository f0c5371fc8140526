//! Wire side of the client: the authenticated transport and the fixed endpoint catalog.
//! Everything here speaks `serde_json::Value`; nothing past the normalizer does.

mod transport;
pub mod endpoints;

pub use endpoints::{Endpoint, EndpointClient};
pub use transport::{bearer_value, HttpTransport, RawResponse};
