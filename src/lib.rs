//! Client for the cooperative-society backend: authenticated HTTP transport, a persisted
//! credential store, and a normalizer that turns the backend's shifting JSON shapes into one
//! canonical model. [`SocietyClient`] is the entry point.

pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod facade;
pub mod model;
pub mod normalize;
pub mod remote;

pub use config::ClientConfig;
pub use credentials::{CredentialStore, FileCredentials, MemoryCredentials, Session};
pub use error::{ClientError, ClientResult};
pub use facade::SocietyClient;
