//! Session token and role ownership: persistence backends plus the in-memory store
//! every other component reads from. Keep the public surface thin.

mod backend;
mod store;

pub use backend::{CredentialBackend, FileCredentials, MemoryCredentials, StoredCredentials};
pub use store::{CredentialStore, Session};
