//! Unified client error model.
//! Every facade operation surfaces one of these variants; callers decide on retries,
//! re-authentication and user-facing wording.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// No response reached us (connect refused, DNS, reset, timeout).
    #[error("network failure: {message}")]
    Network { message: String, timed_out: bool },
    /// A response arrived with a non-2xx status.
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    /// A response arrived but its body was not the expected wire format.
    #[error("decode failure: {message}")]
    Decode { message: String },
    /// The caller passed a parameter the client refuses to send.
    #[error("validation failure: {message}")]
    Validation { message: String },
    /// The credential backend could not read or write the session.
    #[error("credential storage failure: {message}")]
    Storage { message: String },
}

impl ClientError {
    pub fn network<S: Into<String>>(msg: S, timed_out: bool) -> Self { ClientError::Network { message: msg.into(), timed_out } }
    pub fn http<S: Into<String>>(status: u16, body: S) -> Self { ClientError::Http { status, body: body.into() } }
    pub fn decode<S: Into<String>>(msg: S) -> Self { ClientError::Decode { message: msg.into() } }
    pub fn validation<S: Into<String>>(msg: S) -> Self { ClientError::Validation { message: msg.into() } }
    pub fn storage<S: Into<String>>(msg: S) -> Self { ClientError::Storage { message: msg.into() } }

    pub fn code_str(&self) -> &'static str {
        match self {
            ClientError::Network { timed_out: true, .. } => "timeout",
            ClientError::Network { .. } => "network_failure",
            ClientError::Http { .. } => "http_failure",
            ClientError::Decode { .. } => "decode_failure",
            ClientError::Validation { .. } => "validation_failure",
            ClientError::Storage { .. } => "storage_failure",
        }
    }

    /// HTTP status when the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Only transport-level failures are worth retrying; the client itself never retries.
    pub fn is_retryable(&self) -> bool { matches!(self, ClientError::Network { .. }) }

    /// True for 401: the collaborator should send the user back to login.
    pub fn requires_reauth(&self) -> bool { self.status() == Some(401) }
}

pub type ClientResult<T> = Result<T, ClientError>;
