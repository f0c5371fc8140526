use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, Url};
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::error::{ClientError, ClientResult};

/// Decoded 2xx response. An empty body decodes to `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

/// HTTP transport that stamps standard headers and the current bearer token on every call.
/// Knows nothing about response shapes.
#[derive(Clone)]
pub struct HttpTransport {
    base: Url,
    client: reqwest::Client,
    credentials: Arc<CredentialStore>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig, credentials: Arc<CredentialStore>) -> ClientResult<Self> {
        // reqwest has no separate write timeout; the overall bound covers request upload plus
        // response read, while read_timeout bounds each stalled read on its own.
        let overall = config
            .write_timeout
            .checked_add(config.read_timeout)
            .ok_or_else(|| ClientError::validation("write + read timeout overflows"))?;
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .timeout(overall)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::validation(format!("cannot build http client: {}", e)))?;
        Ok(Self { base: config.base_url.clone(), client, credentials })
    }

    pub fn base(&self) -> &Url { &self.base }

    pub fn credentials(&self) -> &Arc<CredentialStore> { &self.credentials }

    fn url_for(&self, path: &str) -> ClientResult<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::validation(format!("invalid endpoint path '{}': {}", path, e)))
    }

    /// Headers for one request. The token is read now, not at construction.
    fn headers(&self) -> ClientResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(value) = self.credentials.token().as_deref().and_then(bearer_value) {
            let hv = HeaderValue::from_str(&value)
                .map_err(|_| ClientError::validation("stored token is not a valid header value"))?;
            headers.insert(AUTHORIZATION, hv);
        }
        Ok(headers)
    }

    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> ClientResult<RawResponse> {
        let url = self.url_for(path)?;
        let mut req = self.client.request(method.clone(), url).headers(self.headers()?);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(b) = body {
            req = req.json(b);
        }
        let resp = match req.send().await {
            Ok(r) => r,
            Err(e) => {
                debug!(target: "society::transport", method = %method, path, timed_out = e.is_timeout(), "request failed before a response");
                return Err(ClientError::network(e.to_string(), e.is_timeout()));
            }
        };
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ClientError::network(format!("reading body: {}", e), e.is_timeout()))?;
        debug!(target: "society::transport", method = %method, path, status = status.as_u16(), bytes = bytes.len(), "response");
        if !status.is_success() {
            return Err(ClientError::http(status.as_u16(), String::from_utf8_lossy(&bytes).into_owned()));
        }
        Ok(RawResponse { status: status.as_u16(), body: decode_body(&bytes)? })
    }
}

/// `Authorization` value for a stored token: `None` when blank, and never `Bearer Bearer …`.
pub fn bearer_value(token: &str) -> Option<String> {
    let mut rest = token.trim();
    loop {
        let stripped = strip_bearer_prefix(rest);
        if stripped.len() == rest.len() {
            break;
        }
        rest = stripped.trim_start();
    }
    if rest.is_empty() { None } else { Some(format!("Bearer {}", rest)) }
}

/// Strips one leading `bearer` scheme word (any case) when followed by whitespace or nothing.
fn strip_bearer_prefix(s: &str) -> &str {
    const SCHEME: &str = "bearer";
    match (s.get(..SCHEME.len()), s.get(SCHEME.len()..)) {
        (Some(head), Some(tail))
            if head.eq_ignore_ascii_case(SCHEME) && (tail.is_empty() || tail.starts_with(char::is_whitespace)) =>
        {
            tail
        }
        _ => s,
    }
}

fn decode_body(bytes: &[u8]) -> ClientResult<Value> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| {
        let preview: String = String::from_utf8_lossy(bytes).chars().take(120).collect();
        ClientError::decode(format!("{} (body starts: {:?})", e, preview))
    })
}
