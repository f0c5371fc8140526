// In-process mock of the society backend: an axum router on an ephemeral localhost port
// that records every request and answers from a per-path table.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use parking_lot::Mutex;
use tempfile::TempDir;
use tokio::task::JoinHandle;

use society_client::config::ClientSettings;
use society_client::{ClientConfig, CredentialStore, FileCredentials, SocietyClient};

#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub body: String,
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<String, (u16, String)>>,
    seen: Mutex<Vec<Seen>>,
}

pub struct MockBackend {
    pub base_url: String,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

async fn answer(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let path = uri.path().trim_start_matches('/').to_string();
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(String::from);
    state.seen.lock().push(Seen {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(String::from),
        authorization: header("authorization"),
        accept: header("accept"),
        body,
    });
    match state.routes.lock().get(&path) {
        Some((status, body)) => (StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR), body.clone()),
        None => (StatusCode::NOT_FOUND, r#"{"message":"not found"}"#.to_string()),
    }
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(answer).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind 127.0.0.1:0");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("mock backend error: {e:?}");
            }
        });
        MockBackend { base_url: format!("http://{}/", addr), state, handle }
    }

    pub fn route(&self, path: &str, status: u16, body: &str) {
        self.state.routes.lock().insert(path.to_string(), (status, body.to_string()));
    }

    pub fn route_json(&self, path: &str, body: serde_json::Value) {
        self.route(path, 200, &body.to_string());
    }

    pub fn seen(&self) -> Vec<Seen> { self.state.seen.lock().clone() }

    pub fn last(&self, path: &str) -> Option<Seen> {
        self.state.seen.lock().iter().rev().find(|s| s.path == path).cloned()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) { self.handle.abort(); }
}

pub fn client_for(base_url: &str, dir: &TempDir) -> (SocietyClient, Arc<CredentialStore>) {
    let config = ClientConfig::for_base_url(base_url, dir.path().join("credentials.json")).expect("config");
    let store = CredentialStore::shared(FileCredentials::new(config.credentials_path.clone())).expect("store");
    let client = SocietyClient::new(&config, store.clone()).expect("client");
    (client, store)
}

pub fn client_with_settings(settings: ClientSettings, dir: &TempDir) -> (SocietyClient, Arc<CredentialStore>) {
    let config = ClientSettings { credentials_path: Some(dir.path().join("credentials.json")), ..settings }
        .into_config()
        .expect("config");
    let store = CredentialStore::shared(FileCredentials::new(config.credentials_path.clone())).expect("store");
    let client = SocietyClient::new(&config, store.clone()).expect("client");
    (client, store)
}

/// A server that accepts connections and never answers. Abort the handle to stop it.
pub async fn silent_server() -> (String, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind 127.0.0.1:0");
    let addr = listener.local_addr().expect("local addr");
    let handle = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    (format!("http://{}/", addr), handle)
}

/// Base URL of a port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}
