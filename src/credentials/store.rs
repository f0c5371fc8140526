use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{debug, info};

use super::backend::{CredentialBackend, StoredCredentials};
use crate::error::{ClientError, ClientResult};

/// Snapshot of the authenticated state. Token and role are either both present or both absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool { self.token.is_some() }

    fn from_stored(stored: Option<&StoredCredentials>) -> Self {
        match stored {
            Some(c) => Session { token: Some(c.token.clone()), role: Some(c.role.clone()) },
            None => Session::default(),
        }
    }
}

/// Single owner of the session. Writes persist through the backend before the in-memory
/// snapshot changes, so a reader that runs after `set` returns always sees the new token.
pub struct CredentialStore {
    backend: Box<dyn CredentialBackend>,
    current: RwLock<Option<StoredCredentials>>,
    changes: watch::Sender<Session>,
}

impl CredentialStore {
    /// Load whatever the backend holds and start from it.
    pub fn open<B: CredentialBackend + 'static>(backend: B) -> ClientResult<Self> {
        let loaded = backend.load()?;
        debug!(target: "society::credentials", "credential store opened; authenticated={}", loaded.is_some());
        let (changes, _) = watch::channel(Session::from_stored(loaded.as_ref()));
        Ok(Self { backend: Box::new(backend), current: RwLock::new(loaded), changes })
    }

    pub fn shared<B: CredentialBackend + 'static>(backend: B) -> ClientResult<Arc<Self>> {
        Self::open(backend).map(Arc::new)
    }

    pub fn get(&self) -> Session { Session::from_stored(self.current.read().as_ref()) }

    /// Current bearer token, if any. Read at send-time by the transport.
    pub fn token(&self) -> Option<String> { self.current.read().as_ref().map(|c| c.token.clone()) }

    pub fn set(&self, token: &str, role: &str) -> ClientResult<()> {
        let token = token.trim();
        let role = role.trim();
        if token.is_empty() {
            return Err(ClientError::validation("token must not be blank"));
        }
        if role.is_empty() {
            return Err(ClientError::validation("role must not be blank"));
        }
        let next = StoredCredentials { token: token.to_string(), role: role.to_string() };
        {
            let mut guard = self.current.write();
            self.backend.store(&next)?;
            *guard = Some(next);
            // under the write lock: stream order is write order
            self.changes.send_replace(Session::from_stored(guard.as_ref()));
        }
        info!(target: "society::credentials", "session stored for role '{}'", role);
        Ok(())
    }

    pub fn clear(&self) -> ClientResult<()> {
        {
            let mut guard = self.current.write();
            self.backend.erase()?;
            *guard = None;
            self.changes.send_replace(Session::default());
        }
        info!(target: "society::credentials", "session cleared");
        Ok(())
    }

    /// Receiver that always holds the latest session; `changed()` fires on every set/clear.
    pub fn subscribe(&self) -> watch::Receiver<Session> { self.changes.subscribe() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{FileCredentials, MemoryCredentials};

    #[test]
    fn starts_empty_then_set_and_clear() {
        let store = CredentialStore::open(MemoryCredentials::new()).unwrap();
        assert_eq!(store.get(), Session::default());
        store.set("t1", "member").unwrap();
        assert_eq!(store.get(), Session { token: Some("t1".into()), role: Some("member".into()) });
        assert_eq!(store.token().as_deref(), Some("t1"));
        store.clear().unwrap();
        assert_eq!(store.get(), Session::default());
        assert!(!store.get().is_authenticated());
    }

    #[test]
    fn blank_values_rejected_without_side_effects() {
        let store = CredentialStore::open(MemoryCredentials::new()).unwrap();
        store.set("t1", "admin").unwrap();
        assert!(store.set("   ", "admin").is_err());
        assert!(store.set("t2", "").is_err());
        assert_eq!(store.token().as_deref(), Some("t1"));
    }

    #[test]
    fn reopen_sees_persisted_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        {
            let store = CredentialStore::open(FileCredentials::new(&path)).unwrap();
            store.set("persisted", "admin").unwrap();
        }
        let again = CredentialStore::open(FileCredentials::new(&path)).unwrap();
        assert_eq!(again.get().role.as_deref(), Some("admin"));
        again.clear().unwrap();
        let third = CredentialStore::open(FileCredentials::new(&path)).unwrap();
        assert_eq!(third.get(), Session::default());
    }

    #[test]
    fn failed_write_propagates_and_keeps_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let store = CredentialStore::open(FileCredentials::new(blocker.join("auth.json"))).unwrap();
        let err = store.set("t", "member").unwrap_err();
        assert_eq!(err.code_str(), "storage_failure");
        assert_eq!(store.get(), Session::default());
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let store = CredentialStore::open(MemoryCredentials::new()).unwrap();
        let mut rx = store.subscribe();
        assert!(!rx.borrow().is_authenticated());
        store.set("t9", "member").unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().token.as_deref(), Some("t9"));
        store.clear().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Session::default());
    }

    #[test]
    fn concurrent_readers_never_see_half_a_session() {
        let store = Arc::new(CredentialStore::open(MemoryCredentials::new()).unwrap());
        let writer = {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..200 {
                    store.set(&format!("tok{}", i), &format!("role{}", i)).unwrap();
                    store.clear().unwrap();
                }
            })
        };
        for _ in 0..2000 {
            let s = store.get();
            assert_eq!(s.token.is_some(), s.role.is_some());
            if let (Some(t), Some(r)) = (s.token, s.role) {
                assert_eq!(t.trim_start_matches("tok"), r.trim_start_matches("role"));
            }
        }
        writer.join().unwrap();
    }

    #[test]
    fn stream_ends_on_the_last_write() {
        let store = Arc::new(CredentialStore::open(MemoryCredentials::new()).unwrap());
        let rx = store.subscribe();
        for round in 0..50 {
            let writers: Vec<_> = (0..4)
                .map(|w| {
                    let store = store.clone();
                    std::thread::spawn(move || {
                        for i in 0..20 {
                            store.set(&format!("tok{}-{}-{}", round, w, i), "member").unwrap();
                        }
                    })
                })
                .collect();
            for h in writers {
                h.join().unwrap();
            }
            assert_eq!(*rx.borrow(), store.get());
        }
        store.clear().unwrap();
        assert_eq!(*rx.borrow(), store.get());
    }
}
