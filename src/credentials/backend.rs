use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

/// The persisted pair. Both halves are always present together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub token: String,
    pub role: String,
}

/// Durable storage for the session. Writes must be complete when `store`/`erase` return.
pub trait CredentialBackend: Send + Sync {
    fn load(&self) -> ClientResult<Option<StoredCredentials>>;
    fn store(&self, creds: &StoredCredentials) -> ClientResult<()>;
    fn erase(&self) -> ClientResult<()>;
}

/// On-disk document shape; fields are optional so a damaged file can be detected.
#[derive(Serialize, Deserialize, Default)]
struct CredentialsDoc {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

/// JSON file backend. Writes go to a sibling temp file, are fsynced, then renamed over the target.
pub struct FileCredentials {
    path: PathBuf,
}

impl FileCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    pub fn path(&self) -> &Path { &self.path }

    fn tmp_path(&self) -> PathBuf { self.path.with_extension("json.tmp") }

    fn write_atomically(&self, bytes: &[u8]) -> std::io::Result<()> {
        use std::io::Write;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.tmp_path();
        {
            let mut opts = std::fs::OpenOptions::new();
            opts.create(true).write(true).truncate(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::OpenOptionsExt;
                opts.mode(0o600);
            }
            let mut f = opts.open(&tmp)?;
            f.write_all(bytes)?;
            f.sync_all()?;
        }
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CredentialBackend for FileCredentials {
    fn load(&self) -> ClientResult<Option<StoredCredentials>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ClientError::storage(format!("read '{}': {}", self.path.display(), e))),
        };
        let doc: CredentialsDoc = serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::storage(format!("parse '{}': {}", self.path.display(), e)))?;
        match (doc.token, doc.role) {
            (Some(token), Some(role)) if !token.trim().is_empty() && !role.trim().is_empty() => {
                Ok(Some(StoredCredentials { token, role }))
            }
            (None, None) => Ok(None),
            _ => {
                warn!(target: "society::credentials", "credentials file '{}' holds a partial session; ignoring it", self.path.display());
                Ok(None)
            }
        }
    }

    fn store(&self, creds: &StoredCredentials) -> ClientResult<()> {
        let doc = CredentialsDoc { token: Some(creds.token.clone()), role: Some(creds.role.clone()) };
        let bytes = serde_json::to_vec(&doc).map_err(|e| ClientError::storage(e.to_string()))?;
        self.write_atomically(&bytes)
            .map_err(|e| ClientError::storage(format!("write '{}': {}", self.path.display(), e)))?;
        debug!(target: "society::credentials", "credentials persisted to '{}'", self.path.display());
        Ok(())
    }

    fn erase(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(ClientError::storage(format!("remove '{}': {}", self.path.display(), e))),
        }
        debug!(target: "society::credentials", "credentials removed from '{}'", self.path.display());
        Ok(())
    }
}

/// Process-local backend for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryCredentials {
    slot: Mutex<Option<StoredCredentials>>,
}

impl MemoryCredentials {
    pub fn new() -> Self { Self::default() }

    pub fn with(creds: StoredCredentials) -> Self { Self { slot: Mutex::new(Some(creds)) } }
}

impl CredentialBackend for MemoryCredentials {
    fn load(&self) -> ClientResult<Option<StoredCredentials>> { Ok(self.slot.lock().clone()) }

    fn store(&self, creds: &StoredCredentials) -> ClientResult<()> {
        *self.slot.lock() = Some(creds.clone());
        Ok(())
    }

    fn erase(&self) -> ClientResult<()> {
        *self.slot.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(t: &str, r: &str) -> StoredCredentials { StoredCredentials { token: t.into(), role: r.into() } }

    #[test]
    fn file_roundtrip_and_erase() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileCredentials::new(dir.path().join("nested").join("auth.json"));
        assert_eq!(backend.load().unwrap(), None);
        backend.store(&creds("abc", "member")).unwrap();
        assert_eq!(backend.load().unwrap(), Some(creds("abc", "member")));
        assert!(!backend.tmp_path().exists());
        backend.erase().unwrap();
        assert_eq!(backend.load().unwrap(), None);
        // erasing twice is fine
        backend.erase().unwrap();
    }

    #[test]
    fn partial_document_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        std::fs::write(&path, br#"{"token":"abc"}"#).unwrap();
        assert_eq!(FileCredentials::new(&path).load().unwrap(), None);
    }

    #[test]
    fn corrupt_document_is_a_storage_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        std::fs::write(&path, b"not json").unwrap();
        let err = FileCredentials::new(&path).load().unwrap_err();
        assert_eq!(err.code_str(), "storage_failure");
    }

    #[test]
    fn write_into_unwritable_location_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file, not a dir").unwrap();
        let backend = FileCredentials::new(blocker.join("auth.json"));
        assert!(backend.store(&creds("t", "r")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let backend = FileCredentials::new(dir.path().join("auth.json"));
        backend.store(&creds("t", "r")).unwrap();
        let mode = std::fs::metadata(backend.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }
}
