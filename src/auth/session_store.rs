//! Durable storage for the signed-in user's credential pair.
//!
//! The [`SessionStore`] trait is the only place tokens are read from or
//! written to. The client holds one store and every component that needs the
//! tokens goes through it, so a read or write always covers the whole pair.
//!
//! # Implementations
//!
//! - [`MemorySessionStore`]: process-local, lost on exit
//! - [`FileSessionStore`]: a JSON file with the `accessToken` and
//!   `refreshToken` keys
//!
//! # Example
//!
//! ```rust
//! use vineo_client::{CredentialPair, MemorySessionStore, SessionStore};
//!
//! let store = MemorySessionStore::new();
//! store.set(&CredentialPair::new("T1", "R1"));
//! assert_eq!(store.get(), Some(CredentialPair::new("T1", "R1")));
//!
//! store.clear();
//! assert!(store.get().is_none());
//! ```

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::auth::credentials::{CredentialPair, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

/// Sequence for temporary file names within this process.
static TEMP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Storage for the current credential pair.
///
/// Storage failures never surface to callers: a failed read behaves like an
/// empty store and a failed write is logged and otherwise ignored.
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Returns the stored pair, or `None` if either token is missing.
    fn get(&self) -> Option<CredentialPair>;

    /// Replaces the stored pair.
    fn set(&self, pair: &CredentialPair);

    /// Removes both tokens.
    fn clear(&self);

    /// Returns `true` if a complete pair is stored.
    fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

/// A [`SessionStore`] kept in memory.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    pair: RwLock<Option<CredentialPair>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `pair`.
    #[must_use]
    pub fn with_credentials(pair: CredentialPair) -> Self {
        Self {
            pair: RwLock::new(Some(pair)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<CredentialPair> {
        self.pair
            .read()
            .as_ref()
            .filter(|pair| pair.is_complete())
            .cloned()
    }

    fn set(&self, pair: &CredentialPair) {
        *self.pair.write() = Some(pair.clone());
    }

    fn clear(&self) {
        *self.pair.write() = None;
    }
}

/// A [`SessionStore`] persisted to a JSON file.
///
/// The file holds one object with the `accessToken` and `refreshToken`
/// keys. Each write goes to its own sibling temporary file that is then
/// renamed over the target, so readers never see half of a pair and
/// concurrent writers never share a temporary file.
///
/// On Unix the file is created with mode `0600`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store backed by the file at `path`.
    ///
    /// The file does not need to exist; it is created on the first
    /// [`set`](SessionStore::set).
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        let sequence = TEMP_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        name.push(format!(".{}.{sequence}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }

    fn read(&self) -> io::Result<Option<CredentialPair>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        let entries: Map<String, Value> = serde_json::from_str(&contents)?;
        let token = |key: &str| entries.get(key).and_then(Value::as_str).map(String::from);

        Ok(CredentialPair::from_parts(
            token(ACCESS_TOKEN_KEY),
            token(REFRESH_TOKEN_KEY),
        ))
    }

    fn write(&self, pair: &CredentialPair) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_vec_pretty(pair)?;
        let temp = self.temp_path();
        let result =
            write_private(&temp, &contents).and_then(|()| fs::rename(&temp, &self.path));
        if result.is_err() {
            let _ = fs::remove_file(&temp);
        }
        result
    }
}

/// Creates `path` readable and writable by the owner only, then writes and
/// syncs `contents`.
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<CredentialPair> {
        match self.read() {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!(
                    "Could not read session file {}, treating as signed out: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    fn set(&self, pair: &CredentialPair) {
        if let Err(e) = self.write(pair) {
            tracing::warn!(
                "Could not write session file {}: {}",
                self.path.display(),
                e
            );
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                "Could not remove session file {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySessionStore::new();
        assert!(store.get().is_none());

        let pair = CredentialPair::new("T1", "R1");
        store.set(&pair);
        assert_eq!(store.get(), Some(pair));
        assert!(store.is_authenticated());

        store.clear();
        assert!(store.get().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_memory_store_set_overwrites_whole_pair() {
        let store = MemorySessionStore::with_credentials(CredentialPair::new("T1", "R1"));
        store.set(&CredentialPair::new("T2", "R2"));

        assert_eq!(store.get(), Some(CredentialPair::new("T2", "R2")));
    }

    #[test]
    fn test_memory_store_ignores_empty_tokens() {
        let store = MemorySessionStore::new();

        store.set(&CredentialPair::new("", "R1"));
        assert!(store.get().is_none());
        assert!(!store.is_authenticated());

        store.set(&CredentialPair::new("", ""));
        assert!(store.get().is_none());

        let store = MemorySessionStore::with_credentials(CredentialPair::new("T1", ""));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        let pair = CredentialPair::new("T1", "R1");
        store.set(&pair);
        assert_eq!(store.get(), Some(pair));

        store.clear();
        assert!(store.get().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_missing_file_is_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("absent.json"));

        assert!(store.get().is_none());
        // Clearing an absent file is a no-op
        store.clear();
    }

    #[test]
    fn test_file_store_partial_pair_is_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"accessToken":"T1"}"#).unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.get().is_none());
    }

    #[test]
    fn test_file_store_corrupt_file_is_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.get().is_none());
    }

    #[test]
    fn test_file_store_uses_storage_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);
        store.set(&CredentialPair::new("T1", "R1"));

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["accessToken"], "T1");
        assert_eq!(raw["refreshToken"], "R1");
    }

    #[test]
    fn test_file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/dir/session.json"));

        store.set(&CredentialPair::new("T1", "R1"));
        assert_eq!(store.get(), Some(CredentialPair::new("T1", "R1")));
    }

    #[test]
    fn test_file_store_concurrent_writes_leave_one_complete_pair() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        std::thread::scope(|scope| {
            for i in 0..8 {
                let store = FileSessionStore::new(&path);
                scope.spawn(move || {
                    for round in 0..10 {
                        store.set(&CredentialPair::new(
                            format!("T{i}-{round}"),
                            format!("R{i}-{round}"),
                        ));
                    }
                });
            }
        });

        let pair = FileSessionStore::new(&path).get().unwrap();
        assert_eq!(
            pair.access_token().trim_start_matches('T'),
            pair.refresh_token().trim_start_matches('R')
        );

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["session.json"]);
    }

    #[test]
    fn test_temp_paths_are_unique() {
        let store = FileSessionStore::new("/tmp/session.json");

        let first = store.temp_path();
        let second = store.temp_path();

        assert_ne!(first, second);
        assert_eq!(first.parent(), Some(Path::new("/tmp")));
        assert!(first.to_string_lossy().ends_with(".tmp"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        FileSessionStore::new(&path).set(&CredentialPair::new("T1", "R1"));

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_stores_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemorySessionStore>();
        assert_send_sync::<FileSessionStore>();
    }
}
