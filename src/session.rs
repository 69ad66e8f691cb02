//! Session management for the Calorie Counter client
//!
//! The session holds the opaque token pair issued by the API plus the
//! signed-in username. It lives in a shared in-memory slot and is mirrored
//! to a pluggable storage backend so it can survive a process restart,
//! the way a browser client keeps it in local storage.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use log::warn;
use serde::{Deserialize, Serialize};

/// Session data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// The access token, sent as a bearer credential on every
    /// authenticated request
    pub access_token: String,

    /// The refresh token (stored but unused; there is no refresh flow)
    pub refresh_token: String,

    /// The display username captured at sign-in
    pub username: String,
}

/// Durable storage for the session, the local-storage analog.
///
/// Implementations must tolerate repeated `clear` calls and never panic on
/// I/O problems; persistence is best-effort and the in-memory slot stays
/// authoritative for the life of the process.
pub trait StorageBackend: Send + Sync {
    /// Load a previously persisted session, if any
    fn load(&self) -> Option<Session>;

    /// Persist the session
    fn persist(&self, session: &Session);

    /// Remove any persisted session
    fn discard(&self);
}

/// Keeps the session only in memory
#[derive(Debug, Default)]
pub struct MemoryStorage;

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Option<Session> {
        None
    }

    fn persist(&self, _session: &Session) {}

    fn discard(&self) {}
}

/// Persists the session as a JSON file
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create a file-backed storage at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StorageBackend for FileStorage {
    fn load(&self) -> Option<Session> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!("ignoring unreadable session file {:?}: {}", self.path, err);
                None
            }
        }
    }

    fn persist(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(contents) => {
                if let Err(err) = std::fs::write(&self.path, contents) {
                    warn!("failed to persist session to {:?}: {}", self.path, err);
                }
            }
            Err(err) => warn!("failed to serialize session: {}", err),
        }
    }

    fn discard(&self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!("failed to remove session file {:?}: {}", self.path, err);
            }
        }
    }
}

/// Shared handle to the current session.
///
/// The store is an explicit value threaded through the client constructor;
/// clones share the same slot and backend. It is written on sign-in,
/// cleared on sign-out or any 401 response, and reloaded from the backend
/// when constructed.
#[derive(Clone)]
pub struct SessionStore {
    slot: Arc<Mutex<Option<Session>>>,
    backend: Arc<dyn StorageBackend>,
}

impl SessionStore {
    /// Create a store with no persistence
    pub fn in_memory() -> Self {
        Self::with_backend(MemoryStorage)
    }

    /// Create a store over the given backend, loading any persisted session
    pub fn with_backend(backend: impl StorageBackend + 'static) -> Self {
        let initial = backend.load();
        Self {
            slot: Arc::new(Mutex::new(initial)),
            backend: Arc::new(backend),
        }
    }

    /// Get the current session
    pub fn get(&self) -> Option<Session> {
        let current = self.slot.lock().unwrap();
        current.clone()
    }

    /// Get the current access token
    pub fn access_token(&self) -> Option<String> {
        let current = self.slot.lock().unwrap();
        current.as_ref().map(|session| session.access_token.clone())
    }

    /// Get the signed-in username
    pub fn username(&self) -> Option<String> {
        let current = self.slot.lock().unwrap();
        current.as_ref().map(|session| session.username.clone())
    }

    /// Whether a session is present
    pub fn is_signed_in(&self) -> bool {
        let current = self.slot.lock().unwrap();
        current.is_some()
    }

    /// Replace the session and mirror it to the backend
    pub fn set(&self, session: Session) {
        self.backend.persist(&session);
        let mut current = self.slot.lock().unwrap();
        *current = Some(session);
    }

    /// Drop the session everywhere. Idempotent, safe from any context.
    pub fn clear(&self) {
        self.backend.discard();
        let mut current = self.slot.lock().unwrap();
        *current = None;
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("signed_in", &self.is_signed_in())
            .finish()
    }
}
