//! Session records and the stores that hold them.
//!
//! A [`Session`] is an opaque bearer token tied to a user. Stores are
//! deliberately small: the dashboard only ever looks a token up, writes one
//! on login, and drops one on logout. Two implementations are provided, an
//! in-memory map and a file-backed map that survives restarts for sessions
//! marked persistent ("remember me").

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::api::UserId;

// ============================================================================
// Session Record
// ============================================================================

/// An authenticated session held by a client as a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Opaque token handed to the client.
    pub token: String,
    /// Owning user.
    pub user_id: UserId,
    /// Email at login time, kept for log readability.
    pub email: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Whether the session should survive a server restart.
    pub persistent: bool,
}

impl Session {
    /// Mint a session with a fresh random token.
    pub fn new(user_id: UserId, email: impl Into<String>, persistent: bool) -> Self {
        Self {
            token: Uuid::new_v4().to_string(),
            user_id,
            email: email.into(),
            created_at: Utc::now(),
            persistent,
        }
    }
}

// ============================================================================
// Store Trait
// ============================================================================

/// Storage for active sessions, keyed by token.
///
/// # Thread Safety
///
/// Implementations are shared across request handlers behind an `Arc`, so
/// every method takes `&self` and must synchronize internally.
pub trait SessionStore: Send + Sync {
    /// Look up a session by token.
    fn load(&self, token: &str) -> Option<Session>;

    /// Insert or replace a session.
    fn save(&self, session: Session);

    /// Remove a single session. Unknown tokens are ignored.
    fn clear(&self, token: &str);

    /// Remove every session.
    fn clear_all(&self);
}

// ============================================================================
// In-Memory Store
// ============================================================================

/// Volatile session store. Every session is lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions, for tests and diagnostics.
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, token: &str) -> Option<Session> {
        self.sessions.read().get(token).cloned()
    }

    fn save(&self, session: Session) {
        self.sessions.write().insert(session.token.clone(), session);
    }

    fn clear(&self, token: &str) {
        self.sessions.write().remove(token);
    }

    fn clear_all(&self) {
        self.sessions.write().clear();
    }
}

// ============================================================================
// File-Backed Store
// ============================================================================

/// Session store that mirrors persistent sessions to a JSON file.
///
/// All sessions live in memory; only those with `persistent == true` are
/// written to disk and reloaded when the store is reopened. Non-persistent
/// sessions behave exactly as in [`MemorySessionStore`].
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl FileSessionStore {
    /// Open a store backed by `path`, reloading any sessions saved earlier.
    ///
    /// A missing file is treated as an empty store. A file that exists but
    /// cannot be parsed is an error, so a corrupt store fails loudly at
    /// startup instead of silently discarding sessions.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut sessions = HashMap::new();

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if !contents.trim().is_empty() {
                let stored: Vec<Session> = serde_json::from_str(&contents)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                for session in stored {
                    sessions.insert(session.token.clone(), session);
                }
            }
        }

        Ok(Self {
            path,
            sessions: Arc::new(RwLock::new(sessions)),
        })
    }

    /// Number of live sessions, for tests and diagnostics.
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Rewrite the backing file with the current persistent sessions.
    ///
    /// Called with the write lock already held so file contents always match
    /// the map the caller just updated.
    fn flush(&self, sessions: &HashMap<String, Session>) {
        let persistent: Vec<&Session> = sessions.values().filter(|s| s.persistent).collect();
        let serialized = match serde_json::to_string_pretty(&persistent) {
            Ok(json) => json,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to serialize session store");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, serialized) {
            warn!(path = %self.path.display(), error = %e, "failed to write session store");
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, token: &str) -> Option<Session> {
        self.sessions.read().get(token).cloned()
    }

    fn save(&self, session: Session) {
        let mut sessions = self.sessions.write();
        let persistent = session.persistent;
        sessions.insert(session.token.clone(), session);
        if persistent {
            self.flush(&sessions);
        }
    }

    fn clear(&self, token: &str) {
        let mut sessions = self.sessions.write();
        if let Some(removed) = sessions.remove(token) {
            if removed.persistent {
                self.flush(&sessions);
            }
        }
    }

    fn clear_all(&self) {
        let mut sessions = self.sessions.write();
        sessions.clear();
        self.flush(&sessions);
    }
}
