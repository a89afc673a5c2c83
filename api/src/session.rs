//! Shared session store
//!
//! Holds the bearer token and the authenticated performer's id. This is the
//! only client state that survives a restart; everything else is transient
//! cache state. The store is cheap to clone and safe to share between the
//! API client, the push channel, and the reducers' environment.

use crate::types::UserId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct SessionData {
    token: Option<String>,
    performer_id: Option<UserId>,
}

/// Thread-safe store for the bearer token and performer id
///
/// Comes in two flavors: purely in-memory, or backed by a JSON file that is
/// rewritten on every credential change and removed on [`clear`](Self::clear).
#[derive(Clone, Debug)]
pub struct SessionStore {
    data: Arc<RwLock<SessionData>>,
    file: Option<PathBuf>,
}

impl SessionStore {
    /// Create an in-memory session store with no credentials
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            data: Arc::new(RwLock::new(SessionData::default())),
            file: None,
        }
    }

    /// Create a file-backed session store, loading credentials if the file
    /// exists
    ///
    /// An unreadable or malformed file is treated as an empty session; the
    /// failure is logged, not surfaced, since the user can simply log in
    /// again.
    #[must_use]
    pub fn with_file(path: PathBuf) -> Self {
        let data = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<SessionData>(&contents) {
                Ok(data) => data,
                Err(error) => {
                    tracing::warn!(?path, %error, "session file is malformed, starting fresh");
                    SessionData::default()
                },
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => SessionData::default(),
            Err(error) => {
                tracing::warn!(?path, %error, "failed to read session file, starting fresh");
                SessionData::default()
            },
        };

        Self {
            data: Arc::new(RwLock::new(data)),
            file: Some(path),
        }
    }

    /// Get the current bearer token, if logged in
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .clone()
    }

    /// Get the authenticated performer's id, if logged in
    #[must_use]
    pub fn performer_id(&self) -> Option<UserId> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .performer_id
            .clone()
    }

    /// Store credentials after a successful login
    pub fn set_credentials(&self, token: String, performer_id: UserId) {
        {
            let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
            data.token = Some(token);
            data.performer_id = Some(performer_id);
        }
        self.persist();
    }

    /// Drop all credentials
    ///
    /// Called synchronously on logout so no token leaks into the next
    /// session. Removes the backing file if there is one.
    pub fn clear(&self) {
        {
            let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
            *data = SessionData::default();
        }
        if let Some(path) = &self.file {
            if let Err(error) = std::fs::remove_file(path) {
                if error.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(?path, %error, "failed to remove session file");
                }
            }
        }
    }

    fn persist(&self) {
        let Some(path) = &self.file else {
            return;
        };
        let data = self
            .data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match serde_json::to_string_pretty(&data) {
            Ok(json) => {
                if let Err(error) = std::fs::write(path, json) {
                    tracing::warn!(?path, %error, "failed to write session file");
                }
            },
            Err(error) => {
                tracing::warn!(%error, "failed to serialize session data");
            },
        }
    }
}
