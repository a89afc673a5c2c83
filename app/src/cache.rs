//! Explicit query cache
//!
//! The remote backend owns all data; the client keeps keyed snapshots of
//! query results here. The cache travels through the environment, never as
//! a global, and `reset` wipes it wholesale on logout so nothing from one
//! session is visible in the next.

use stagelink_api::types::{ChatId, EventStatus};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Key of one cached query result
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The performer's submitted events, fetched whole
    EventsList {
        /// Status filter the list was fetched with
        status: Option<EventStatus>,
    },
    /// Venue-directed event requests, fetched whole
    PerformerRequests,
    /// The chat list
    ChatList,
    /// Message history of one chat
    ChatMessages(ChatId),
    /// Viewer-wide unread total
    UnreadCount,
    /// The performer's profile
    Profile,
    /// Venue options for the profile selectors
    Venues,
    /// Performer options for the profile selectors
    Performers,
}

/// Keyed store of JSON query snapshots
///
/// Cheap to clone; all clones share the same underlying map. Writers take
/// the lock briefly, so "last response wins" falls out of effect ordering,
/// not of anything the cache does.
#[derive(Clone, Debug, Default)]
pub struct QueryCache {
    entries: Arc<RwLock<HashMap<QueryKey, serde_json::Value>>>,
}

impl QueryCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot under `key`, replacing any previous value
    ///
    /// Values that fail to serialize are dropped with a log line; a stale
    /// cache entry is worse than a missing one.
    pub fn insert<T: serde::Serialize>(&self, key: QueryKey, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => {
                self.entries
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(key, json);
            },
            Err(error) => {
                tracing::warn!(?key, %error, "failed to serialize cache entry");
                self.invalidate(&key);
            },
        }
    }

    /// Fetch the snapshot under `key`, if present and still decodable
    #[must_use]
    pub fn get<T: serde::de::DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let json = entries.get(key)?;
        serde_json::from_value(json.clone()).ok()
    }

    /// Remove the snapshot under `key`
    pub fn invalidate(&self, key: &QueryKey) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    /// Remove every snapshot
    pub fn reset(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of cached snapshots
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache holds no snapshots
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
