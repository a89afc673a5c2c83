//! Application environment
//!
//! Every dependency a reducer may need, bundled behind one cloneable value.
//! Reducers receive it by reference and clone the pieces their effects
//! capture.

use crate::cache::QueryCache;
use crate::gateway::{BookingGateway, MediaGateway};
use crate::push::PushChannel;
use stagelink_api::SessionStore;
use stagelink_core::environment::Clock;
use std::sync::Arc;

/// Injected dependencies for all StageLink reducers
#[derive(Clone)]
pub struct AppEnvironment {
    /// Time source; "today" for the event partition comes from here
    pub clock: Arc<dyn Clock>,
    /// Backend REST surface
    pub gateway: Arc<dyn BookingGateway>,
    /// Media-host uploader
    pub media: Arc<dyn MediaGateway>,
    /// Server push notifications
    pub push: Arc<dyn PushChannel>,
    /// Query snapshots
    pub cache: QueryCache,
    /// Bearer token and performer id
    pub session: SessionStore,
}

impl AppEnvironment {
    /// Bundle the given dependencies into an environment
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        gateway: Arc<dyn BookingGateway>,
        media: Arc<dyn MediaGateway>,
        push: Arc<dyn PushChannel>,
        cache: QueryCache,
        session: SessionStore,
    ) -> Self {
        Self {
            clock,
            gateway,
            media,
            push,
            cache,
            session,
        }
    }
}

impl std::fmt::Debug for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEnvironment")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
