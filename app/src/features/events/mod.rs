//! Events feature: the tabbed event list
//!
//! Three tabs over two upstream collections: venue-directed incoming
//! requests, and the performer's own submissions split by approval status.
//! Only the active tab's query is ever fetched; switching tabs swaps the
//! query and resets the page.

use crate::cache::QueryKey;
use crate::environment::AppEnvironment;
use crate::gateway::BookingGateway;
use crate::notice::Notice;
use stagelink_api::types::{Event, EventId, EventPage, EventStatus};
use stagelink_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;

pub mod listing;

/// Display page size for the client-side pagination
pub const PAGE_SIZE: usize = 10;

/// Server limit large enough to pull the whole collection in one query;
/// ordering and pagination happen client-side over the full set
const FETCH_LIMIT: u32 = 1000;

/// The three event-list tabs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    /// Venue-directed requests awaiting the performer's decision
    #[default]
    IncomingRequests,
    /// Own submissions still pending venue approval
    Pending,
    /// Own submissions that were approved
    Confirmed,
}

impl Tab {
    /// Status filter the tab's query uses, if it queries own submissions
    #[must_use]
    pub const fn status_filter(self) -> Option<EventStatus> {
        match self {
            Self::IncomingRequests => None,
            Self::Pending => Some(EventStatus::Pending),
            Self::Confirmed => Some(EventStatus::Approved),
        }
    }

    const fn cache_key(self) -> QueryKey {
        match self {
            Self::IncomingRequests => QueryKey::PerformerRequests,
            Self::Pending | Self::Confirmed => QueryKey::EventsList {
                status: self.status_filter(),
            },
        }
    }
}

/// State of the event list
#[derive(Clone, Debug, PartialEq)]
pub struct EventsState {
    /// Active tab
    pub tab: Tab,
    /// 1-based page of the active tab's query
    pub page: u32,
    /// Whether the active tab's query is in flight
    pub loading: bool,
    /// Full ordered set backing the active tab
    pub ordered: Vec<Event>,
    /// Events of the current page, in display order
    pub events: Vec<Event>,
    /// Total pages of the ordered set at [`PAGE_SIZE`]
    pub total_pages: u32,
    /// Latest user-facing notice
    pub notice: Option<Notice>,
}

impl Default for EventsState {
    fn default() -> Self {
        Self {
            tab: Tab::default(),
            page: 1,
            loading: false,
            ordered: Vec::new(),
            events: Vec::new(),
            total_pages: 0,
            notice: None,
        }
    }
}

/// Everything that can happen to the event list
#[derive(Clone, Debug)]
pub enum EventsAction {
    /// The list became visible; fetch the active tab
    Opened,
    /// The user switched tabs
    TabSelected(Tab),
    /// The user moved to another page; re-slices the ordered set locally
    PageSelected(u32),
    /// Refetch the active tab in place
    Refresh,
    /// The active tab's query resolved with the full collection
    Loaded {
        /// Tab the query belonged to
        tab: Tab,
        /// Server response
        result: EventPage,
    },
    /// The active tab's query failed
    LoadFailed {
        /// Tab the query belonged to
        tab: Tab,
        /// What to tell the user
        notice: Notice,
    },
    /// Delete an event, then refetch the list
    DeleteRequested(EventId),
    /// Approve or reject an incoming request, then refetch
    StatusDecided {
        /// Request being decided
        id: EventId,
        /// The decision
        status: EventStatus,
    },
    /// Dismiss the current notice
    NoticeCleared,
}

/// Reducer for the event list
#[derive(Clone)]
pub struct EventsReducer;

impl EventsReducer {
    async fn fetch_all(gateway: Arc<dyn BookingGateway>, tab: Tab) -> EventsAction {
        let result = match tab {
            Tab::IncomingRequests => gateway.list_performer_requests(FETCH_LIMIT, 1).await,
            Tab::Pending | Tab::Confirmed => {
                gateway.list_events(FETCH_LIMIT, 1, tab.status_filter()).await
            },
        };
        match result {
            Ok(result) => EventsAction::Loaded { tab, result },
            Err(error) => {
                tracing::warn!(?tab, %error, "event list query failed");
                EventsAction::LoadFailed {
                    tab,
                    notice: Notice::error("Could not load events. Please try again."),
                }
            },
        }
    }

    fn load_effect(tab: Tab, env: &AppEnvironment) -> Effect<EventsAction> {
        let gateway = env.gateway.clone();
        Effect::future(async move { Some(Self::fetch_all(gateway, tab).await) })
    }

    /// Re-slice the ordered set into the state's current page
    fn apply_page(state: &mut EventsState) {
        let view = listing::paginate(&state.ordered, state.page, PAGE_SIZE);
        state.total_pages = view.total_pages;
        state.events = view.items;
    }
}

impl Reducer for EventsReducer {
    type State = EventsState;
    type Action = EventsAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut EventsState,
        action: EventsAction,
        env: &AppEnvironment,
    ) -> SmallVec<[Effect<EventsAction>; 4]> {
        match action {
            EventsAction::Opened | EventsAction::Refresh => {
                state.loading = true;
                smallvec![Self::load_effect(state.tab, env)]
            },
            EventsAction::TabSelected(tab) => {
                state.tab = tab;
                state.page = 1;
                state.loading = true;
                smallvec![Self::load_effect(tab, env)]
            },
            EventsAction::PageSelected(page) => {
                // The full set is already here; no fetch
                state.page = page.max(1);
                Self::apply_page(state);
                SmallVec::new()
            },
            EventsAction::Loaded { tab, result } => {
                // A response for a tab the user already left is stale
                if tab != state.tab {
                    return SmallVec::new();
                }
                state.loading = false;
                env.cache.insert(tab.cache_key(), &result);
                state.ordered = listing::order(result.docs, env.clock.today());
                Self::apply_page(state);
                SmallVec::new()
            },
            EventsAction::LoadFailed { tab, notice } => {
                if tab == state.tab {
                    state.loading = false;
                    state.notice = Some(notice);
                }
                SmallVec::new()
            },
            EventsAction::DeleteRequested(id) => {
                let tab = state.tab;
                env.cache.invalidate(&tab.cache_key());
                let gateway = env.gateway.clone();
                // Refetch only after the delete resolves
                smallvec![Effect::future(async move {
                    if let Err(error) = gateway.delete_event(&id).await {
                        tracing::warn!(%id, %error, "event delete failed");
                        return Some(EventsAction::LoadFailed {
                            tab,
                            notice: Notice::error("Could not delete the event."),
                        });
                    }
                    Some(Self::fetch_all(gateway, tab).await)
                })]
            },
            EventsAction::StatusDecided { id, status } => {
                let tab = state.tab;
                env.cache.invalidate(&tab.cache_key());
                let gateway = env.gateway.clone();
                smallvec![Effect::future(async move {
                    if let Err(error) = gateway.update_request_status(&id, status).await {
                        tracing::warn!(%id, %error, "request status update failed");
                        return Some(EventsAction::LoadFailed {
                            tab,
                            notice: Notice::error("Could not update the request."),
                        });
                    }
                    Some(Self::fetch_all(gateway, tab).await)
                })]
            },
            EventsAction::NoticeCleared => {
                state.notice = None;
                SmallVec::new()
            },
        }
    }
}
