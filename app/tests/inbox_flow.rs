//! End-to-end inbox flow on a real store
//!
//! Runs the chats reducer on the runtime with an in-process push channel
//! and a canned gateway: open the inbox, receive a push, and observe that
//! the refetch (not the push payload) is what updates the state.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use stagelink_api::{
    ApiError, SessionStore,
    types::{
        Chat, ChatId, ChatParticipant, Event, EventId, EventPage, EventPayload, EventStatus,
        LoginResponse, Message, Performer, Profile, ProfilePayload, UnreadCount, UserId, Venue,
    },
};
use stagelink_app::features::chats::{ChatsAction, ChatsReducer, ChatsState};
use stagelink_app::push::{LocalPushChannel, PushEvent};
use stagelink_app::{AppEnvironment, BookingGateway, MediaGateway, QueryCache};
use stagelink_core::environment::SystemClock;
use stagelink_runtime::Store;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;

/// Gateway whose chat list grows by one on every fetch, so each refetch
/// is observable in state
struct GrowingGateway {
    fetches: Mutex<u32>,
}

impl GrowingGateway {
    fn new() -> Self {
        Self {
            fetches: Mutex::new(0),
        }
    }

    fn chat(n: u32) -> Chat {
        Chat {
            id: ChatId(format!("c{n}")),
            event_id: EventId("ev1".into()),
            participant: ChatParticipant {
                id: UserId("venue-1".into()),
                name: "The Velvet Room".into(),
                image: None,
            },
            last_message: None,
            last_message_at: None,
            unread_count: 0,
        }
    }

    fn unsupported() -> ApiError {
        ApiError::Api {
            status: 404,
            message: "not under test".into(),
        }
    }
}

#[async_trait]
impl BookingGateway for GrowingGateway {
    async fn list_chats(&self) -> Result<Vec<Chat>, ApiError> {
        let mut fetches = self.fetches.lock().unwrap_or_else(PoisonError::into_inner);
        *fetches += 1;
        Ok((1..=*fetches).map(Self::chat).collect())
    }

    async fn unread_count(&self) -> Result<UnreadCount, ApiError> {
        Ok(UnreadCount { count: 2 })
    }

    async fn chat_messages(&self, _chat_id: &ChatId) -> Result<Vec<Message>, ApiError> {
        Ok(Vec::new())
    }

    async fn list_events(
        &self,
        _limit: u32,
        _page: u32,
        _status: Option<EventStatus>,
    ) -> Result<EventPage, ApiError> {
        Err(Self::unsupported())
    }

    async fn list_performer_requests(
        &self,
        _limit: u32,
        _page: u32,
    ) -> Result<EventPage, ApiError> {
        Err(Self::unsupported())
    }

    async fn get_event(&self, _id: &EventId) -> Result<Event, ApiError> {
        Err(Self::unsupported())
    }

    async fn create_event(&self, _payload: &EventPayload) -> Result<Event, ApiError> {
        Err(Self::unsupported())
    }

    async fn update_event(
        &self,
        _id: &EventId,
        _payload: &EventPayload,
    ) -> Result<Event, ApiError> {
        Err(Self::unsupported())
    }

    async fn delete_event(&self, _id: &EventId) -> Result<(), ApiError> {
        Err(Self::unsupported())
    }

    async fn update_request_status(
        &self,
        _id: &EventId,
        _status: EventStatus,
    ) -> Result<Event, ApiError> {
        Err(Self::unsupported())
    }

    async fn get_profile(&self) -> Result<Profile, ApiError> {
        Err(Self::unsupported())
    }

    async fn update_profile(&self, _payload: &ProfilePayload) -> Result<Profile, ApiError> {
        Err(Self::unsupported())
    }

    async fn change_password(&self, _new_password: String) -> Result<(), ApiError> {
        Err(Self::unsupported())
    }

    async fn list_venues(&self) -> Result<Vec<Venue>, ApiError> {
        Err(Self::unsupported())
    }

    async fn list_performers(&self) -> Result<Vec<Performer>, ApiError> {
        Err(Self::unsupported())
    }

    async fn login(&self, _email: String, _password: String) -> Result<LoginResponse, ApiError> {
        Err(Self::unsupported())
    }
}

struct NoMedia;

#[async_trait]
impl MediaGateway for NoMedia {
    async fn upload(
        &self,
        _file_name: String,
        _bytes: Vec<u8>,
        _timestamp: i64,
    ) -> Result<stagelink_api::MediaUpload, ApiError> {
        Err(GrowingGateway::unsupported())
    }
}

fn environment(push: Arc<LocalPushChannel>) -> AppEnvironment {
    AppEnvironment::new(
        Arc::new(SystemClock),
        Arc::new(GrowingGateway::new()),
        Arc::new(NoMedia),
        push,
        QueryCache::new(),
        SessionStore::in_memory(),
    )
}

#[tokio::test]
async fn push_notifications_refresh_the_inbox_via_refetch() {
    let push = Arc::new(LocalPushChannel::new());
    let env = environment(push.clone());
    // The shell subscribes through the environment's channel
    let channel = env.push.clone();
    let store = Store::new(ChatsState::default(), ChatsReducer, env);

    // Forward pushes into the store, as the shell does
    let (tx, mut rx) = mpsc::unbounded_channel();
    let subscription = channel
        .subscribe(UserId("perf-1".into()), tx)
        .await
        .unwrap();
    let push_store = store.clone();
    let forwarder = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let Ok(handle) = push_store.send(ChatsAction::PushReceived(event)).await else {
                break;
            };
            handle.wait().await;
        }
    });

    // Initial load: one chat, unread badge from its own query
    let handle = store.send(ChatsAction::Opened).await.unwrap();
    handle.wait().await;
    let (chats, unread) = store.state(|s| (s.chats.len(), s.unread)).await;
    assert_eq!(chats, 1);
    assert_eq!(unread, 2);

    // A push arrives: the refetched list (now two chats) lands in state
    push.notify(PushEvent::NewMessage);
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if store.state(|s| s.chats.len()).await == 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("push-triggered refetch should land");

    drop(subscription);
    forwarder.abort();
    store.shutdown(Duration::from_secs(5)).await.unwrap();
}
