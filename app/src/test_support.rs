//! Shared fixtures for feature tests: a recording gateway, a stub media
//! host, and an environment wired to the fixed test clock.

#![allow(clippy::unwrap_used)]

use crate::cache::QueryCache;
use crate::environment::AppEnvironment;
use crate::gateway::{BookingGateway, MediaGateway};
use crate::push::LocalPushChannel;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use stagelink_api::{
    ApiError, MediaUpload, SessionStore,
    types::{
        Chat, ChatId, Event, EventId, EventPage, EventPayload, EventStatus, EventType,
        LoginResponse, Message, Performer, Profile, ProfilePayload, SocialLinks, UnreadCount,
        UserId, Venue,
    },
};
use stagelink_core::environment::Clock;
use stagelink_testing::test_clock;
use std::sync::{Arc, Mutex, PoisonError};

/// Gateway double that records every call and serves canned data
#[derive(Default)]
pub struct RecordingGateway {
    calls: Mutex<Vec<String>>,
    /// Served by `list_events`
    pub events_page: Mutex<EventPage>,
    /// Served by `list_performer_requests`
    pub requests_page: Mutex<EventPage>,
    /// Served by `list_chats`
    pub chats: Mutex<Vec<Chat>>,
    /// Served by `chat_messages`
    pub messages: Mutex<Vec<Message>>,
    /// Served by `unread_count`
    pub unread: Mutex<u64>,
    /// When set, every call fails with a 500
    pub fail: Mutex<bool>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the calls made so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// How many recorded calls start with `prefix`
    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap_or_else(PoisonError::into_inner) = fail;
    }

    fn record(&self, call: impl Into<String>) -> Result<(), ApiError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call.into());
        if *self.fail.lock().unwrap_or_else(PoisonError::into_inner) {
            Err(ApiError::Api {
                status: 500,
                message: "boom".into(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BookingGateway for RecordingGateway {
    async fn list_events(
        &self,
        limit: u32,
        page: u32,
        status: Option<EventStatus>,
    ) -> Result<EventPage, ApiError> {
        let status = status.map_or("none", EventStatus::as_str);
        self.record(format!("list_events limit={limit} page={page} status={status}"))?;
        Ok(self
            .events_page
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn list_performer_requests(&self, limit: u32, page: u32) -> Result<EventPage, ApiError> {
        self.record(format!("list_performer_requests limit={limit} page={page}"))?;
        Ok(self
            .requests_page
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn get_event(&self, id: &EventId) -> Result<Event, ApiError> {
        self.record(format!("get_event {id}"))?;
        Ok(event(&id.0, None))
    }

    async fn create_event(&self, payload: &EventPayload) -> Result<Event, ApiError> {
        self.record(format!("create_event {}", payload.title))?;
        Ok(event("created", Some(payload.start_date)))
    }

    async fn update_event(
        &self,
        id: &EventId,
        payload: &EventPayload,
    ) -> Result<Event, ApiError> {
        self.record(format!("update_event {id} {}", payload.title))?;
        Ok(event(&id.0, Some(payload.start_date)))
    }

    async fn delete_event(&self, id: &EventId) -> Result<(), ApiError> {
        self.record(format!("delete_event {id}"))
    }

    async fn update_request_status(
        &self,
        id: &EventId,
        status: EventStatus,
    ) -> Result<Event, ApiError> {
        self.record(format!("update_request_status {id} {}", status.as_str()))?;
        let mut updated = event(&id.0, None);
        updated.status = Some(status);
        Ok(updated)
    }

    async fn get_profile(&self) -> Result<Profile, ApiError> {
        self.record("get_profile")?;
        Ok(profile())
    }

    async fn update_profile(&self, payload: &ProfilePayload) -> Result<Profile, ApiError> {
        self.record(format!("update_profile {}", payload.drag_name))?;
        let mut updated = profile();
        updated.drag_name.clone_from(&payload.drag_name);
        Ok(updated)
    }

    async fn change_password(&self, _new_password: String) -> Result<(), ApiError> {
        self.record("change_password")
    }

    async fn list_venues(&self) -> Result<Vec<Venue>, ApiError> {
        self.record("list_venues")?;
        Ok(vec![Venue {
            id: UserId("v1".into()),
            name: "The Velvet Room".into(),
        }])
    }

    async fn list_performers(&self) -> Result<Vec<Performer>, ApiError> {
        self.record("list_performers")?;
        Ok(vec![Performer {
            id: UserId("p1".into()),
            name: "Roxy Riot".into(),
        }])
    }

    async fn list_chats(&self) -> Result<Vec<Chat>, ApiError> {
        self.record("list_chats")?;
        Ok(self
            .chats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn chat_messages(&self, chat_id: &ChatId) -> Result<Vec<Message>, ApiError> {
        self.record(format!("chat_messages {chat_id}"))?;
        Ok(self
            .messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn unread_count(&self) -> Result<UnreadCount, ApiError> {
        self.record("unread_count")?;
        Ok(UnreadCount {
            count: *self.unread.lock().unwrap_or_else(PoisonError::into_inner),
        })
    }

    async fn login(&self, email: String, _password: String) -> Result<LoginResponse, ApiError> {
        self.record(format!("login {email}"))?;
        Ok(LoginResponse {
            token: "test-token".into(),
            user_id: UserId("perf-1".into()),
        })
    }
}

/// Media host double
#[derive(Default)]
pub struct StubMedia {
    /// When set, uploads fail with a 500
    pub fail: bool,
}

#[async_trait]
impl MediaGateway for StubMedia {
    async fn upload(
        &self,
        _file_name: String,
        _bytes: Vec<u8>,
        _timestamp: i64,
    ) -> Result<MediaUpload, ApiError> {
        if self.fail {
            Err(ApiError::Api {
                status: 500,
                message: "upload failed".into(),
            })
        } else {
            Ok(MediaUpload {
                secure_url: "https://media.test/image.png".into(),
            })
        }
    }
}

/// Environment wired to the fixed test clock and the given gateway
pub fn test_env(gateway: Arc<dyn BookingGateway>) -> AppEnvironment {
    test_env_with_media(gateway, Arc::new(StubMedia::default()))
}

pub fn test_env_with_media(
    gateway: Arc<dyn BookingGateway>,
    media: Arc<dyn MediaGateway>,
) -> AppEnvironment {
    AppEnvironment::new(
        Arc::new(test_clock()),
        gateway,
        media,
        Arc::new(LocalPushChannel::new()),
        QueryCache::new(),
        SessionStore::in_memory(),
    )
}

/// An event dated relative to nothing in particular
pub fn event(id: &str, start_date: Option<DateTime<Utc>>) -> Event {
    Event {
        id: EventId(id.into()),
        title: format!("Event {id}"),
        host: vec!["Roxy Riot".into()],
        event_type: EventType::DragShow,
        start_date,
        start_time: start_date,
        end_time: start_date.map(|d| d + Duration::hours(3)),
        location: "The Velvet Room".into(),
        description: String::new(),
        is_private: false,
        image: None,
        status: None,
    }
}

/// An event `days` days away from the fixed test clock's today
pub fn event_days_from_today(id: &str, days: i64) -> Event {
    event(id, Some(test_clock().now() + Duration::days(days)))
}

pub fn profile() -> Profile {
    Profile {
        id: UserId("perf-1".into()),
        drag_name: "Roxy Riot".into(),
        tagline: "Loud and proud".into(),
        bio: String::new(),
        genres: vec!["pop".into()],
        performance_types: vec!["lip-sync".into()],
        venues: vec![],
        hosts: vec![],
        accepts_private_bookings: true,
        social_links: SocialLinks::default(),
        image: Some("https://media.test/roxy.png".into()),
    }
}

pub fn chat(id: &str, unread: u32) -> Chat {
    Chat {
        id: ChatId(id.into()),
        event_id: EventId("ev1".into()),
        participant: stagelink_api::types::ChatParticipant {
            id: UserId("venue-1".into()),
            name: "The Velvet Room".into(),
            image: None,
        },
        last_message: Some("See you Friday".into()),
        last_message_at: Some(test_clock().now()),
        unread_count: unread,
    }
}
