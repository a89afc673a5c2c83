//! Gateway traits over the API surface
//!
//! Reducers build effects against these traits rather than the concrete
//! clients, so tests can substitute recording mocks without any network.

use async_trait::async_trait;
use stagelink_api::{
    ApiClient, ApiError, MediaUpload, MediaUploader,
    types::{
        Chat, ChatId, Event, EventId, EventPage, EventPayload, EventStatus, LoginResponse,
        Message, Performer, Profile, ProfilePayload, UnreadCount, Venue,
    },
};

/// Everything the reducers need from the backend REST surface
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// List the performer's submitted events, optionally filtered by status
    async fn list_events(
        &self,
        limit: u32,
        page: u32,
        status: Option<EventStatus>,
    ) -> Result<EventPage, ApiError>;

    /// List venue-directed event requests addressed to the performer
    async fn list_performer_requests(&self, limit: u32, page: u32) -> Result<EventPage, ApiError>;

    /// Fetch a single event by id
    async fn get_event(&self, id: &EventId) -> Result<Event, ApiError>;

    /// Create a new event
    async fn create_event(&self, payload: &EventPayload) -> Result<Event, ApiError>;

    /// Update an existing event
    async fn update_event(&self, id: &EventId, payload: &EventPayload)
    -> Result<Event, ApiError>;

    /// Delete an event
    async fn delete_event(&self, id: &EventId) -> Result<(), ApiError>;

    /// Approve or reject a venue-directed event request
    async fn update_request_status(
        &self,
        id: &EventId,
        status: EventStatus,
    ) -> Result<Event, ApiError>;

    /// Fetch the authenticated performer's profile
    async fn get_profile(&self) -> Result<Profile, ApiError>;

    /// Update the authenticated performer's profile
    async fn update_profile(&self, payload: &ProfilePayload) -> Result<Profile, ApiError>;

    /// Change the account password
    async fn change_password(&self, new_password: String) -> Result<(), ApiError>;

    /// List venues for the profile selectors
    async fn list_venues(&self) -> Result<Vec<Venue>, ApiError>;

    /// List performers for the profile selectors
    async fn list_performers(&self) -> Result<Vec<Performer>, ApiError>;

    /// List all chats for the performer
    async fn list_chats(&self) -> Result<Vec<Chat>, ApiError>;

    /// Fetch the message history of one chat
    async fn chat_messages(&self, chat_id: &ChatId) -> Result<Vec<Message>, ApiError>;

    /// Fetch the viewer-wide unread total
    async fn unread_count(&self) -> Result<UnreadCount, ApiError>;

    /// Exchange credentials for a bearer token
    async fn login(&self, email: String, password: String) -> Result<LoginResponse, ApiError>;
}

#[async_trait]
impl BookingGateway for ApiClient {
    async fn list_events(
        &self,
        limit: u32,
        page: u32,
        status: Option<EventStatus>,
    ) -> Result<EventPage, ApiError> {
        Self::list_events(self, limit, page, status).await
    }

    async fn list_performer_requests(&self, limit: u32, page: u32) -> Result<EventPage, ApiError> {
        Self::list_performer_requests(self, limit, page).await
    }

    async fn get_event(&self, id: &EventId) -> Result<Event, ApiError> {
        Self::get_event(self, id).await
    }

    async fn create_event(&self, payload: &EventPayload) -> Result<Event, ApiError> {
        Self::create_event(self, payload).await
    }

    async fn update_event(
        &self,
        id: &EventId,
        payload: &EventPayload,
    ) -> Result<Event, ApiError> {
        Self::update_event(self, id, payload).await
    }

    async fn delete_event(&self, id: &EventId) -> Result<(), ApiError> {
        Self::delete_event(self, id).await
    }

    async fn update_request_status(
        &self,
        id: &EventId,
        status: EventStatus,
    ) -> Result<Event, ApiError> {
        Self::update_request_status(self, id, status).await
    }

    async fn get_profile(&self) -> Result<Profile, ApiError> {
        Self::get_profile(self).await
    }

    async fn update_profile(&self, payload: &ProfilePayload) -> Result<Profile, ApiError> {
        Self::update_profile(self, payload).await
    }

    async fn change_password(&self, new_password: String) -> Result<(), ApiError> {
        Self::change_password(self, new_password).await
    }

    async fn list_venues(&self) -> Result<Vec<Venue>, ApiError> {
        Self::list_venues(self).await
    }

    async fn list_performers(&self) -> Result<Vec<Performer>, ApiError> {
        Self::list_performers(self).await
    }

    async fn list_chats(&self) -> Result<Vec<Chat>, ApiError> {
        Self::list_chats(self).await
    }

    async fn chat_messages(&self, chat_id: &ChatId) -> Result<Vec<Message>, ApiError> {
        Self::chat_messages(self, chat_id).await
    }

    async fn unread_count(&self) -> Result<UnreadCount, ApiError> {
        Self::unread_count(self).await
    }

    async fn login(&self, email: String, password: String) -> Result<LoginResponse, ApiError> {
        Self::login(self, email, password).await
    }
}

/// Direct upload to the media host
#[async_trait]
pub trait MediaGateway: Send + Sync {
    /// Upload an image, returning its public URL
    ///
    /// `timestamp` is the unix time in seconds used for the signed
    /// handshake.
    async fn upload(
        &self,
        file_name: String,
        bytes: Vec<u8>,
        timestamp: i64,
    ) -> Result<MediaUpload, ApiError>;
}

#[async_trait]
impl MediaGateway for MediaUploader {
    async fn upload(
        &self,
        file_name: String,
        bytes: Vec<u8>,
        timestamp: i64,
    ) -> Result<MediaUpload, ApiError> {
        Self::upload(self, file_name, bytes, timestamp).await
    }
}
