//! Wire types shared between the API client and the application features
//!
//! Field names follow the backend's JSON conventions: Mongo-style `_id`
//! primary keys and camelCase everywhere else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque event identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

/// Opaque chat identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub String);

/// Opaque user identifier (performer or venue account)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Approval status of an event request, scoped to the viewing performer
///
/// `Hash` because the status is part of cache keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Awaiting a decision
    Pending,
    /// Accepted by the performer
    Approved,
    /// Declined by the performer
    Rejected,
}

impl EventStatus {
    /// Wire representation, as used in query strings
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Kind of event, from the fixed set the platform supports
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    /// Drag show
    DragShow,
    /// Comedy show
    Comedy,
    /// Music concert
    Music,
    /// Dance performance
    Dance,
    /// Theater show
    Theater,
    /// Anything else
    Other,
}

/// An event as returned by the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Primary key
    #[serde(rename = "_id")]
    pub id: EventId,

    /// Event title
    pub title: String,

    /// Hosts running the event
    #[serde(default)]
    pub host: Vec<String>,

    /// Kind of event
    pub event_type: EventType,

    /// Calendar date of the event; day granularity drives list ordering
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,

    /// Start timestamp
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,

    /// End timestamp
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,

    /// Venue or address text
    #[serde(default)]
    pub location: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Whether the event is hidden from public listings
    #[serde(default)]
    pub is_private: bool,

    /// Uploaded event image URL
    #[serde(default)]
    pub image: Option<String>,

    /// Per-viewer approval status; present only in the request queue
    #[serde(default)]
    pub status: Option<EventStatus>,
}

/// One page of events from a list endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPage {
    /// Events on this page
    #[serde(default)]
    pub docs: Vec<Event>,

    /// Total number of pages for the query
    #[serde(default)]
    pub total_pages: u32,
}

/// Body for creating or updating an event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    /// Event title
    pub title: String,
    /// Hosts running the event
    pub host: Vec<String>,
    /// Kind of event
    pub event_type: EventType,
    /// Calendar date of the event
    pub start_date: DateTime<Utc>,
    /// Start timestamp, on the same date
    pub start_time: DateTime<Utc>,
    /// End timestamp, on the same date
    pub end_time: DateTime<Utc>,
    /// Venue or address text
    pub location: String,
    /// Free-text description
    pub description: String,
    /// Whether the event is hidden from public listings
    pub is_private: bool,
    /// Uploaded event image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// The counterpart participant in a chat
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatParticipant {
    /// Account id of the participant
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Avatar URL
    #[serde(default)]
    pub image: Option<String>,
}

/// A chat thread between the viewer and one counterpart, about one event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    /// Primary key
    #[serde(rename = "_id")]
    pub id: ChatId,

    /// Event the chat is about
    pub event_id: EventId,

    /// The other participant
    pub participant: ChatParticipant,

    /// Text of the latest message
    #[serde(default)]
    pub last_message: Option<String>,

    /// Timestamp of the latest message
    #[serde(default)]
    pub last_message_at: Option<DateTime<Utc>>,

    /// Unread messages for the viewer
    #[serde(default)]
    pub unread_count: u32,
}

/// A single message inside a chat
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Primary key
    #[serde(rename = "_id")]
    pub id: String,

    /// Chat this message belongs to
    pub chat_id: ChatId,

    /// Author of the message
    pub sender_id: UserId,

    /// Message body
    pub text: String,

    /// When the message was sent
    pub created_at: DateTime<Utc>,
}

/// Viewer-wide unread message total
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCount {
    /// Total unread messages across all chats
    #[serde(default)]
    pub count: u64,
}

/// Social media links attached to a profile
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    /// Instagram handle or URL
    #[serde(default)]
    pub instagram: Option<String>,
    /// Facebook page URL
    #[serde(default)]
    pub facebook: Option<String>,
    /// TikTok handle or URL
    #[serde(default)]
    pub tiktok: Option<String>,
    /// YouTube channel URL
    #[serde(default)]
    pub youtube: Option<String>,
}

/// The authenticated performer's profile
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Account id
    #[serde(rename = "_id")]
    pub id: UserId,

    /// Stage name
    pub drag_name: String,

    /// Short tagline shown under the name
    #[serde(default)]
    pub tagline: String,

    /// Long-form biography
    #[serde(default)]
    pub bio: String,

    /// Genre tag values
    #[serde(default)]
    pub genres: Vec<String>,

    /// Performance type tag values
    #[serde(default)]
    pub performance_types: Vec<String>,

    /// Venue tag values the performer has played
    #[serde(default)]
    pub venues: Vec<String>,

    /// Host tag values the performer has worked with
    #[serde(default)]
    pub hosts: Vec<String>,

    /// Whether the performer accepts private bookings
    #[serde(default)]
    pub accepts_private_bookings: bool,

    /// Social media links
    #[serde(default)]
    pub social_links: SocialLinks,

    /// Profile photo URL
    #[serde(default)]
    pub image: Option<String>,
}

/// Body for updating the authenticated performer's profile
///
/// Tag fields carry flat value vectors; labels are a client-side concern
/// and never reach the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    /// Stage name
    pub drag_name: String,
    /// Short tagline
    pub tagline: String,
    /// Long-form biography
    pub bio: String,
    /// Genre tag values
    pub genres: Vec<String>,
    /// Performance type tag values
    pub performance_types: Vec<String>,
    /// Venue tag values
    pub venues: Vec<String>,
    /// Host tag values
    pub hosts: Vec<String>,
    /// Whether the performer accepts private bookings
    pub accepts_private_bookings: bool,
    /// Social media links
    pub social_links: SocialLinks,
    /// Profile photo URL
    pub image: String,
}

/// A venue visible to performers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    /// Account id
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Venue name
    pub name: String,
}

/// A performer visible to venues
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performer {
    /// Account id
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Stage name
    pub name: String,
}

/// Credentials for the login endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Successful login response
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// Id of the authenticated account
    pub user_id: UserId,
}

/// Body for the change-password endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Replacement password
    pub new_password: String,
}
