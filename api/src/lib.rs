//! # StageLink API Client
//!
//! Typed client for the StageLink backend REST surface and the signed
//! media-host upload handshake.
//!
//! ## Example
//!
//! ```no_run
//! use stagelink_api::{ApiClient, SessionStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = SessionStore::in_memory();
//!     let client = ApiClient::new("https://api.stagelink.test/api/v1".into(), session);
//!
//!     let login = client.login("roxy@example.com".into(), "hunter2".into()).await?;
//!     client.session().set_credentials(login.token, login.user_id);
//!
//!     let chats = client.list_chats().await?;
//!     println!("{} chats", chats.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - Bearer-token injection from a shared session store
//! - Events, profile, chats, and auth endpoints
//! - Direct media upload with the SHA-256 signed handshake
//! - Type-safe wire types for the backend's JSON conventions

pub mod auth;
pub mod chats;
pub mod client;
pub mod error;
pub mod events;
pub mod media;
pub mod profile;
pub mod session;
pub mod types;

// Re-export main types for convenience
pub use client::ApiClient;
pub use error::ApiError;
pub use media::{MAX_UPLOAD_BYTES, MediaUpload, MediaUploader};
pub use session::SessionStore;
pub use types::{
    Chat, ChatId, Event, EventId, EventPage, EventPayload, EventStatus, EventType, LoginResponse,
    Message, Performer, Profile, ProfilePayload, SocialLinks, UnreadCount, UserId, Venue,
};
