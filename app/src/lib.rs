//! # StageLink App
//!
//! The headless client engine for the StageLink booking platform: feature
//! reducers, the push channel, the query cache, and the environment that
//! wires them together.
//!
//! Each screen of the product maps to one feature module with its own
//! `State`/`Action`/reducer triple:
//!
//! - [`features::events`]: the tabbed event list
//! - [`features::event_form`]: create/update submissions
//! - [`features::profile`]: the performer's own page
//! - [`features::chats`]: the message inbox
//! - [`features::session`]: login and logout
//!
//! Any front end drives these by running them on a
//! `stagelink_runtime::Store` with an [`environment::AppEnvironment`].

pub mod cache;
pub mod config;
pub mod environment;
pub mod features;
pub mod gateway;
pub mod notice;
pub mod push;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::{QueryCache, QueryKey};
pub use config::Config;
pub use environment::AppEnvironment;
pub use gateway::{BookingGateway, MediaGateway};
pub use notice::{FieldError, Notice, NoticeLevel};
pub use push::{PushChannel, PushError, PushEvent, Subscription};
