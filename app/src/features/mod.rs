//! Domain features, one reducer per screen

pub mod chats;
pub mod event_form;
pub mod events;
pub mod profile;
pub mod session;
