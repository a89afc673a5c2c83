//! Chats feature: the message inbox
//!
//! The chat list, one open conversation, and the viewer-wide unread total.
//! Server pushes never carry chat data; they only trigger refetches here,
//! so the REST responses stay the single source of truth.

use crate::cache::QueryKey;
use crate::environment::AppEnvironment;
use crate::notice::Notice;
use crate::push::PushEvent;
use stagelink_api::types::{Chat, ChatId, EventId, Message, UserId};
use stagelink_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Which conversation is open
///
/// A conversation with a venue that has no chat yet is a first-class case,
/// not a sentinel id: the draft carries the event and recipient needed to
/// start one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ChatTarget {
    /// No conversation open
    #[default]
    None,
    /// An existing chat
    Existing(ChatId),
    /// A chat that does not exist yet
    Draft {
        /// Event the conversation would be about
        event_id: EventId,
        /// Counterpart to start it with
        recipient_id: UserId,
    },
}

/// State of the inbox
#[derive(Clone, Debug, Default)]
pub struct ChatsState {
    /// All chats, newest activity first as the server returns them
    pub chats: Vec<Chat>,
    /// The open conversation
    pub target: ChatTarget,
    /// Messages of the open conversation
    pub messages: Vec<Message>,
    /// Viewer-wide unread total
    pub unread: u64,
    /// Whether the chat list query is in flight
    pub loading_chats: bool,
    /// Whether the message history query is in flight
    pub loading_messages: bool,
    /// Latest user-facing notice
    pub notice: Option<Notice>,
}

/// Everything that can happen in the inbox
#[derive(Clone, Debug)]
pub enum ChatsAction {
    /// The inbox became visible; fetch chats and the unread total
    Opened,
    /// The chat list query resolved
    ChatsLoaded(Vec<Chat>),
    /// The message history query resolved
    MessagesLoaded {
        /// Chat the history belongs to
        chat_id: ChatId,
        /// The messages
        messages: Vec<Message>,
    },
    /// The unread total query resolved
    UnreadLoaded(u64),
    /// The user opened (or closed) a conversation
    TargetSelected(ChatTarget),
    /// The server pushed a notification
    PushReceived(PushEvent),
    /// A query failed
    LoadFailed(Notice),
    /// Dismiss the current notice
    NoticeCleared,
}

/// Reducer for the inbox
#[derive(Clone)]
pub struct ChatsReducer;

impl ChatsReducer {
    fn chats_effect(env: &AppEnvironment) -> Effect<ChatsAction> {
        let gateway = env.gateway.clone();
        Effect::future(async move {
            Some(match gateway.list_chats().await {
                Ok(chats) => ChatsAction::ChatsLoaded(chats),
                Err(error) => {
                    tracing::warn!(%error, "chat list query failed");
                    ChatsAction::LoadFailed(Notice::error("Could not load your chats."))
                },
            })
        })
    }

    fn unread_effect(env: &AppEnvironment) -> Effect<ChatsAction> {
        let gateway = env.gateway.clone();
        Effect::future(async move {
            match gateway.unread_count().await {
                Ok(unread) => Some(ChatsAction::UnreadLoaded(unread.count)),
                Err(error) => {
                    // The badge just goes stale; nothing to tell the user
                    tracing::warn!(%error, "unread count query failed");
                    None
                },
            }
        })
    }

    fn messages_effect(chat_id: ChatId, env: &AppEnvironment) -> Effect<ChatsAction> {
        let gateway = env.gateway.clone();
        Effect::future(async move {
            Some(match gateway.chat_messages(&chat_id).await {
                Ok(messages) => ChatsAction::MessagesLoaded { chat_id, messages },
                Err(error) => {
                    tracing::warn!(%chat_id, %error, "message history query failed");
                    ChatsAction::LoadFailed(Notice::error("Could not load the conversation."))
                },
            })
        })
    }
}

impl Reducer for ChatsReducer {
    type State = ChatsState;
    type Action = ChatsAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut ChatsState,
        action: ChatsAction,
        env: &AppEnvironment,
    ) -> SmallVec<[Effect<ChatsAction>; 4]> {
        match action {
            ChatsAction::Opened => {
                state.loading_chats = true;
                smallvec![Self::chats_effect(env), Self::unread_effect(env)]
            },
            ChatsAction::ChatsLoaded(chats) => {
                state.loading_chats = false;
                env.cache.insert(QueryKey::ChatList, &chats);
                state.chats = chats;
                SmallVec::new()
            },
            ChatsAction::MessagesLoaded { chat_id, messages } => {
                // The user may have moved on while the history was loading
                if state.target != ChatTarget::Existing(chat_id.clone()) {
                    return SmallVec::new();
                }
                state.loading_messages = false;
                env.cache.insert(QueryKey::ChatMessages(chat_id), &messages);
                state.messages = messages;
                SmallVec::new()
            },
            ChatsAction::UnreadLoaded(unread) => {
                env.cache.insert(QueryKey::UnreadCount, &unread);
                state.unread = unread;
                SmallVec::new()
            },
            ChatsAction::TargetSelected(target) => {
                state.target = target.clone();
                state.messages.clear();
                match target {
                    ChatTarget::Existing(chat_id) => {
                        state.loading_messages = true;
                        // Opening a chat marks it read server-side, so the
                        // badge needs a refresh too
                        smallvec![
                            Self::messages_effect(chat_id, env),
                            Self::unread_effect(env),
                        ]
                    },
                    ChatTarget::None | ChatTarget::Draft { .. } => {
                        state.loading_messages = false;
                        SmallVec::new()
                    },
                }
            },
            ChatsAction::PushReceived(event) => {
                // Refetch only; the payload is never applied to state
                match event {
                    PushEvent::NewMessage => {
                        smallvec![Self::chats_effect(env), Self::unread_effect(env)]
                    },
                    PushEvent::AllChats => smallvec![Self::chats_effect(env)],
                }
            },
            ChatsAction::LoadFailed(notice) => {
                state.loading_chats = false;
                state.loading_messages = false;
                state.notice = Some(notice);
                SmallVec::new()
            },
            ChatsAction::NoticeCleared => {
                state.notice = None;
                SmallVec::new()
            },
        }
    }
}
