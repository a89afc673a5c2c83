//! Real-time push channel
//!
//! The server notifies clients when chat data changes; the client responds
//! by refetching through the REST surface. Push payloads never carry data
//! to apply directly. The transport is behind a trait: a WebSocket
//! implementation for production ([`socket::SocketPushChannel`]) and an
//! in-process one for tests and demos ([`LocalPushChannel`]).

use async_trait::async_trait;
use stagelink_api::types::UserId;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};

pub mod socket;

/// Kinds of server notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PushEvent {
    /// A new message arrived in one of the viewer's chats
    NewMessage,
    /// The viewer's chat list changed in some other way
    AllChats,
}

impl PushEvent {
    /// Map a wire event name to a known notification kind
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "new-message" => Some(Self::NewMessage),
            "all-chats" => Some(Self::AllChats),
            _ => None,
        }
    }
}

/// Errors establishing a push subscription
///
/// Only setup can fail loudly; once connected, transport failures are
/// logged and the subscription goes quiet. The next explicit user action
/// refetches whatever was missed.
#[derive(Debug, Error)]
pub enum PushError {
    /// Could not reach the push server
    #[error("Push connection failed: {0}")]
    Connect(String),
}

/// Handle to an active push subscription
///
/// Dropping it closes the connection and detaches the listener task.
#[derive(Debug)]
pub struct Subscription {
    close: Option<oneshot::Sender<()>>,
}

impl Subscription {
    pub(crate) fn new(close: oneshot::Sender<()>) -> Self {
        Self { close: Some(close) }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(close) = self.close.take() {
            // Receiver may already be gone if the transport died first
            let _ = close.send(());
        }
    }
}

/// A source of server push notifications
#[async_trait]
pub trait PushChannel: Send + Sync {
    /// Open one connection for `viewer_id`, forwarding notifications into
    /// `sender` until the returned [`Subscription`] is dropped
    async fn subscribe(
        &self,
        viewer_id: UserId,
        sender: mpsc::UnboundedSender<PushEvent>,
    ) -> Result<Subscription, PushError>;
}

/// In-process push channel backed by a broadcast queue
///
/// [`notify`](Self::notify) stands in for the server.
#[derive(Clone, Debug)]
pub struct LocalPushChannel {
    tx: broadcast::Sender<PushEvent>,
}

impl LocalPushChannel {
    /// Create a local channel
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    /// Publish a notification to every active subscription
    pub fn notify(&self, event: PushEvent) {
        // No subscribers is not an error
        let _ = self.tx.send(event);
    }
}

impl Default for LocalPushChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PushChannel for LocalPushChannel {
    async fn subscribe(
        &self,
        viewer_id: UserId,
        sender: mpsc::UnboundedSender<PushEvent>,
    ) -> Result<Subscription, PushError> {
        let mut rx = self.tx.subscribe();
        let (close_tx, mut close_rx) = oneshot::channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut close_rx => break,
                    received = rx.recv() => match received {
                        Ok(event) => {
                            if sender.send(event).is_err() {
                                break;
                            }
                        },
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(%viewer_id, skipped, "push listener lagged");
                        },
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
        });

        Ok(Subscription::new(close_tx))
    }
}
