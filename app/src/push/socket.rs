//! WebSocket transport for the push channel

use super::{PushChannel, PushError, PushEvent, Subscription};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use stagelink_api::types::UserId;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::{connect_async, tungstenite::Message};

#[derive(Deserialize)]
struct ServerNote {
    event: String,
}

/// Push channel backed by a WebSocket connection to the server
///
/// One connection per subscription. On connect it announces the viewer with
/// a `join` message; afterwards it only listens. There is no reconnect of
/// our own: when the stream ends the listener logs and stops, and chat data
/// catches up on the next explicit refetch.
#[derive(Clone, Debug)]
pub struct SocketPushChannel {
    url: String,
}

impl SocketPushChannel {
    /// Create a channel that connects to the given WebSocket URL
    #[must_use]
    pub const fn new(url: String) -> Self {
        Self { url }
    }
}

#[async_trait]
impl PushChannel for SocketPushChannel {
    async fn subscribe(
        &self,
        viewer_id: UserId,
        sender: mpsc::UnboundedSender<PushEvent>,
    ) -> Result<Subscription, PushError> {
        let (stream, _) = connect_async(&self.url)
            .await
            .map_err(|e| PushError::Connect(e.to_string()))?;
        let (mut write, mut read) = stream.split();

        let join = serde_json::json!({ "event": "join", "userId": viewer_id }).to_string();
        write
            .send(Message::Text(join))
            .await
            .map_err(|e| PushError::Connect(e.to_string()))?;
        tracing::debug!(%viewer_id, "push channel joined");

        let (close_tx, mut close_rx) = oneshot::channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut close_rx => {
                        let _ = write.send(Message::Close(None)).await;
                        break;
                    },
                    incoming = read.next() => match incoming {
                        Some(Ok(Message::Text(text))) => {
                            let Ok(note) = serde_json::from_str::<ServerNote>(&text) else {
                                tracing::trace!(%text, "ignoring unparseable push frame");
                                continue;
                            };
                            let Some(event) = PushEvent::parse(&note.event) else {
                                tracing::trace!(event = %note.event, "ignoring unknown push event");
                                continue;
                            };
                            if sender.send(event).is_err() {
                                break;
                            }
                        },
                        Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Binary(_) | Message::Frame(_))) => {},
                        Some(Ok(Message::Close(_))) | None => {
                            tracing::warn!(%viewer_id, "push connection closed by server");
                            break;
                        },
                        Some(Err(error)) => {
                            tracing::warn!(%viewer_id, %error, "push connection failed");
                            break;
                        },
                    },
                }
            }
        });

        Ok(Subscription::new(close_tx))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn join_message_carries_viewer_id() {
        let viewer = UserId("perf-7".into());
        let join = serde_json::json!({ "event": "join", "userId": viewer });
        assert_eq!(
            join,
            serde_json::json!({ "event": "join", "userId": "perf-7" })
        );
    }

    #[test]
    fn server_note_parses_event_field() {
        let note: ServerNote =
            serde_json::from_str(r#"{"event":"new-message","chatId":"c1"}"#).unwrap();
        assert_eq!(PushEvent::parse(&note.event), Some(PushEvent::NewMessage));
    }
}
