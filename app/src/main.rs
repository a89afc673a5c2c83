//! StageLink demo binary
//!
//! Wires the real dependencies together and drives the inbox feature on a
//! store: fetch the chat list, forward push notifications, shut down
//! cleanly. A front end would do the same with every feature.

use anyhow::Result;
use stagelink_api::{ApiClient, MediaUploader, SessionStore};
use stagelink_app::features::chats::{ChatsAction, ChatsReducer, ChatsState};
use stagelink_app::push::socket::SocketPushChannel;
use stagelink_app::{AppEnvironment, Config, QueryCache};
use stagelink_core::environment::SystemClock;
use stagelink_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stagelink_app=debug,stagelink_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(api = %config.api_base_url, "starting StageLink client");

    let session = match &config.session_file {
        Some(path) => SessionStore::with_file(path.clone()),
        None => SessionStore::in_memory(),
    };
    let api = ApiClient::new(config.api_base_url.clone(), session.clone());
    let media = MediaUploader::new(
        config.media.cloud_name.clone(),
        config.media.api_key.clone(),
        config.media.api_secret.clone(),
    );
    let env = AppEnvironment::new(
        Arc::new(SystemClock),
        Arc::new(api),
        Arc::new(media),
        Arc::new(SocketPushChannel::new(config.socket_url.clone())),
        QueryCache::new(),
        session.clone(),
    );
    let push = env.push.clone();

    let store = Store::new(ChatsState::default(), ChatsReducer, env);

    // Forward server pushes into the store; the reducer answers each with
    // a refetch
    let mut subscription = None;
    if let Some(viewer_id) = session.performer_id() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        match push.subscribe(viewer_id, tx).await {
            Ok(active) => {
                subscription = Some(active);
                let push_store = store.clone();
                tokio::spawn(async move {
                    while let Some(event) = rx.recv().await {
                        if push_store
                            .send(ChatsAction::PushReceived(event))
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                });
            },
            Err(error) => tracing::warn!(%error, "push channel unavailable"),
        }
    } else {
        tracing::info!("no session; log in to receive push notifications");
    }

    match store.send(ChatsAction::Opened).await {
        Ok(handle) => {
            // Let in-flight queries settle before reading state
            if let Err(error) = handle.wait_with_timeout(Duration::from_secs(10)).await {
                tracing::warn!(%error, "queries did not settle in time");
            }
        },
        Err(error) => tracing::error!(%error, "could not open the inbox"),
    }

    let (chat_count, unread) = store.state(|s| (s.chats.len(), s.unread)).await;
    tracing::info!(chat_count, unread, "inbox state");

    drop(subscription);
    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
