//! Configuration management for the StageLink client.
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present) with sensible defaults for development.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the backend REST API
    pub api_base_url: String,
    /// WebSocket URL of the push server
    pub socket_url: String,
    /// Media host credentials for signed uploads
    pub media: MediaConfig,
    /// Where to persist the session; `None` keeps it in memory only
    pub session_file: Option<PathBuf>,
}

/// Media host configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Media host account (cloud) name
    pub cloud_name: String,
    /// Media host API key
    pub api_key: String,
    /// Media host API secret used for the signed handshake
    pub api_secret: String,
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        // A missing .env file is fine; real env vars still apply
        dotenvy::dotenv().ok();

        Self {
            api_base_url: env::var("STAGELINK_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:4000/api/v1".to_string()),
            socket_url: env::var("STAGELINK_SOCKET_URL")
                .unwrap_or_else(|_| "ws://localhost:4000/socket".to_string()),
            media: MediaConfig {
                cloud_name: env::var("STAGELINK_MEDIA_CLOUD_NAME")
                    .unwrap_or_else(|_| "stagelink-dev".to_string()),
                api_key: env::var("STAGELINK_MEDIA_API_KEY").unwrap_or_default(),
                api_secret: env::var("STAGELINK_MEDIA_API_SECRET").unwrap_or_default(),
            },
            session_file: env::var("STAGELINK_SESSION_FILE").ok().map(PathBuf::from),
        }
    }
}
