//! Direct media-host upload with a signed handshake
//!
//! Images go straight from the client to the media host; the backend only
//! ever sees the resulting URL. The host authenticates uploads with a
//! signature over the timestamp and the account secret:
//! `signature = hex(sha256("timestamp=<unix_ts><secret>"))`.

use crate::error::ApiError;
use reqwest::{Client, multipart};
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Client-side upload size limit (25 MB)
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Successful upload response from the media host
#[derive(Clone, Debug, Deserialize)]
pub struct MediaUpload {
    /// Public HTTPS URL of the uploaded asset
    pub secure_url: String,
}

/// Uploader for the third-party media host
#[derive(Clone)]
pub struct MediaUploader {
    client: Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

impl MediaUploader {
    /// Create an uploader for the given media-host account
    #[must_use]
    pub fn new(cloud_name: String, api_key: String, api_secret: String) -> Self {
        Self {
            client: Client::new(),
            cloud_name,
            api_key,
            api_secret,
        }
    }

    /// The exact string the host expects to be signed
    fn signature_payload(timestamp: i64, secret: &str) -> String {
        format!("timestamp={timestamp}{secret}")
    }

    /// Hex-encoded SHA-256 signature for the given timestamp
    fn sign(&self, timestamp: i64) -> String {
        let payload = Self::signature_payload(timestamp, &self.api_secret);
        hex::encode(Sha256::digest(payload.as_bytes()))
    }

    /// Upload an image, returning its public URL
    ///
    /// `timestamp` is the unix time in seconds used for the signature; the
    /// caller supplies it so time stays injectable.
    ///
    /// # Errors
    ///
    /// Returns `FileTooLarge` before any bytes are sent if the file exceeds
    /// [`MAX_UPLOAD_BYTES`]; otherwise network, API, or parsing errors.
    pub async fn upload(
        &self,
        file_name: String,
        bytes: Vec<u8>,
        timestamp: i64,
    ) -> Result<MediaUpload, ApiError> {
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(ApiError::FileTooLarge {
                limit_bytes: MAX_UPLOAD_BYTES,
                actual_bytes: bytes.len(),
            });
        }

        let signature = self.sign(timestamp);
        let form = multipart::Form::new()
            .part("file", multipart::Part::bytes(bytes).file_name(file_name))
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature);

        let response = self
            .client
            .post(format!(
                "https://api.cloudinary.com/v1_1/{}/image/upload",
                self.cloud_name
            ))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<MediaUpload>()
                .await
                .map_err(|e| ApiError::ParseFailed(e.to_string()))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Api {
                status: status.as_u16(),
                message: body,
            })
        }
    }
}

impl std::fmt::Debug for MediaUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Secret stays out of debug output
        f.debug_struct("MediaUploader")
            .field("cloud_name", &self.cloud_name)
            .finish_non_exhaustive()
    }
}
