//! Profile endpoints

use crate::{
    client::ApiClient,
    error::ApiError,
    types::{ChangePasswordRequest, Performer, Profile, ProfilePayload, Venue},
};

impl ApiClient {
    /// Fetch the authenticated performer's profile
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn get_profile(&self) -> Result<Profile, ApiError> {
        self.get("/auth/user/get-profile").await
    }

    /// Update the authenticated performer's profile
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn update_profile(&self, payload: &ProfilePayload) -> Result<Profile, ApiError> {
        self.patch("/auth/user/update-profile", payload).await
    }

    /// Change the account password
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn change_password(&self, new_password: String) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .patch(
                "/auth/user/change-password",
                &ChangePasswordRequest { new_password },
            )
            .await?;
        Ok(())
    }

    /// List venues available for the venue tag selector
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn list_venues(&self) -> Result<Vec<Venue>, ApiError> {
        self.get("/api/performer/venue/get-all-venues").await
    }

    /// List performers available for the host tag selector
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn list_performers(&self) -> Result<Vec<Performer>, ApiError> {
        self.get("/api/venue/performer/get-all-performers").await
    }
}
