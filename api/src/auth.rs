//! Auth endpoints
//!
//! Login is the only server-side auth operation; logout is purely
//! client-side (session + cache teardown).

use crate::{
    client::ApiClient,
    error::ApiError,
    types::{LoginRequest, LoginResponse},
};

impl ApiClient {
    /// Exchange credentials for a bearer token
    ///
    /// The caller decides what to do with the token; this method does not
    /// touch the session store.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn login(&self, email: String, password: String) -> Result<LoginResponse, ApiError> {
        self.post("/auth/user/login", &LoginRequest { email, password })
            .await
    }
}
