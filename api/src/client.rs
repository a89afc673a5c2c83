//! StageLink backend API client implementation
//!
//! One client instance serves every feature. Endpoint methods live in the
//! per-surface modules (`events`, `profile`, `chats`, `auth`); this module
//! holds construction and the shared request plumbing.

use crate::{error::ApiError, session::SessionStore};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// StageLink backend API client
///
/// Attaches the session's bearer token as `Authorization: Bearer <token>`.
/// Paths under `/auth` work without a token (login must), every other path
/// requires one.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Create a new client against the given base URL
    #[must_use]
    pub fn new(base_url: String, session: SessionStore) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// The session store this client reads its bearer token from
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Build a request for `path`, attaching the bearer token
    ///
    /// `/auth` paths tolerate a missing token (the session starts empty);
    /// everywhere else its absence is an error before any bytes go out.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let builder = self
            .client
            .request(method, format!("{}{path}", self.base_url));

        match self.session.token() {
            Some(token) => Ok(builder.bearer_auth(token)),
            None if path.starts_with("/auth") => Ok(builder),
            None => Err(ApiError::MissingToken),
        }
    }

    /// Send a request and decode the JSON response body
    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| ApiError::ParseFailed(e.to_string())),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Api {
                    status: status.as_u16(),
                    message: body,
                })
            },
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::send(self.request(Method::GET, path)?).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        Self::send(self.request(Method::GET, path)?.query(query)).await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        Self::send(self.request(Method::POST, path)?.json(body)).await
    }

    pub(crate) async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        Self::send(self.request(Method::PATCH, path)?.json(body)).await
    }

    /// Send a request where the response body is irrelevant
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .request(Method::DELETE, path)?
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Api {
                    status: status.as_u16(),
                    message: body,
                })
            },
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Token stays out of debug output
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
