//! Event endpoints
//!
//! Two upstream collections back the events UI: the performer's own
//! submitted events (status-filterable) and the venue-directed requests
//! addressed to the performer.

use crate::{
    client::ApiClient,
    error::ApiError,
    types::{Event, EventId, EventPage, EventPayload, EventStatus},
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    limit: u32,
    page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<EventStatus>,
}

#[derive(Serialize)]
struct StatusBody {
    status: EventStatus,
}

impl ApiClient {
    /// List the performer's submitted events, optionally filtered by status
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn list_events(
        &self,
        limit: u32,
        page: u32,
        status: Option<EventStatus>,
    ) -> Result<EventPage, ApiError> {
        self.get_with_query(
            "/api/performer/event/get-all-events",
            &ListQuery {
                limit,
                page,
                status,
            },
        )
        .await
    }

    /// List venue-directed event requests addressed to the performer
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn list_performer_requests(
        &self,
        limit: u32,
        page: u32,
    ) -> Result<EventPage, ApiError> {
        self.get_with_query(
            "/api/performer/event/get-all-performer-events",
            &ListQuery {
                limit,
                page,
                status: None,
            },
        )
        .await
    }

    /// Fetch a single event by id
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn get_event(&self, id: &EventId) -> Result<Event, ApiError> {
        self.get(&format!("/api/performer/event/get-single-event/{id}"))
            .await
    }

    /// Create a new event
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn create_event(&self, payload: &EventPayload) -> Result<Event, ApiError> {
        self.post("/api/performer/event/add-event", payload).await
    }

    /// Update an existing event
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn update_event(
        &self,
        id: &EventId,
        payload: &EventPayload,
    ) -> Result<Event, ApiError> {
        self.patch(&format!("/api/performer/event/update-event/{id}"), payload)
            .await
    }

    /// Delete an event
    ///
    /// # Errors
    ///
    /// Returns errors for network failures or API errors
    pub async fn delete_event(&self, id: &EventId) -> Result<(), ApiError> {
        self.delete(&format!("/api/performer/event/delete-event/{id}"))
            .await
    }

    /// Approve or reject a venue-directed event request
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn update_request_status(
        &self,
        id: &EventId,
        status: EventStatus,
    ) -> Result<Event, ApiError> {
        self.patch(
            &format!("/api/performer/event/update-performer-event-status/{id}"),
            &StatusBody { status },
        )
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn list_query_serializes_status_when_present() {
        let with_status = serde_json::to_value(ListQuery {
            limit: 10,
            page: 2,
            status: Some(EventStatus::Approved),
        })
        .unwrap();
        assert_eq!(
            with_status,
            serde_json::json!({"limit": 10, "page": 2, "status": "approved"})
        );

        let without_status = serde_json::to_value(ListQuery {
            limit: 10,
            page: 1,
            status: None,
        })
        .unwrap();
        assert_eq!(without_status, serde_json::json!({"limit": 10, "page": 1}));
    }
}
