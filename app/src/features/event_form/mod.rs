//! Event form: create and update submissions
//!
//! One form serves both flows; the only branch is whether an event id is
//! present (update) or not (create). The form keeps calendar date and wall
//! times as the user typed them and combines them into full timestamps at
//! submit time.

use crate::environment::AppEnvironment;
use crate::notice::{FieldError, Notice};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use stagelink_api::types::{Event, EventId, EventPayload, EventType};
use stagelink_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Combine a calendar date and an `HH:MM` wall time into a full timestamp
///
/// Returns `None` when the time string does not parse. Both submitted
/// timestamps land on the same date; there is no midnight rollover.
#[must_use]
pub fn combine_date_time(date: NaiveDate, hhmm: &str) -> Option<DateTime<Utc>> {
    let time = NaiveTime::parse_from_str(hhmm, "%H:%M").ok()?;
    Some(date.and_time(time).and_utc())
}

/// State of the event form
#[derive(Clone, Debug, PartialEq)]
pub struct EventFormState {
    /// Present when editing an existing event
    pub event_id: Option<EventId>,
    /// Event title
    pub title: String,
    /// Hosts running the event
    pub hosts: Vec<String>,
    /// Kind of event
    pub event_type: EventType,
    /// Calendar date
    pub date: Option<NaiveDate>,
    /// Start wall time, `HH:MM`
    pub start_time: String,
    /// End wall time, `HH:MM`
    pub end_time: String,
    /// Venue or address text
    pub location: String,
    /// Free-text description
    pub description: String,
    /// Whether the event is hidden from public listings
    pub is_private: bool,
    /// Uploaded event image URL
    pub image: Option<String>,
    /// Field-level validation failures from the last submit
    pub errors: Vec<FieldError>,
    /// Whether a submit is in flight
    pub submitting: bool,
    /// Latest user-facing notice
    pub notice: Option<Notice>,
}

impl Default for EventFormState {
    fn default() -> Self {
        Self {
            event_id: None,
            title: String::new(),
            hosts: Vec::new(),
            event_type: EventType::DragShow,
            date: None,
            start_time: String::new(),
            end_time: String::new(),
            location: String::new(),
            description: String::new(),
            is_private: false,
            image: None,
            errors: Vec::new(),
            submitting: false,
            notice: None,
        }
    }
}

impl EventFormState {
    /// Prefill the form from an existing event for editing
    #[must_use]
    pub fn editing(event: &Event) -> Self {
        Self {
            event_id: Some(event.id.clone()),
            title: event.title.clone(),
            hosts: event.host.clone(),
            event_type: event.event_type,
            date: event.start_date.map(|d| d.date_naive()),
            start_time: event
                .start_time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
            end_time: event
                .end_time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
            location: event.location.clone(),
            description: event.description.clone(),
            is_private: event.is_private,
            image: event.image.clone(),
            ..Self::default()
        }
    }
}

/// Validate the form and build the wire payload
///
/// All failures are collected so every offending field gets its message in
/// one pass.
///
/// # Errors
///
/// Returns the full list of field-level failures when the form is not
/// submittable.
pub fn validate(state: &EventFormState) -> Result<EventPayload, Vec<FieldError>> {
    let mut errors = Vec::new();

    if state.title.trim().is_empty() {
        errors.push(FieldError::new("title", "Event name is required"));
    }
    if state.hosts.iter().all(|h| h.trim().is_empty()) {
        errors.push(FieldError::new("hosts", "At least one host is required"));
    }

    let date = state.date;
    if date.is_none() {
        errors.push(FieldError::new("date", "Event date is required"));
    }

    let start = date.and_then(|d| combine_date_time(d, &state.start_time));
    if start.is_none() && !state.start_time.is_empty() && date.is_some() {
        errors.push(FieldError::new("start_time", "Start time is not valid"));
    } else if state.start_time.is_empty() {
        errors.push(FieldError::new("start_time", "Start time is required"));
    }

    let end = date.and_then(|d| combine_date_time(d, &state.end_time));
    if end.is_none() && !state.end_time.is_empty() && date.is_some() {
        errors.push(FieldError::new("end_time", "End time is not valid"));
    } else if state.end_time.is_empty() {
        errors.push(FieldError::new("end_time", "End time is required"));
    }

    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            errors.push(FieldError::new(
                "end_time",
                "End time must be after the start time",
            ));
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // All required pieces checked above
    let (Some(date), Some(start), Some(end)) = (date, start, end) else {
        return Err(errors);
    };

    Ok(EventPayload {
        title: state.title.trim().to_string(),
        host: state
            .hosts
            .iter()
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .collect(),
        event_type: state.event_type,
        start_date: date.and_time(NaiveTime::MIN).and_utc(),
        start_time: start,
        end_time: end,
        location: state.location.trim().to_string(),
        description: state.description.clone(),
        is_private: state.is_private,
        image: state.image.clone(),
    })
}

/// Everything that can happen to the event form
#[derive(Clone, Debug)]
pub enum EventFormAction {
    /// Title edited
    TitleChanged(String),
    /// Host list edited
    HostsChanged(Vec<String>),
    /// Event type selected
    TypeChanged(EventType),
    /// Date picked or cleared
    DateChanged(Option<NaiveDate>),
    /// Start wall time edited
    StartTimeChanged(String),
    /// End wall time edited
    EndTimeChanged(String),
    /// Location edited
    LocationChanged(String),
    /// Description edited
    DescriptionChanged(String),
    /// Public/private toggled
    VisibilityChanged(bool),
    /// Image URL set after an upload, or cleared
    ImageChanged(Option<String>),
    /// The user hit submit
    Submitted,
    /// The server accepted the submission
    SubmitSucceeded(Event),
    /// The server rejected the submission
    SubmitFailed(Notice),
    /// Dismiss the current notice
    NoticeCleared,
}

/// Reducer for the event form
#[derive(Clone)]
pub struct EventFormReducer;

impl Reducer for EventFormReducer {
    type State = EventFormState;
    type Action = EventFormAction;
    type Environment = AppEnvironment;

    #[allow(clippy::too_many_lines)]
    fn reduce(
        &self,
        state: &mut EventFormState,
        action: EventFormAction,
        env: &AppEnvironment,
    ) -> SmallVec<[Effect<EventFormAction>; 4]> {
        match action {
            EventFormAction::TitleChanged(title) => {
                state.title = title;
                SmallVec::new()
            },
            EventFormAction::HostsChanged(hosts) => {
                state.hosts = hosts;
                SmallVec::new()
            },
            EventFormAction::TypeChanged(event_type) => {
                state.event_type = event_type;
                SmallVec::new()
            },
            EventFormAction::DateChanged(date) => {
                state.date = date;
                SmallVec::new()
            },
            EventFormAction::StartTimeChanged(time) => {
                state.start_time = time;
                SmallVec::new()
            },
            EventFormAction::EndTimeChanged(time) => {
                state.end_time = time;
                SmallVec::new()
            },
            EventFormAction::LocationChanged(location) => {
                state.location = location;
                SmallVec::new()
            },
            EventFormAction::DescriptionChanged(description) => {
                state.description = description;
                SmallVec::new()
            },
            EventFormAction::VisibilityChanged(is_private) => {
                state.is_private = is_private;
                SmallVec::new()
            },
            EventFormAction::ImageChanged(image) => {
                state.image = image;
                SmallVec::new()
            },
            EventFormAction::Submitted => {
                // Validation failures never reach the network
                let payload = match validate(state) {
                    Ok(payload) => payload,
                    Err(errors) => {
                        state.errors = errors;
                        return SmallVec::new();
                    },
                };
                state.errors.clear();
                state.submitting = true;

                let gateway = env.gateway.clone();
                let event_id = state.event_id.clone();
                smallvec![Effect::future(async move {
                    let result = match &event_id {
                        Some(id) => gateway.update_event(id, &payload).await,
                        None => gateway.create_event(&payload).await,
                    };
                    Some(match result {
                        Ok(event) => EventFormAction::SubmitSucceeded(event),
                        Err(error) => {
                            tracing::warn!(%error, "event submit failed");
                            EventFormAction::SubmitFailed(Notice::error(
                                "Could not save the event. Please try again.",
                            ))
                        },
                    })
                })]
            },
            EventFormAction::SubmitSucceeded(event) => {
                state.submitting = false;
                // A created event is edited from now on
                state.event_id = Some(event.id);
                state.notice = Some(Notice::success("Event saved"));
                SmallVec::new()
            },
            EventFormAction::SubmitFailed(notice) => {
                // Form contents stay put for retry
                state.submitting = false;
                state.notice = Some(notice);
                SmallVec::new()
            },
            EventFormAction::NoticeCleared => {
                state.notice = None;
                SmallVec::new()
            },
        }
    }
}
