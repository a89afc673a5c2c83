//! User-facing notices
//!
//! Every server rejection collapses to one generic notice; reducers leave
//! prior state intact so the user can retry.

/// Severity of a notice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Something succeeded
    Success,
    /// Something failed
    Error,
}

/// A short message for the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Message text
    pub message: String,
}

impl Notice {
    /// Build an error notice
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Build a success notice
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }
}

/// A validation failure tied to one form field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// Field the message belongs to
    pub field: &'static str,
    /// What to show next to the field
    pub message: String,
}

impl FieldError {
    /// Build a field-level message
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
