//! Tag values for the profile's multi-select fields
//!
//! Tags come from curated option lists or are typed in by the performer.
//! The wire only ever sees flat value strings; labels exist for display.

use thiserror::Error;

/// One entry in a multi-select tag field
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagValue {
    /// Picked from a curated option list
    Curated {
        /// Backend value of the option
        id: String,
        /// Display label of the option
        label: String,
    },
    /// Typed in by the performer
    Custom {
        /// Display label, as typed
        label: String,
        /// Derived wire value
        slug: String,
    },
}

impl TagValue {
    /// A curated tag with its backend value and display label
    #[must_use]
    pub fn curated(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Curated {
            id: id.into(),
            label: label.into(),
        }
    }

    /// A custom tag; the wire value is the slugified label
    #[must_use]
    pub fn custom(label: impl Into<String>) -> Self {
        let label = label.into();
        let slug = slugify(&label);
        Self::Custom { label, slug }
    }

    /// The string that goes over the wire
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Curated { id, .. } => id,
            Self::Custom { slug, .. } => slug,
        }
    }

    /// The string shown to the user
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Curated { label, .. } | Self::Custom { label, .. } => label,
        }
    }
}

/// Derive a wire value from a typed label: lower-cased, with whitespace
/// runs collapsed to single hyphens
#[must_use]
pub fn slugify(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Why a tag could not be added
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    /// The same tag (by slug) is already selected
    #[error("\"{label}\" is already in the list")]
    Duplicate {
        /// Label of the rejected tag
        label: String,
    },
}

/// Add a typed-in tag to a selection, rejecting duplicates
///
/// Duplicates are judged by slug so "jazz" and "Jazz" collide.
///
/// # Errors
///
/// Returns `TagError::Duplicate` when the selection already contains the
/// tag.
pub fn add_custom(tags: &mut Vec<TagValue>, label: &str) -> Result<(), TagError> {
    let slug = slugify(label);
    let collides = tags
        .iter()
        .any(|tag| slugify(tag.label()) == slug || tag.value() == slug);
    if collides {
        return Err(TagError::Duplicate {
            label: label.to_string(),
        });
    }
    tags.push(TagValue::custom(label));
    Ok(())
}

/// Flatten a selection to its wire values
#[must_use]
pub fn values(tags: &[TagValue]) -> Vec<String> {
    tags.iter().map(|tag| tag.value().to_string()).collect()
}

/// The curated genre options
#[must_use]
pub fn curated_genres() -> &'static [(&'static str, &'static str)] {
    &[
        ("the80s", "The 80's"),
        ("tejano", "Tejano"),
        ("rnb", "R&B"),
        ("country", "Country"),
        ("comedy", "Comedy"),
        ("rock", "Rock"),
        ("pop", "Pop"),
        ("jazzBlues", "Jazz/Blues"),
        ("disney", "Disney"),
        ("other", "Other"),
        ("alternative", "Alternative (Emo, Goth, etc.)"),
        ("comedy-mix", "Comedy Mix"),
        ("musical-theater", "Musical Theater"),
        ("the-70s", "The 70's"),
        ("the-90s", "The 90's"),
        ("the-2000s", "The 2000's"),
    ]
}

/// Rebuild tag values from wire values, resolving curated ids to labels
#[must_use]
pub fn from_values(values: &[String], options: &[(&str, &str)]) -> Vec<TagValue> {
    values
        .iter()
        .map(|value| {
            options
                .iter()
                .find(|(id, _)| id == value)
                .map_or_else(
                    || TagValue::Custom {
                        label: value.clone(),
                        slug: value.clone(),
                    },
                    |(id, label)| TagValue::curated(*id, *label),
                )
        })
        .collect()
}
