//! Profile feature: the performer's own page
//!
//! Loads the profile plus the venue/performer option lists, edits tag
//! selections with duplicate rejection, uploads the profile photo through
//! the media host, and submits the flattened payload.

use crate::cache::QueryKey;
use crate::environment::AppEnvironment;
use crate::notice::{FieldError, Notice};
use stagelink_api::types::{Performer, Profile, ProfilePayload, SocialLinks, Venue};
use stagelink_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

pub mod tags;

use tags::TagValue;

/// The profile's multi-select tag fields
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagField {
    /// Music genres
    Genres,
    /// Performance types
    PerformanceTypes,
    /// Venues played
    Venues,
    /// Hosts worked with
    Hosts,
}

/// State of the profile page
#[derive(Clone, Debug, Default)]
pub struct ProfileState {
    /// Whether the initial load is in flight
    pub loading: bool,
    /// Whether a profile save is in flight
    pub saving: bool,
    /// Whether a photo upload is in flight
    pub uploading: bool,
    /// Stage name
    pub drag_name: String,
    /// Short tagline
    pub tagline: String,
    /// Long-form biography
    pub bio: String,
    /// Genre selection
    pub genres: Vec<TagValue>,
    /// Performance type selection
    pub performance_types: Vec<TagValue>,
    /// Venue selection
    pub venues: Vec<TagValue>,
    /// Host selection
    pub hosts: Vec<TagValue>,
    /// Whether the performer accepts private bookings
    pub accepts_private_bookings: bool,
    /// Social media links
    pub social_links: SocialLinks,
    /// Profile photo URL (doubles as the preview)
    pub image: Option<String>,
    /// Venue options for the selector
    pub venue_options: Vec<Venue>,
    /// Performer options for the selector
    pub performer_options: Vec<Performer>,
    /// Field-level validation failures from the last submit
    pub errors: Vec<FieldError>,
    /// Latest user-facing notice
    pub notice: Option<Notice>,
}

impl ProfileState {
    fn tag_field_mut(&mut self, field: TagField) -> &mut Vec<TagValue> {
        match field {
            TagField::Genres => &mut self.genres,
            TagField::PerformanceTypes => &mut self.performance_types,
            TagField::Venues => &mut self.venues,
            TagField::Hosts => &mut self.hosts,
        }
    }

    fn apply(&mut self, profile: &Profile) {
        self.drag_name.clone_from(&profile.drag_name);
        self.tagline.clone_from(&profile.tagline);
        self.bio.clone_from(&profile.bio);
        self.genres = tags::from_values(&profile.genres, tags::curated_genres());
        self.performance_types = tags::from_values(&profile.performance_types, &[]);
        let venue_options: Vec<(&str, &str)> = self
            .venue_options
            .iter()
            .map(|v| (v.id.0.as_str(), v.name.as_str()))
            .collect();
        self.venues = tags::from_values(&profile.venues, &venue_options);
        let performer_options: Vec<(&str, &str)> = self
            .performer_options
            .iter()
            .map(|p| (p.id.0.as_str(), p.name.as_str()))
            .collect();
        self.hosts = tags::from_values(&profile.hosts, &performer_options);
        self.accepts_private_bookings = profile.accepts_private_bookings;
        self.social_links = profile.social_links.clone();
        self.image.clone_from(&profile.image);
    }
}

/// Flatten the edited state into the wire payload
///
/// # Errors
///
/// Returns field-level failures when required fields are missing; the
/// profile photo must be uploaded before submitting.
pub fn to_payload(state: &ProfileState) -> Result<ProfilePayload, Vec<FieldError>> {
    let mut errors = Vec::new();
    if state.drag_name.trim().is_empty() {
        errors.push(FieldError::new("drag_name", "Drag name is required"));
    }
    let Some(image) = state.image.clone() else {
        errors.push(FieldError::new("image", "A profile photo is required"));
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ProfilePayload {
        drag_name: state.drag_name.trim().to_string(),
        tagline: state.tagline.clone(),
        bio: state.bio.clone(),
        genres: tags::values(&state.genres),
        performance_types: tags::values(&state.performance_types),
        venues: tags::values(&state.venues),
        hosts: tags::values(&state.hosts),
        accepts_private_bookings: state.accepts_private_bookings,
        social_links: state.social_links.clone(),
        image,
    })
}

/// Everything that can happen on the profile page
#[derive(Clone, Debug)]
pub enum ProfileAction {
    /// The page became visible; load profile and option lists
    Opened,
    /// The profile query resolved
    Loaded(Profile),
    /// The profile query failed
    LoadFailed(Notice),
    /// The venue options resolved
    VenuesLoaded(Vec<Venue>),
    /// The performer options resolved
    PerformersLoaded(Vec<Performer>),
    /// Stage name edited
    DragNameChanged(String),
    /// Tagline edited
    TaglineChanged(String),
    /// Biography edited
    BioChanged(String),
    /// Private bookings toggled
    PrivateBookingsChanged(bool),
    /// Social links edited
    SocialLinksChanged(SocialLinks),
    /// A curated option was selected
    TagSelected {
        /// Which list
        field: TagField,
        /// The selected option
        tag: TagValue,
    },
    /// A custom tag was typed in
    CustomTagAdded {
        /// Which list
        field: TagField,
        /// The typed label
        label: String,
    },
    /// A tag was removed
    TagRemoved {
        /// Which list
        field: TagField,
        /// Wire value of the removed tag
        value: String,
    },
    /// The user picked a new profile photo
    UploadRequested {
        /// Original file name
        file_name: String,
        /// File contents
        bytes: Vec<u8>,
    },
    /// The photo upload resolved
    UploadSucceeded(String),
    /// The photo upload failed
    UploadFailed(Notice),
    /// The user hit save
    Submitted,
    /// The server accepted the profile
    SubmitSucceeded(Profile),
    /// The server rejected the profile
    SubmitFailed(Notice),
    /// The user submitted a new password
    ChangePasswordSubmitted(String),
    /// The password change resolved
    PasswordChangeSucceeded,
    /// The password change failed
    PasswordChangeFailed(Notice),
    /// Dismiss the current notice
    NoticeCleared,
}

/// Reducer for the profile page
#[derive(Clone)]
pub struct ProfileReducer;

impl Reducer for ProfileReducer {
    type State = ProfileState;
    type Action = ProfileAction;
    type Environment = AppEnvironment;

    #[allow(clippy::too_many_lines)]
    fn reduce(
        &self,
        state: &mut ProfileState,
        action: ProfileAction,
        env: &AppEnvironment,
    ) -> SmallVec<[Effect<ProfileAction>; 4]> {
        match action {
            ProfileAction::Opened => {
                state.loading = true;
                let profile_gateway = env.gateway.clone();
                let venues_gateway = env.gateway.clone();
                let performers_gateway = env.gateway.clone();
                smallvec![
                    Effect::future(async move {
                        Some(match profile_gateway.get_profile().await {
                            Ok(profile) => ProfileAction::Loaded(profile),
                            Err(error) => {
                                tracing::warn!(%error, "profile query failed");
                                ProfileAction::LoadFailed(Notice::error(
                                    "Could not load your profile.",
                                ))
                            },
                        })
                    }),
                    Effect::future(async move {
                        match venues_gateway.list_venues().await {
                            Ok(venues) => Some(ProfileAction::VenuesLoaded(venues)),
                            Err(error) => {
                                tracing::warn!(%error, "venue options query failed");
                                None
                            },
                        }
                    }),
                    Effect::future(async move {
                        match performers_gateway.list_performers().await {
                            Ok(performers) => Some(ProfileAction::PerformersLoaded(performers)),
                            Err(error) => {
                                tracing::warn!(%error, "performer options query failed");
                                None
                            },
                        }
                    }),
                ]
            },
            ProfileAction::Loaded(profile) => {
                state.loading = false;
                state.apply(&profile);
                env.cache.insert(QueryKey::Profile, &profile);
                SmallVec::new()
            },
            ProfileAction::LoadFailed(notice) => {
                state.loading = false;
                state.notice = Some(notice);
                SmallVec::new()
            },
            ProfileAction::VenuesLoaded(venues) => {
                env.cache.insert(QueryKey::Venues, &venues);
                state.venue_options = venues;
                SmallVec::new()
            },
            ProfileAction::PerformersLoaded(performers) => {
                env.cache.insert(QueryKey::Performers, &performers);
                state.performer_options = performers;
                SmallVec::new()
            },
            ProfileAction::DragNameChanged(value) => {
                state.drag_name = value;
                SmallVec::new()
            },
            ProfileAction::TaglineChanged(value) => {
                state.tagline = value;
                SmallVec::new()
            },
            ProfileAction::BioChanged(value) => {
                state.bio = value;
                SmallVec::new()
            },
            ProfileAction::PrivateBookingsChanged(value) => {
                state.accepts_private_bookings = value;
                SmallVec::new()
            },
            ProfileAction::SocialLinksChanged(links) => {
                state.social_links = links;
                SmallVec::new()
            },
            ProfileAction::TagSelected { field, tag } => {
                let list = state.tag_field_mut(field);
                if list.iter().any(|t| t.value() == tag.value()) {
                    return SmallVec::new();
                }
                list.push(tag);
                SmallVec::new()
            },
            ProfileAction::CustomTagAdded { field, label } => {
                if let Err(error) = tags::add_custom(state.tag_field_mut(field), &label) {
                    state.notice = Some(Notice::error(error.to_string()));
                }
                SmallVec::new()
            },
            ProfileAction::TagRemoved { field, value } => {
                state.tag_field_mut(field).retain(|t| t.value() != value);
                SmallVec::new()
            },
            ProfileAction::UploadRequested { file_name, bytes } => {
                state.uploading = true;
                let media = env.media.clone();
                let timestamp = env.clock.now().timestamp();
                smallvec![Effect::future(async move {
                    Some(match media.upload(file_name, bytes, timestamp).await {
                        Ok(upload) => ProfileAction::UploadSucceeded(upload.secure_url),
                        Err(error) => {
                            tracing::warn!(%error, "photo upload failed");
                            ProfileAction::UploadFailed(Notice::error(
                                "Could not upload the photo. Please try again.",
                            ))
                        },
                    })
                })]
            },
            ProfileAction::UploadSucceeded(url) => {
                state.uploading = false;
                state.image = Some(url);
                SmallVec::new()
            },
            ProfileAction::UploadFailed(notice) => {
                // Preview rolls back to empty
                state.uploading = false;
                state.image = None;
                state.notice = Some(notice);
                SmallVec::new()
            },
            ProfileAction::Submitted => {
                let payload = match to_payload(state) {
                    Ok(payload) => payload,
                    Err(errors) => {
                        state.errors = errors;
                        return SmallVec::new();
                    },
                };
                state.errors.clear();
                state.saving = true;
                let gateway = env.gateway.clone();
                smallvec![Effect::future(async move {
                    Some(match gateway.update_profile(&payload).await {
                        Ok(profile) => ProfileAction::SubmitSucceeded(profile),
                        Err(error) => {
                            tracing::warn!(%error, "profile save failed");
                            ProfileAction::SubmitFailed(Notice::error(
                                "Could not save your profile. Please try again.",
                            ))
                        },
                    })
                })]
            },
            ProfileAction::SubmitSucceeded(profile) => {
                state.saving = false;
                state.notice = Some(Notice::success("Profile saved"));
                env.cache.insert(QueryKey::Profile, &profile);
                SmallVec::new()
            },
            ProfileAction::SubmitFailed(notice) => {
                state.saving = false;
                state.notice = Some(notice);
                SmallVec::new()
            },
            ProfileAction::ChangePasswordSubmitted(new_password) => {
                let gateway = env.gateway.clone();
                smallvec![Effect::future(async move {
                    Some(match gateway.change_password(new_password).await {
                        Ok(()) => ProfileAction::PasswordChangeSucceeded,
                        Err(error) => {
                            tracing::warn!(%error, "password change failed");
                            ProfileAction::PasswordChangeFailed(Notice::error(
                                "Could not change the password.",
                            ))
                        },
                    })
                })]
            },
            ProfileAction::PasswordChangeSucceeded => {
                state.notice = Some(Notice::success("Password changed"));
                SmallVec::new()
            },
            ProfileAction::PasswordChangeFailed(notice) => {
                state.notice = Some(notice);
                SmallVec::new()
            },
            ProfileAction::NoticeCleared => {
                state.notice = None;
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingGateway, StubMedia, profile, test_env, test_env_with_media};
    use stagelink_testing::{ReducerTest, assertions};
    use std::sync::Arc;

    fn loaded_state() -> ProfileState {
        let mut state = ProfileState::default();
        state.apply(&profile());
        state
    }

    #[test]
    fn opened_fetches_profile_and_both_option_lists() {
        let env = test_env(Arc::new(RecordingGateway::new()));
        ReducerTest::new(ProfileReducer)
            .with_env(env)
            .given_state(ProfileState::default())
            .when_action(ProfileAction::Opened)
            .then_state(|state| assert!(state.loading))
            .then_effects(|effects| {
                assert_eq!(assertions::count_future_effects(effects), 3);
            })
            .run();
    }

    #[test]
    fn duplicate_custom_tag_is_rejected_with_a_notice() {
        let env = test_env(Arc::new(RecordingGateway::new()));
        let mut state = loaded_state();
        state.genres = vec![TagValue::custom("Jazz")];

        ReducerTest::new(ProfileReducer)
            .with_env(env)
            .given_state(state)
            .when_action(ProfileAction::CustomTagAdded {
                field: TagField::Genres,
                label: "jazz".into(),
            })
            .then_state(|state| {
                assert_eq!(state.genres.len(), 1);
                assert!(state.notice.is_some());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn payload_flattens_tags_to_value_vectors() {
        let mut state = loaded_state();
        state.genres = vec![
            TagValue::curated("jazzBlues", "Jazz/Blues"),
            TagValue::custom("Punk Rock"),
        ];
        state.social_links.instagram = Some("@roxy".into());

        let payload = to_payload(&state).unwrap();
        assert_eq!(payload.genres, vec!["jazzBlues", "punk-rock"]);
        assert_eq!(payload.social_links.instagram.as_deref(), Some("@roxy"));
        assert!(payload.accepts_private_bookings);
    }

    #[test]
    fn submit_without_photo_is_blocked() {
        let env = test_env(Arc::new(RecordingGateway::new()));
        let mut state = loaded_state();
        state.image = None;

        ReducerTest::new(ProfileReducer)
            .with_env(env)
            .given_state(state)
            .when_action(ProfileAction::Submitted)
            .then_state(|state| {
                assert!(!state.saving);
                assert!(state.errors.iter().any(|e| e.field == "image"));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn upload_failure_rolls_the_preview_back() {
        let env = test_env(Arc::new(RecordingGateway::new()));
        let mut state = loaded_state();
        state.uploading = true;

        ReducerTest::new(ProfileReducer)
            .with_env(env)
            .given_state(state)
            .when_action(ProfileAction::UploadFailed(Notice::error(
                "Could not upload the photo. Please try again.",
            )))
            .then_state(|state| {
                assert!(!state.uploading);
                assert!(state.image.is_none());
                assert!(state.notice.is_some());
            })
            .run();
    }

    #[tokio::test]
    async fn upload_effect_reports_the_hosted_url() {
        let env = test_env_with_media(
            Arc::new(RecordingGateway::new()),
            Arc::new(StubMedia::default()),
        );
        let mut state = loaded_state();

        let effects = ProfileReducer.reduce(
            &mut state,
            ProfileAction::UploadRequested {
                file_name: "roxy.png".into(),
                bytes: vec![1, 2, 3],
            },
            &env,
        );
        assert!(state.uploading);

        let mut produced = Vec::new();
        for effect in effects {
            if let Effect::Future(fut) = effect {
                if let Some(action) = fut.await {
                    produced.push(action);
                }
            }
        }
        assert!(matches!(
            produced.as_slice(),
            [ProfileAction::UploadSucceeded(url)] if url == "https://media.test/image.png"
        ));
    }

    #[tokio::test]
    async fn valid_submit_sends_the_flattened_payload() {
        let gateway = Arc::new(RecordingGateway::new());
        let env = test_env(gateway.clone());
        let mut state = loaded_state();

        let effects = ProfileReducer.reduce(&mut state, ProfileAction::Submitted, &env);
        assert!(state.saving);
        for effect in effects {
            if let Effect::Future(fut) = effect {
                fut.await;
            }
        }
        assert_eq!(gateway.call_count("update_profile"), 1);
    }

    #[test]
    fn loaded_resolves_curated_genre_labels() {
        let env = test_env(Arc::new(RecordingGateway::new()));
        ReducerTest::new(ProfileReducer)
            .with_env(env)
            .given_state(ProfileState {
                loading: true,
                ..ProfileState::default()
            })
            .when_action(ProfileAction::Loaded(profile()))
            .then_state(|state| {
                assert!(!state.loading);
                assert_eq!(state.genres[0].label(), "Pop");
                assert_eq!(state.drag_name, "Roxy Riot");
            })
            .run();
    }
}
