//! Session feature: login and logout
//!
//! Login exchanges credentials for a bearer token and stores it; logout is
//! purely client-side and tears down everything the session accumulated:
//! the cached queries and the stored credentials, synchronously, before
//! anything else can run.

use crate::environment::AppEnvironment;
use crate::notice::Notice;
use stagelink_api::types::UserId;
use stagelink_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// State of the session
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    /// Whether a user is logged in
    pub authenticated: bool,
    /// The logged-in performer's id
    pub performer_id: Option<UserId>,
    /// Whether a login is in flight
    pub logging_in: bool,
    /// Latest user-facing notice
    pub notice: Option<Notice>,
}

/// Everything that can happen to the session
#[derive(Clone, Debug)]
pub enum SessionAction {
    /// The user submitted the login form
    LoginSubmitted {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },
    /// The server issued a token
    LoginSucceeded {
        /// The bearer token
        token: String,
        /// The authenticated performer
        performer_id: UserId,
    },
    /// The server rejected the credentials
    LoginFailed(Notice),
    /// The user logged out
    LoggedOut,
    /// Dismiss the current notice
    NoticeCleared,
}

/// Reducer for the session
#[derive(Clone)]
pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Action = SessionAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut SessionState,
        action: SessionAction,
        env: &AppEnvironment,
    ) -> SmallVec<[Effect<SessionAction>; 4]> {
        match action {
            SessionAction::LoginSubmitted { email, password } => {
                state.logging_in = true;
                let gateway = env.gateway.clone();
                smallvec![Effect::future(async move {
                    Some(match gateway.login(email, password).await {
                        Ok(response) => SessionAction::LoginSucceeded {
                            token: response.token,
                            performer_id: response.user_id,
                        },
                        Err(error) => {
                            tracing::warn!(%error, "login failed");
                            SessionAction::LoginFailed(Notice::error(
                                "Could not log in. Check your email and password.",
                            ))
                        },
                    })
                })]
            },
            SessionAction::LoginSucceeded {
                token,
                performer_id,
            } => {
                state.logging_in = false;
                state.authenticated = true;
                state.performer_id = Some(performer_id.clone());
                env.session.set_credentials(token, performer_id);
                SmallVec::new()
            },
            SessionAction::LoginFailed(notice) => {
                state.logging_in = false;
                state.notice = Some(notice);
                SmallVec::new()
            },
            SessionAction::LoggedOut => {
                // Synchronous teardown: no cached data or token may survive
                // into the next session
                env.cache.reset();
                env.session.clear();
                *state = SessionState::default();
                SmallVec::new()
            },
            SessionAction::NoticeCleared => {
                state.notice = None;
                SmallVec::new()
            },
        }
    }
}
