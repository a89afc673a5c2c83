//! # StageLink Testing
//!
//! Testing utilities and helpers for the StageLink client architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A fluent Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use stagelink_testing::{ReducerTest, test_clock};
//!
//! ReducerTest::new(EventsReducer)
//!     .with_env(test_environment())
//!     .given_state(EventsState::default())
//!     .when_action(EventsAction::PageSelected(2))
//!     .then_state(|state| assert_eq!(state.page, 2))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use stagelink_core::environment::Clock;

pub mod reducer_test;

/// Mock implementations for testing
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible. The
    /// future/past event partition depends on "today", so tests pin it.
    ///
    /// # Example
    ///
    /// ```
    /// use stagelink_testing::mocks::FixedClock;
    /// use stagelink_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-06-15 12:00:00 UTC)
    ///
    /// A mid-month, midday instant so tests can place events on either
    /// side of "today" without straddling month boundaries.
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-06-15T12:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
