//! Single-timer debounce state machine.
//!
//! Time is passed in by the caller so the transitions can be driven
//! deterministically in tests.

use crate::MAX_QUIET_PERIOD;
use std::time::{Duration, Instant};

/// Where the debouncer currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceState {
    /// Nothing scheduled.
    Idle,
    /// A regeneration is scheduled for `deadline`.
    Pending {
        /// When the quiet period ends.
        deadline: Instant,
        /// Most recent name that (re)armed the timer.
        trigger: String,
    },
}

/// Collapses bursts of changes into a single action.
///
/// Every observed change pushes the deadline to `now + quiet_period`. The
/// action fires once the deadline passes without another change.
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Delay after the last change before firing.
    quiet_period: Duration,
    /// Current state.
    state: DebounceState,
}

impl Debouncer {
    /// Creates an idle debouncer. Periods above [`MAX_QUIET_PERIOD`] are clamped.
    #[must_use]
    pub const fn new(quiet_period: Duration) -> Self {
        let quiet_period = if quiet_period.as_nanos() > MAX_QUIET_PERIOD.as_nanos() {
            MAX_QUIET_PERIOD
        } else {
            quiet_period
        };
        Self {
            quiet_period,
            state: DebounceState::Idle,
        }
    }

    /// Records a qualifying change, arming or resetting the timer.
    pub fn observe(&mut self, trigger: impl Into<String>, now: Instant) {
        self.state = DebounceState::Pending {
            deadline: now.checked_add(self.quiet_period).unwrap_or(now),
            trigger: trigger.into(),
        };
    }

    /// Fires if the deadline has passed, returning the last trigger and going idle.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let due = matches!(
            &self.state,
            DebounceState::Pending { deadline, .. } if now >= *deadline
        );
        if !due {
            return None;
        }

        match std::mem::replace(&mut self.state, DebounceState::Idle) {
            DebounceState::Pending { trigger, .. } => Some(trigger),
            DebounceState::Idle => None,
        }
    }

    /// How long until the pending deadline, or `None` when idle.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Pending deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        match &self.state {
            DebounceState::Pending { deadline, .. } => Some(*deadline),
            DebounceState::Idle => None,
        }
    }

    /// True while a regeneration is scheduled.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &DebounceState {
        &self.state
    }

    /// Configured quiet period.
    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
}
