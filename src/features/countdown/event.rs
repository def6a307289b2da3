//! Events emitted by the countdown.

use serde::{Deserialize, Serialize};

use super::Phase;
use crate::features::alert::AlertPattern;

/// Something observable happened during an operation.
///
/// Events are queued while the timer mutates its state and are only handed
/// out once the operation has finished, so a listener always sees the state
/// the event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    /// A phase just started.
    PhaseChanged {
        /// The new phase.
        phase: Phase,
        /// Cycle or session the new phase belongs to.
        cycle: u32,
        /// Configured length of the new phase.
        duration_ms: i64,
        /// Wall-clock start of the new phase.
        at_ms: i64,
    },
    /// The run reached its stop condition.
    Completed {
        /// Wall-clock time the run stopped.
        at_ms: i64,
    },
    /// A phase or countdown ended; play an alert.
    Alert {
        /// Pulse layout for the notifier.
        pattern: AlertPattern,
        /// Wall-clock time the alert was raised.
        at_ms: i64,
    },
}

impl TimerEvent {
    /// Wall-clock time attached to the event.
    #[must_use]
    pub const fn at_ms(&self) -> i64 {
        match self {
            Self::PhaseChanged { at_ms, .. }
            | Self::Completed { at_ms }
            | Self::Alert { at_ms, .. } => *at_ms,
        }
    }

    /// Whether this is a [`TimerEvent::Completed`].
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}
