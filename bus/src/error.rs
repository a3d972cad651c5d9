//! Error types for the bus and its subscribers.
//!
//! - [`ReceiveError`] is returned by a subscriber that could not handle an event.
//! - [`Failure`] records one failed `receive` call during a dispatch pass.
//! - [`PublishError`] is returned by [`EventBus::publish`](crate::EventBus::publish) when the
//!   bus is configured to propagate subscriber failures.
//! - [`GlobalError`] covers misuse of the thread-scoped bus in [`global`](crate::global).
//!
//! Duplicate registration and stale subscribers are not errors and have no variant here.

use thiserror::Error;

use crate::subscriber::Key;

/// A failure signalled by a subscriber from its `receive` call.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReceiveError {
    /// The subscriber rejected the event.
    #[error("rejected: {0}")]
    Rejected(String),
}

impl ReceiveError {
    /// Shorthand for [`ReceiveError::Rejected`].
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }
}

/// Why a single `receive` call failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The subscriber returned an error.
    #[error(transparent)]
    Error(#[from] ReceiveError),

    /// The subscriber panicked. Holds the panic message when it was a string.
    #[error("panicked: {0}")]
    Panicked(String),
}

/// A failed `receive` call, tagged with the identity of the subscriber that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("subscriber `{key}` {reason}")]
pub struct Failure {
    /// Identity of the failing subscriber.
    pub key: Key,
    /// What went wrong.
    pub reason: FailureReason,
}

/// Errors returned by [`EventBus::publish`](crate::EventBus::publish).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// One or more subscribers failed. Dispatch still reached every live subscriber.
    #[error("{} subscriber(s) failed on `{kind}`", .failures.len())]
    Subscribers {
        /// Kind of the event that was being published.
        kind: String,
        /// Failures in dispatch order.
        failures: Vec<Failure>,
    },
}

impl PublishError {
    /// Returns the failures carried by this error.
    pub fn failures(&self) -> &[Failure] {
        match self {
            PublishError::Subscribers { failures, .. } => failures,
        }
    }
}

/// Errors produced by the thread-scoped bus.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalError {
    /// `init` was called while a bus was already installed.
    #[error("global bus already initialized")]
    AlreadyInitialized,

    /// The bus was used before `init` or after `teardown`.
    #[error("global bus not initialized")]
    Uninitialized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_names_subscriber() {
        let failure = Failure {
            key: Key::from("qt"),
            reason: FailureReason::from(ReceiveError::rejected("bad payload")),
        };

        assert_eq!(failure.to_string(), "subscriber `qt` rejected: bad payload");
    }

    #[test]
    fn publish_error_counts_failures() {
        let err = PublishError::Subscribers {
            kind: "enemy_defeated".into(),
            failures: vec![Failure {
                key: Key::from("ui"),
                reason: FailureReason::Panicked("boom".into()),
            }],
        };

        assert_eq!(err.failures().len(), 1);
        assert_eq!(err.to_string(), "1 subscriber(s) failed on `enemy_defeated`");
    }
}
