//! The value type carried by the bus.
//!
//! An [`Event`] is a `kind` tag plus a `payload`. Both are opaque strings as far as the
//! bus is concerned; subscribers look at the kind to decide whether an event is relevant
//! to them.
//!
//! ```rust
//! use rusty_bus::Event;
//!
//! let event = Event::new("enemy_defeated", "goblin");
//! assert_eq!(event.kind(), "enemy_defeated");
//! assert_eq!(event.payload(), "goblin");
//! ```

use std::fmt;

/// An immutable event published through an [`EventBus`](crate::EventBus).
///
/// Events have no identity. Equality is structural and exists for tests and
/// diagnostics; the bus never compares events.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    kind: String,
    payload: String,
}

impl Event {
    /// Construct a new event from a kind tag and a payload.
    #[inline]
    pub fn new(kind: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: payload.into(),
        }
    }

    /// Get the kind tag of this event.
    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Get the payload of this event.
    #[inline]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Returns `true` if this event has the given kind.
    #[inline]
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.payload)
    }
}
