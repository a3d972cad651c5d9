//! The subscriber capability.
//!
//! Anything that can receive an [`Event`] from the bus implements [`Subscriber`]. A
//! subscriber is identified by a stable [`Key`] (see [`Identify`]) which the bus uses to
//! reject duplicate registrations and to target removals.
//!
//! # Ownership
//!
//! Subscribers are shared as `Rc<S>` ([`Shared`]). Whoever holds the strong reference owns
//! the subscriber; the bus only keeps a non-owning [`Handle`]. Dropping the last strong
//! reference destroys the subscriber, and the bus stops dispatching to it.
//!
//! # Interior mutability
//!
//! [`Subscriber::receive`] takes `&self`. The bus may be re-entered from inside a `receive`
//! call (a subscriber unsubscribing itself, or publishing a follow-up event), so subscribers
//! keep their mutable state in `Cell`/`RefCell` rather than requiring exclusive access.
//!
//! ```rust
//! use std::cell::Cell;
//! use rusty_bus::{Event, Identify, Key, ReceiveError, Subscriber};
//!
//! #[derive(Identify)]
//! struct Counter {
//!     #[identity]
//!     key: Key,
//!     seen: Cell<usize>,
//! }
//!
//! impl Subscriber for Counter {
//!     fn receive(&self, _event: &Event) -> Result<(), ReceiveError> {
//!         self.seen.set(self.seen.get() + 1);
//!         Ok(())
//!     }
//! }
//! ```

mod handle;
mod key;

use std::rc::Rc;

pub(crate) use handle::Handle;
pub use key::Key;

use crate::{error::ReceiveError, event::Event};

/// Derive macro for [`Identify`]. Mark the identity field with `#[identity]`.
pub use rusty_bus_macros::Identify;

/// A subscriber shared between its owner and anything that needs to reach it.
pub type Shared<S> = Rc<S>;

/// Wrap a subscriber for sharing.
#[inline]
pub fn shared<S: Subscriber>(subscriber: S) -> Shared<S> {
    Rc::new(subscriber)
}

/// Types with a stable identity key.
///
/// The key must not change for the lifetime of the value. Two values with equal keys are
/// treated as the same logical subscriber by the bus.
pub trait Identify {
    /// The identity key of this value.
    fn identity(&self) -> &Key;
}

/// Receives events dispatched by an [`EventBus`](crate::EventBus).
pub trait Subscriber: Identify {
    /// Handle one event.
    ///
    /// Called synchronously on the publisher's thread. Returning an error (or panicking)
    /// is isolated to this subscriber; the rest of the dispatch pass still runs.
    fn receive(&self, event: &Event) -> Result<(), ReceiveError>;
}

impl<T: Identify + ?Sized> Identify for Rc<T> {
    fn identity(&self) -> &Key {
        (**self).identity()
    }
}

impl<T: Identify + ?Sized> Identify for Box<T> {
    fn identity(&self) -> &Key {
        (**self).identity()
    }
}

impl<T: Subscriber + ?Sized> Subscriber for Box<T> {
    fn receive(&self, event: &Event) -> Result<(), ReceiveError> {
        (**self).receive(event)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[derive(Identify)]
    struct Probe {
        #[identity]
        key: Key,
        hits: Cell<u32>,
    }

    impl Subscriber for Probe {
        fn receive(&self, _event: &Event) -> Result<(), ReceiveError> {
            self.hits.set(self.hits.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn derived_identity_returns_marked_field() {
        let probe = Probe {
            key: Key::from("probe"),
            hits: Cell::new(0),
        };

        assert_eq!(probe.identity(), &Key::from("probe"));
    }

    #[test]
    fn boxed_subscriber_forwards() {
        // Given
        let boxed: Box<dyn Subscriber> = Box::new(Probe {
            key: Key::from("boxed"),
            hits: Cell::new(0),
        });

        // When
        boxed.receive(&Event::new("any", "")).unwrap();

        // Then
        assert_eq!(boxed.identity().as_str(), "boxed");
    }

    #[test]
    fn shared_identity_forwards() {
        let probe = shared(Probe {
            key: Key::from("rc"),
            hits: Cell::new(0),
        });

        assert_eq!(Identify::identity(&probe).as_str(), "rc");
    }
}
