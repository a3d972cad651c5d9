use std::rc::{Rc, Weak};

use super::{Identify, Key, Subscriber};

/// The bus's record of a registered subscriber.
///
/// Holds a non-owning reference to the subscriber plus its identity key, cached at
/// registration so the key stays readable after the subscriber is gone. A handle whose
/// subscriber has been dropped is *expired*; it can never become live again.
#[derive(Clone)]
pub(crate) struct Handle {
    target: Weak<dyn Subscriber>,
    key: Key,
}

impl Handle {
    /// Create a handle for a subscriber without extending its lifetime.
    pub(crate) fn new<S: Subscriber + 'static>(subscriber: &Rc<S>) -> Self {
        let target: Weak<S> = Rc::downgrade(subscriber);
        let target: Weak<dyn Subscriber> = target;
        Self {
            key: subscriber.identity().clone(),
            target,
        }
    }

    /// Create a handle from an already type-erased subscriber.
    pub(crate) fn from_dyn(subscriber: &Rc<dyn Subscriber>) -> Self {
        Self {
            key: subscriber.identity().clone(),
            target: Rc::downgrade(subscriber),
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &Key {
        &self.key
    }

    /// Returns `true` once the subscriber has been dropped.
    #[inline]
    pub(crate) fn is_expired(&self) -> bool {
        self.target.strong_count() == 0
    }

    /// Resolve the handle. The returned `Rc` keeps the subscriber alive while it is held.
    #[inline]
    pub(crate) fn upgrade(&self) -> Option<Rc<dyn Subscriber>> {
        self.target.upgrade()
    }

    /// Returns `true` if this handle is live and carries `key`.
    #[inline]
    pub(crate) fn is_live_for(&self, key: &str) -> bool {
        !self.is_expired() && self.key == *key
    }
}

impl std::fmt::Debug for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("key", &self.key)
            .field("expired", &self.is_expired())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ReceiveError, event::Event};

    struct Quiet(Key);

    impl Identify for Quiet {
        fn identity(&self) -> &Key {
            &self.0
        }
    }

    impl Subscriber for Quiet {
        fn receive(&self, _event: &Event) -> Result<(), ReceiveError> {
            Ok(())
        }
    }

    #[test]
    fn handle_does_not_own_subscriber() {
        // Given
        let subscriber = Rc::new(Quiet(Key::from("quiet")));
        let handle = Handle::new(&subscriber);

        // Then
        assert_eq!(Rc::strong_count(&subscriber), 1);
        assert!(!handle.is_expired());
        assert!(handle.upgrade().is_some());

        // When
        drop(subscriber);

        // Then
        assert!(handle.is_expired());
        assert!(handle.upgrade().is_none());
        assert_eq!(handle.key(), &Key::from("quiet"));
    }

    #[test]
    fn live_match_requires_liveness_and_key() {
        let subscriber = Rc::new(Quiet(Key::from("quiet")));
        let handle = Handle::new(&subscriber);

        assert!(handle.is_live_for("quiet"));
        assert!(!handle.is_live_for("loud"));

        drop(subscriber);
        assert!(!handle.is_live_for("quiet"));
    }

    #[test]
    fn typed_handle_erases_concrete_subscriber() {
        // Given
        let subscriber: Rc<Quiet> = Rc::new(Quiet(Key::from("typed")));

        // When
        let handle = Handle::new(&subscriber);

        // Then - Upgrades to the same allocation behind a trait object
        let erased = handle.upgrade().unwrap();
        assert_eq!(erased.identity(), &Key::from("typed"));
        assert!(std::ptr::addr_eq(Rc::as_ptr(&erased), Rc::as_ptr(&subscriber)));
    }

    #[test]
    fn from_dyn_matches_typed_handle() {
        let subscriber: Rc<dyn Subscriber> = Rc::new(Quiet(Key::from("erased")));
        let handle = Handle::from_dyn(&subscriber);

        assert!(handle.is_live_for("erased"));
    }
}
