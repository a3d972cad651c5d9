//! The event bus.
//!
//! [`EventBus`] delivers [`Event`]s to a dynamic set of subscribers without owning them.
//! It keeps a registry of non-owning handles and reclaims the handles of subscribers that
//! have been dropped.
//!
//! # Reclamation
//!
//! Every [`subscribe`](EventBus::subscribe), [`unsubscribe`](EventBus::unsubscribe) and
//! [`publish`](EventBus::publish) starts with one linear pass that removes expired handles.
//! A dropped subscriber therefore lingers in the registry for at most one bus call, and
//! the bus needs no destructor hook or timer to notice it.
//!
//! # Dispatch
//!
//! `publish` takes a snapshot of the registry after reclaiming and releases the registry
//! before calling any subscriber. Subscribers may call back into the bus from `receive`:
//!
//! - registrations and removals made during a pass take effect on the next `publish`,
//! - every snapshotted handle is re-checked right before its `receive` call, so a
//!   subscriber dropped earlier in the same pass is skipped,
//! - a nested `publish` runs its own complete pass before the outer one continues.
//!
//! ```text
//! publish(event)
//!   ├─► reclaim            (drop expired handles)
//!   ├─► snapshot           (registry borrow released)
//!   └─► for handle in snapshot, in registration order
//!         ├─ expired ──► skip
//!         └─ live    ──► receive(event)
//!                          ├─ Ok            ──► delivered
//!                          └─ Err | panic   ──► failed (isolated, logged)
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use rusty_bus::{Event, EventBus, Key, Status, subscribers::Journal};
//!
//! let bus = EventBus::new();
//! let hud = Rc::new(Journal::new(Key::from("ui")));
//!
//! assert_eq!(bus.subscribe(&hud), Status::Added);
//! assert_eq!(bus.subscribe(&hud), Status::AlreadyPresent);
//!
//! bus.publish(&Event::new("enemy_defeated", "1")).unwrap();
//! assert_eq!(hud.len(), 1);
//!
//! drop(hud);
//! let delivery = bus.publish(&Event::new("enemy_defeated", "2")).unwrap();
//! assert_eq!(delivery.delivered, 0);
//! assert!(bus.is_empty());
//! ```

mod dispatch;
mod registry;

use std::{cell::RefCell, fmt, rc::Rc};

use log::{debug, info, warn};

use crate::{
    config::{BusConfig, FailurePolicy},
    error::{Failure, PublishError},
    event::Event,
    subscriber::{Handle, Key, Subscriber},
};
use registry::Registry;

/// Outcome of a [`subscribe`](EventBus::subscribe) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A new handle was appended to the registry.
    Added,
    /// A live subscriber with the same identity is already registered. Nothing changed.
    AlreadyPresent,
}

/// Counts for one dispatch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Subscribers whose `receive` returned `Ok`.
    pub delivered: usize,
    /// Snapshotted handles that expired before their turn.
    pub skipped: usize,
    /// Subscribers whose `receive` returned an error or panicked.
    pub failed: usize,
}

/// A synchronous, single-threaded publish-subscribe bus.
///
/// All methods take `&self` so the bus can be shared (typically as `Rc<EventBus>`) with
/// subscribers that need to call back into it. The bus is `!Send` and `!Sync`.
pub struct EventBus {
    config: BusConfig,
    registry: RefCell<Registry>,
}

impl EventBus {
    /// Create a bus with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    /// Create a bus with the given configuration.
    pub fn with_config(config: BusConfig) -> Self {
        Self {
            registry: RefCell::new(Registry::with_capacity(config.capacity)),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Register a subscriber without taking ownership of it.
    ///
    /// Expired handles are reclaimed first. If a live subscriber with the same identity is
    /// already registered this is a no-op returning [`Status::AlreadyPresent`]; otherwise
    /// the subscriber is appended after every existing registration.
    pub fn subscribe<S: Subscriber + 'static>(&self, subscriber: &Rc<S>) -> Status {
        self.attach(Handle::new(subscriber))
    }

    /// [`subscribe`](Self::subscribe) for an already type-erased subscriber.
    pub fn subscribe_dyn(&self, subscriber: &Rc<dyn Subscriber>) -> Status {
        self.attach(Handle::from_dyn(subscriber))
    }

    fn attach(&self, handle: Handle) -> Status {
        let mut registry = self.registry.borrow_mut();
        Self::reclaim_in(&mut registry);

        if registry.contains(handle.key().as_str()) {
            info!("subscriber `{}` already registered", handle.key());
            return Status::AlreadyPresent;
        }

        debug!("subscribed `{}`", handle.key());
        registry.push(handle);
        Status::Added
    }

    /// Remove the subscriber registered under `key`, along with any expired handles.
    ///
    /// Returns `true` if an entry for `key` was removed. A key that matches nothing is not
    /// an error.
    pub fn unsubscribe<K: AsRef<str> + ?Sized>(&self, key: &K) -> bool {
        let key = key.as_ref();
        let mut registry = self.registry.borrow_mut();
        let before = registry.len();
        let matched = registry.remove(key);

        if matched {
            debug!("unsubscribed `{key}`");
        }
        let dropped = before - registry.len() - usize::from(matched);
        if dropped > 0 {
            debug!("reclaimed {dropped} expired subscriber(s)");
        }
        matched
    }

    /// Publish an event to every live subscriber, in registration order.
    ///
    /// Failures are isolated per subscriber: every live subscriber in the pass is called
    /// regardless of earlier failures. Under [`FailurePolicy::LogAndContinue`] this always
    /// returns `Ok`; under [`FailurePolicy::Propagate`] the collected failures are
    /// returned once the pass completes.
    pub fn publish(&self, event: &Event) -> Result<Delivery, PublishError> {
        let snapshot = {
            let mut registry = self.registry.borrow_mut();
            Self::reclaim_in(&mut registry);
            registry.snapshot()
        };

        let mut delivery = Delivery::default();
        let mut failures = Vec::new();
        for handle in &snapshot {
            // Dropped by an earlier receive in this pass.
            let Some(subscriber) = handle.upgrade() else {
                delivery.skipped += 1;
                continue;
            };

            match dispatch::deliver(subscriber.as_ref(), event) {
                Ok(()) => delivery.delivered += 1,
                Err(reason) => {
                    let failure = Failure {
                        key: handle.key().clone(),
                        reason,
                    };
                    warn!("{failure} on `{}`", event.kind());
                    delivery.failed += 1;
                    failures.push(failure);
                }
            }
        }

        match self.config.failure_policy {
            FailurePolicy::Propagate if !failures.is_empty() => Err(PublishError::Subscribers {
                kind: event.kind().to_owned(),
                failures,
            }),
            _ => Ok(delivery),
        }
    }

    /// Run a reclamation pass outside of any other operation.
    ///
    /// Returns the number of expired handles removed.
    pub fn reclaim(&self) -> usize {
        Self::reclaim_in(&mut self.registry.borrow_mut())
    }

    fn reclaim_in(registry: &mut Registry) -> usize {
        let removed = registry.reclaim();
        if removed > 0 {
            debug!("reclaimed {removed} expired subscriber(s)");
        }
        removed
    }

    /// Returns `true` if a live subscriber is registered under `key`.
    pub fn contains<K: AsRef<str> + ?Sized>(&self, key: &K) -> bool {
        self.registry.borrow().contains(key.as_ref())
    }

    /// Keys of the live subscribers, in registration order.
    pub fn keys(&self) -> Vec<Key> {
        self.registry.borrow().keys()
    }

    /// Number of registry entries, including expired entries not yet reclaimed.
    pub fn len(&self) -> usize {
        self.registry.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every registration. Subscribers themselves are unaffected.
    pub fn clear(&self) {
        self.registry.borrow_mut().clear();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("config", &self.config)
            .field("registry", &self.registry.borrow())
            .finish()
    }
}
