//! Owner-side storage for subscribers.
//!
//! The bus never owns subscribers. Something else has to, and in a game that is usually a
//! table of live objects. [`Table`] is that owner: it holds the strong reference to each
//! subscriber and hands back a generational [`Entity`]. Despawning an entity drops the
//! table's reference, and once nothing else holds the subscriber its bus registration
//! expires and is reclaimed on the next bus call.
//!
//! ```rust
//! use std::rc::Rc;
//! use rusty_bus::{Event, EventBus, Key, Table, subscribers::Journal};
//!
//! let bus = EventBus::new();
//! let mut table = Table::new();
//!
//! let hud = Rc::new(Journal::new(Key::from("ui")));
//! bus.subscribe(&hud);
//! let entity = table.spawn(hud);
//!
//! assert!(table.despawn(entity));
//! assert!(!table.despawn(entity));
//!
//! let delivery = bus.publish(&Event::new("enemy_defeated", "1")).unwrap();
//! assert_eq!(delivery.delivered, 0);
//! ```

mod entity;

use std::rc::Rc;

use fixedbitset::FixedBitSet;
use log::debug;

pub use entity::{Entity, Generation, Id};

use crate::subscriber::{Identify, Subscriber};
use entity::Allocator;

/// Owns subscribers and addresses them by generational [`Entity`].
#[derive(Default)]
pub struct Table {
    allocator: Allocator,
    /// Subscriber per slot, indexed by entity id.
    slots: Vec<Option<Rc<dyn Subscriber>>>,
    /// Occupied slots.
    alive: FixedBitSet,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a subscriber.
    pub fn spawn<S: Subscriber + 'static>(&mut self, subscriber: Rc<S>) -> Entity {
        self.spawn_dyn(subscriber)
    }

    /// Take ownership of a type-erased subscriber.
    pub fn spawn_dyn(&mut self, subscriber: Rc<dyn Subscriber>) -> Entity {
        let entity = self.allocator.alloc();
        let index = entity.index();

        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
            self.alive.grow(index + 1);
        }
        debug!("spawned `{}` as {entity}", subscriber.identity());
        self.slots[index] = Some(subscriber);
        self.alive.insert(index);
        entity
    }

    /// Release the table's reference to a subscriber.
    ///
    /// Returns `false` for a stale entity; a stale entity never touches the slot's current
    /// occupant.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.allocator.free(entity) {
            return false;
        }
        let index = entity.index();
        self.alive.set(index, false);
        if let Some(subscriber) = self.slots[index].take() {
            debug!("despawned `{}` ({entity})", subscriber.identity());
        }
        true
    }

    /// Returns `true` if `entity` refers to a subscriber still owned by this table.
    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_current(entity)
    }

    /// Get a shared reference to the subscriber behind `entity`.
    pub fn get(&self, entity: Entity) -> Option<Rc<dyn Subscriber>> {
        if !self.is_alive(entity) {
            return None;
        }
        self.slots.get(entity.index())?.clone()
    }

    /// Find the first live subscriber with identity `key`, in slot order.
    pub fn find(&self, key: &str) -> Option<Entity> {
        self.iter()
            .find(|(_, subscriber)| subscriber.identity() == key)
            .map(|(entity, _)| entity)
    }

    /// Iterate live subscribers in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &Rc<dyn Subscriber>)> {
        self.alive.ones().filter_map(move |index| {
            let subscriber = self.slots[index].as_ref()?;
            let entity = self.entity_at(index);
            Some((entity, subscriber))
        })
    }

    /// Number of live subscribers.
    #[inline]
    pub fn len(&self) -> usize {
        self.alive.count_ones(..)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Despawn everything.
    pub fn clear(&mut self) {
        let entities: Vec<_> = self.iter().map(|(entity, _)| entity).collect();
        for entity in entities {
            self.despawn(entity);
        }
    }

    fn entity_at(&self, index: usize) -> Entity {
        let id = Id::from(index as u32);
        Entity::new(id, self.allocator.generation_of(id))
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.iter()
                    .map(|(entity, subscriber)| (entity, subscriber.identity().clone())),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{
        error::ReceiveError,
        event::Event,
        subscriber::Key,
    };

    #[derive(Identify)]
    struct Tally {
        #[identity]
        key: Key,
        seen: Cell<u32>,
    }

    impl Subscriber for Tally {
        fn receive(&self, _event: &Event) -> Result<(), ReceiveError> {
            self.seen.set(self.seen.get() + 1);
            Ok(())
        }
    }

    fn tally(key: &str) -> Rc<Tally> {
        Rc::new(Tally {
            key: Key::from(key),
            seen: Cell::new(0),
        })
    }

    // ==================== Spawn / Despawn ====================

    #[test]
    fn spawn_takes_ownership() {
        // Given
        let mut table = Table::new();
        let subscriber = tally("a");
        let weak = Rc::downgrade(&subscriber);

        // When
        let entity = table.spawn(subscriber);

        // Then
        assert!(table.is_alive(entity));
        assert_eq!(table.len(), 1);
        assert_eq!(weak.strong_count(), 1);

        // When
        assert!(table.despawn(entity));

        // Then - Table held the last reference
        assert_eq!(weak.strong_count(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn stale_entity_cannot_despawn_reused_slot() {
        // Given
        let mut table = Table::new();
        let first = table.spawn(tally("first"));
        table.despawn(first);
        let second = table.spawn(tally("second"));

        // Then - Slot reused under a new generation
        assert_eq!(first.id(), second.id());
        assert_ne!(first.generation(), second.generation());

        // When
        let removed = table.despawn(first);

        // Then
        assert!(!removed);
        assert!(table.is_alive(second));
        assert!(table.get(first).is_none());
        assert_eq!(
            table.get(second).map(|s| s.identity().clone()),
            Some(Key::from("second"))
        );
    }

    // ==================== Lookup ====================

    #[test]
    fn find_by_identity() {
        let mut table = Table::new();
        table.spawn(tally("qt"));
        let ui = table.spawn(tally("ui"));

        assert_eq!(table.find("ui"), Some(ui));
        assert_eq!(table.find("missing"), None);
    }

    #[test]
    fn iter_skips_despawned() {
        // Given
        let mut table = Table::new();
        let a = table.spawn(tally("a"));
        let b = table.spawn(tally("b"));
        let c = table.spawn(tally("c"));

        // When
        table.despawn(b);

        // Then
        let entities: Vec<_> = table.iter().map(|(entity, _)| entity).collect();
        assert_eq!(entities, vec![a, c]);
    }

    #[test]
    fn clear_despawns_everything() {
        let mut table = Table::new();
        let a = table.spawn(tally("a"));
        table.spawn(tally("b"));

        table.clear();

        assert!(table.is_empty());
        assert!(!table.is_alive(a));
    }
}
