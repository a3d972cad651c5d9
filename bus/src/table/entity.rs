use std::{collections::VecDeque, fmt};

/// The generation of a table slot, used to tell whether an [`Entity`] still refers to the
/// subscriber it was issued for. Starts at `FIRST` and is bumped each time the slot is freed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u32);

impl Generation {
    /// The first generation of a slot.
    pub(crate) const FIRST: Self = Self(0);

    /// A slot that reaches this generation is retired and never handed out again.
    pub(crate) const LAST: Self = Self(u32::MAX);

    /// Get the next generation from the current.
    #[inline]
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

/// A slot identifier within a [`Table`](super::Table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Handle to a subscriber owned by a [`Table`](super::Table).
///
/// An entity is a slot `id` plus the slot's `generation` at the time of spawning. Once
/// the subscriber is despawned the slot's generation moves on and the entity goes stale,
/// even if the slot is later reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    id: Id,
    generation: Generation,
}

impl Entity {
    #[inline]
    pub(crate) const fn new(id: Id, generation: Generation) -> Self {
        Self { id, generation }
    }

    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Index of this entity's slot in vector storage.
    #[inline]
    pub fn index(&self) -> usize {
        self.id.0 as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.id.0, self.generation.0)
    }
}

/// Hands out entities and recycles freed slots.
///
/// Freed ids go to a dead pool with their generation bumped, so any entity issued before
/// the free no longer matches [`is_current`](Allocator::is_current). A slot whose
/// generation reaches [`Generation::LAST`] stays out of the pool for good.
#[derive(Debug, Default)]
pub(crate) struct Allocator {
    /// Current generation per slot, indexed by id.
    generations: Vec<Generation>,

    /// Ids available for reuse, oldest first.
    dead_pool: VecDeque<Id>,
}

impl Allocator {
    /// Allocate an entity, reusing a freed slot when one is available.
    pub(crate) fn alloc(&mut self) -> Entity {
        if let Some(id) = self.dead_pool.pop_front() {
            return Entity::new(id, self.generations[id.0 as usize]);
        }

        let id = Id(self.generations.len() as u32);
        self.generations.push(Generation::FIRST);
        Entity::new(id, Generation::FIRST)
    }

    /// Free an entity's slot. Returns `false` if the entity was already stale.
    pub(crate) fn free(&mut self, entity: Entity) -> bool {
        if !self.is_current(entity) {
            return false;
        }
        let slot = &mut self.generations[entity.index()];
        *slot = slot.next();
        if *slot != Generation::LAST {
            self.dead_pool.push_back(entity.id);
        }
        true
    }

    /// Returns `true` if `entity` carries its slot's current generation.
    ///
    /// Freed-but-not-reused slots also report `false` because their generation was bumped.
    #[inline]
    pub(crate) fn is_current(&self, entity: Entity) -> bool {
        self.generations
            .get(entity.index())
            .is_some_and(|generation| *generation == entity.generation)
    }

    /// Current generation of a slot. Slots never allocated report `FIRST`.
    #[inline]
    pub(crate) fn generation_of(&self, id: Id) -> Generation {
        self.generations
            .get(id.0 as usize)
            .copied()
            .unwrap_or(Generation::FIRST)
    }

    /// Number of slots ever allocated.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.generations.len()
    }
}
