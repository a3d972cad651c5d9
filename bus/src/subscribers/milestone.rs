use std::cell::Cell;

use log::info;

use crate::{
    error::ReceiveError,
    event::Event,
    subscriber::{Identify, Key, Subscriber},
};

/// Counts events of a single kind and fires on every `every`-th occurrence.
///
/// Events of other kinds are ignored. Firing logs the milestone message at `info` and
/// bumps [`fired`](Milestone::fired).
///
/// ```rust
/// use rusty_bus::{Event, Key, Subscriber, subscribers::Milestone};
///
/// let quest = Milestone::new(Key::from("qt"), "enemy_defeated", 5);
/// for _ in 0..5 {
///     quest.receive(&Event::new("enemy_defeated", "1")).unwrap();
/// }
/// assert_eq!(quest.fired(), 1);
/// ```
#[derive(Debug, Identify)]
pub struct Milestone {
    #[identity]
    key: Key,
    kind: String,
    every: usize,
    message: String,
    count: Cell<usize>,
    fired: Cell<usize>,
}

impl Milestone {
    /// Create a milestone for `kind` firing every `every` events. `every` is clamped to 1.
    pub fn new(key: Key, kind: impl Into<String>, every: usize) -> Self {
        Self {
            key,
            kind: kind.into(),
            every: every.max(1),
            message: String::from("milestone reached"),
            count: Cell::new(0),
            fired: Cell::new(0),
        }
    }

    /// Set the message logged when the milestone fires.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// The event kind being counted.
    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[inline]
    pub fn every(&self) -> usize {
        self.every
    }

    /// Matching events seen so far.
    #[inline]
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Times the milestone has fired.
    #[inline]
    pub fn fired(&self) -> usize {
        self.fired.get()
    }
}

impl Subscriber for Milestone {
    fn receive(&self, event: &Event) -> Result<(), ReceiveError> {
        if !event.is(&self.kind) {
            return Ok(());
        }

        let count = self.count.get() + 1;
        self.count.set(count);
        if count % self.every == 0 {
            self.fired.set(self.fired.get() + 1);
            info!("[{}] {} ({count} x {})", self.key, self.message, self.kind);
        }
        Ok(())
    }
}
