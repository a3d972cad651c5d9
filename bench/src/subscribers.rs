//! Subscriber types used across benchmarks.

use std::{cell::Cell, rc::Rc};

use rusty_bus::{Event, Identify, Key, ReceiveError, Subscriber};

/// Cheapest possible subscriber: bumps a counter.
#[derive(Identify)]
pub struct Counter {
    #[identity]
    key: Key,
    hits: Cell<u64>,
}

impl Counter {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Key::new(key),
            hits: Cell::new(0),
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits.get()
    }
}

impl Subscriber for Counter {
    fn receive(&self, _event: &Event) -> Result<(), ReceiveError> {
        self.hits.set(self.hits.get() + 1);
        Ok(())
    }
}

/// `count` counters keyed `s0..s{count}`.
pub fn counters(count: usize) -> Vec<Rc<Counter>> {
    (0..count)
        .map(|i| Rc::new(Counter::new(format!("s{i}"))))
        .collect()
}
