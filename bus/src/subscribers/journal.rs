use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
};

use log::info;

use crate::{
    error::ReceiveError,
    event::Event,
    subscriber::{Identify, Key, Subscriber},
};

/// Records every event it receives, whatever the kind, and logs it at `info`.
///
/// Only the most recent events are kept; older ones are dropped once the history is full.
#[derive(Debug, Identify)]
pub struct Journal {
    #[identity]
    key: Key,
    received: Cell<usize>,
    history: RefCell<VecDeque<Event>>,
    capacity: usize,
}

impl Journal {
    /// Events kept by [`Journal::new`].
    pub const DEFAULT_HISTORY: usize = 64;

    pub fn new(key: Key) -> Self {
        Self::with_history(key, Self::DEFAULT_HISTORY)
    }

    /// A journal keeping at most `capacity` recent events (at least one).
    pub fn with_history(key: Key, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            key,
            received: Cell::new(0),
            history: RefCell::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Number of events received, including those no longer in the history.
    pub fn len(&self) -> usize {
        self.received.get()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The most recent event, if any.
    pub fn last(&self) -> Option<Event> {
        self.history.borrow().back().cloned()
    }

    /// Copy of the retained events, oldest first.
    pub fn entries(&self) -> Vec<Event> {
        self.history.borrow().iter().cloned().collect()
    }
}

impl Subscriber for Journal {
    fn receive(&self, event: &Event) -> Result<(), ReceiveError> {
        info!(
            "[{}] type:{},payload:{}",
            self.key,
            event.kind(),
            event.payload()
        );
        self.received.set(self.received.get() + 1);

        let mut history = self.history.borrow_mut();
        if history.len() == self.capacity {
            history.pop_front();
        }
        history.push_back(event.clone());
        Ok(())
    }
}
