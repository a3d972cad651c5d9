//! Game-like churn workload.
//!
//! Owners spawn and despawn subscribers through a [`Table`] between publishes, so the bus
//! keeps reclaiming expired handles while dispatching. Seeded so every run sees the same
//! sequence.

use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rusty_bus::{Entity, Event, EventBus, Table};

use crate::subscribers::Counter;

/// Churn workload parameters.
#[derive(Debug, Clone, Copy)]
pub struct ChurnConfig {
    /// Subscribers alive at steady state.
    pub population: usize,
    /// Chance per frame that each live subscriber is despawned and replaced.
    pub turnover: f64,
    /// Events published per frame.
    pub events_per_frame: usize,
    pub seed: u64,
}

impl Default for ChurnConfig {
    fn default() -> Self {
        Self {
            population: 1_000,
            turnover: 0.05,
            events_per_frame: 4,
            seed: 7,
        }
    }
}

pub struct ChurnScenario {
    config: ChurnConfig,
    rng: ChaCha8Rng,
    bus: EventBus,
    table: Table,
    live: Vec<Entity>,
    next_key: usize,
}

impl ChurnScenario {
    pub fn new(config: ChurnConfig) -> Self {
        let mut scenario = Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            bus: EventBus::new(),
            table: Table::new(),
            live: Vec::with_capacity(config.population),
            next_key: 0,
            config,
        };
        for _ in 0..config.population {
            scenario.spawn();
        }
        scenario
    }

    fn spawn(&mut self) {
        let subscriber = Rc::new(Counter::new(format!("c{}", self.next_key)));
        self.next_key += 1;
        self.bus.subscribe(&subscriber);
        self.live.push(self.table.spawn(subscriber));
    }

    /// Despawn and replace a random share of subscribers, then publish.
    pub fn frame(&mut self) -> usize {
        let mut replaced = 0;
        let mut i = 0;
        while i < self.live.len() {
            if self.rng.gen_bool(self.config.turnover) {
                let entity = self.live.swap_remove(i);
                self.table.despawn(entity);
                replaced += 1;
            } else {
                i += 1;
            }
        }
        for _ in 0..replaced {
            self.spawn();
        }

        let mut delivered = 0;
        for n in 0..self.config.events_per_frame {
            let event = Event::new("tick", n.to_string());
            if let Ok(delivery) = self.bus.publish(&event) {
                delivered += delivery.delivered;
            }
        }
        delivered
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }
}
