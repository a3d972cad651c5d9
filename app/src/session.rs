use std::rc::Rc;

use rusty_bus::{
    BusConfig, Event, EventBus, Identify, Key, PublishError, Status, Subscriber, Table,
    subscribers::{Journal, Milestone},
};
use thiserror::Error;

use crate::command::{Command, HELP, Preset};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no spawned subscriber `{0}`")]
    UnknownSubscriber(String),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// What the REPL should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue(Vec<String>),
    Exit,
}

/// A bus plus the table that owns the subscribers spawned from the prompt.
pub struct Session {
    bus: Rc<EventBus>,
    table: Table,
}

impl Session {
    pub fn new(config: BusConfig) -> Self {
        Self {
            bus: Rc::new(EventBus::with_config(config)),
            table: Table::new(),
        }
    }

    #[inline]
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    #[inline]
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, SessionError> {
        let lines = match command {
            Command::Spawn {
                preset,
                key,
                kind,
                every,
            } => {
                let subscriber = build(preset, Key::from(key.as_str()), kind, every);
                let entity = self.table.spawn_dyn(subscriber);
                vec![format!("spawned `{key}` as {entity}")]
            }
            Command::Despawn { key } => {
                let entity = self
                    .table
                    .find(&key)
                    .ok_or_else(|| SessionError::UnknownSubscriber(key.clone()))?;
                self.table.despawn(entity);
                vec![format!("despawned `{key}`")]
            }
            Command::Subscribe { key } => {
                let subscriber = self
                    .table
                    .find(&key)
                    .and_then(|entity| self.table.get(entity))
                    .ok_or_else(|| SessionError::UnknownSubscriber(key.clone()))?;
                match self.bus.subscribe_dyn(&subscriber) {
                    Status::Added => vec![format!("subscribed `{key}`")],
                    Status::AlreadyPresent => vec![format!("`{key}` already subscribed")],
                }
            }
            Command::Unsubscribe { key } => {
                if self.bus.unsubscribe(&key) {
                    vec![format!("unsubscribed `{key}`")]
                } else {
                    vec![format!("`{key}` was not subscribed")]
                }
            }
            Command::Publish { kind, payload } => {
                let delivery = self.bus.publish(&Event::new(kind, payload))?;
                vec![format!(
                    "delivered {}, skipped {}, failed {}",
                    delivery.delivered, delivery.skipped, delivery.failed
                )]
            }
            Command::List => self.list(),
            Command::Scenario => self.scenario()?,
            Command::Help => HELP.lines().map(str::to_owned).collect(),
            Command::Exit => return Ok(Outcome::Exit),
        };
        Ok(Outcome::Continue(lines))
    }

    fn list(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!("table ({}):", self.table.len()));
        for (entity, subscriber) in self.table.iter() {
            let state = if self.bus.contains(subscriber.identity()) {
                "subscribed"
            } else {
                "idle"
            };
            lines.push(format!("  {entity} `{}` {state}", subscriber.identity()));
        }
        let keys: Vec<_> = self.bus.keys().iter().map(Key::to_string).collect();
        lines.push(format!("bus ({}): [{}]", self.bus.len(), keys.join(", ")));
        lines
    }

    /// Spawn `qt`, `as` and `ui`, subscribe them (and `qt` a second time), then publish
    /// five `enemy_defeated`, three `rare_items_collected` and one unrecognized event.
    fn scenario(&mut self) -> Result<Vec<String>, SessionError> {
        let mut lines = Vec::new();
        for (preset, key) in [
            (Preset::Quest, "qt"),
            (Preset::Achievement, "as"),
            (Preset::Hud, "ui"),
            (Preset::Quest, "qt"),
        ] {
            let entity = match self.table.find(key) {
                Some(entity) => entity,
                None => self
                    .table
                    .spawn_dyn(build(preset, Key::from(key), None, None)),
            };
            if let Some(subscriber) = self.table.get(entity) {
                let status = self.bus.subscribe_dyn(&subscriber);
                lines.push(format!("subscribe `{key}`: {status:?}"));
            }
        }

        let events = std::iter::repeat_n(Event::new("enemy_defeated", "1"), 5)
            .chain(std::iter::repeat_n(Event::new("rare_items_collected", "2"), 3))
            .chain(std::iter::once(Event::new("random event", "3")));
        for event in events {
            self.bus.publish(&event)?;
        }
        lines.push(format!("bus holds {} subscriber(s)", self.bus.len()));
        Ok(lines)
    }
}

fn build(
    preset: Preset,
    key: Key,
    kind: Option<String>,
    every: Option<usize>,
) -> Rc<dyn Subscriber> {
    match preset {
        Preset::Quest => Rc::new(
            Milestone::new(
                key,
                kind.unwrap_or_else(|| "enemy_defeated".into()),
                every.unwrap_or(5),
            )
            .with_message("task finished!"),
        ),
        Preset::Achievement => Rc::new(
            Milestone::new(
                key,
                kind.unwrap_or_else(|| "rare_items_collected".into()),
                every.unwrap_or(3),
            )
            .with_message("nice collected!"),
        ),
        Preset::Hud => Rc::new(Journal::new(key)),
    }
}
