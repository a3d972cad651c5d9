//! # rusty_bus
//!
//! A synchronous, in-process publish-subscribe event bus that never owns its subscribers.
//!
//! ## Overview
//! ```text
//!   owner (Table, struct field, local)          EventBus
//!   ┌──────────────────────────┐       ┌───────────────────────────┐
//!   │ Rc<QuestTracker>   ──────┼─weak──┼─► Handle { key: "qt" }    │
//!   │ Rc<Achievements>   ──────┼─weak──┼─► Handle { key: "as" }    │
//!   │ Rc<Hud>            ──────┼─weak──┼─► Handle { key: "ui" }    │
//!   └──────────────────────────┘       └─────────────┬─────────────┘
//!                                                    │ publish(event)
//!                                                    ▼
//!                                   reclaim ─► snapshot ─► receive × N
//! ```
//!
//! - [`Event`]: immutable `kind` + `payload`.
//! - [`Subscriber`] / [`Identify`]: the capability the bus dispatches to, plus a stable
//!   [`Key`] used for de-duplication and removal.
//! - [`EventBus`]: `subscribe`, `unsubscribe`, `publish`, with lazy reclamation of
//!   subscribers whose owners dropped them.
//! - [`Table`]: an owner for subscribers addressed by generational [`Entity`] handles.
//! - [`global`]: an explicitly initialized per-thread bus.
//!
//! ## Guarantees
//! - At most one live registration per identity key.
//! - A dropped subscriber is never called, and its registration is removed by the next
//!   `subscribe`, `unsubscribe` or `publish`.
//! - Subscribers are called in registration order.
//! - A subscriber may call back into the bus from `receive`; changes to the registry take
//!   effect on the next `publish`.
//! - A failing or panicking subscriber does not stop delivery to the others.

// Lets derive output name `::rusty_bus` from inside this crate.
extern crate self as rusty_bus;

pub mod bus;
pub mod config;
pub mod error;
pub mod event;
pub mod global;
pub mod logging;
pub mod subscriber;
pub mod subscribers;
pub mod table;

pub use bus::{Delivery, EventBus, Status};
pub use config::{BusConfig, FailurePolicy};
pub use error::{Failure, FailureReason, GlobalError, PublishError, ReceiveError};
pub use event::Event;
pub use subscriber::{Identify, Key, Shared, Subscriber, shared};
pub use table::{Entity, Table};
