//! A thread-scoped bus for programs that want one bus without passing it around.
//!
//! The bus is installed explicitly with [`init`] and removed with [`teardown`]. There is
//! no construction on first use: [`get`] before `init` is an error. Because [`EventBus`]
//! is `!Send`, the slot is per thread; each thread that wants a global bus initializes
//! its own.
//!
//! ```rust
//! use rusty_bus::{BusConfig, GlobalError, global};
//!
//! assert_eq!(global::get().unwrap_err(), GlobalError::Uninitialized);
//!
//! let bus = global::init(BusConfig::default()).unwrap();
//! assert!(std::rc::Rc::ptr_eq(&bus, &global::get().unwrap()));
//!
//! assert!(global::teardown());
//! assert!(!global::teardown());
//! ```

use std::{cell::RefCell, rc::Rc};

use log::debug;

use crate::{bus::EventBus, config::BusConfig, error::GlobalError};

thread_local! {
    static BUS: RefCell<Option<Rc<EventBus>>> = const { RefCell::new(None) };
}

/// Install this thread's bus.
pub fn init(config: BusConfig) -> Result<Rc<EventBus>, GlobalError> {
    BUS.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return Err(GlobalError::AlreadyInitialized);
        }
        let bus = Rc::new(EventBus::with_config(config));
        *slot = Some(bus.clone());
        debug!("global bus initialized");
        Ok(bus)
    })
}

/// Get this thread's bus.
pub fn get() -> Result<Rc<EventBus>, GlobalError> {
    BUS.with(|slot| slot.borrow().clone().ok_or(GlobalError::Uninitialized))
}

/// Returns `true` if this thread has a bus installed.
pub fn is_initialized() -> bool {
    BUS.with(|slot| slot.borrow().is_some())
}

/// Remove this thread's bus and drop its registrations.
///
/// Clones of the bus obtained earlier stay usable but are emptied. Returns `false` if
/// there was nothing to tear down.
pub fn teardown() -> bool {
    // Take the bus out before clearing so no borrow of the slot is held meanwhile.
    let Some(bus) = BUS.with(|slot| slot.borrow_mut().take()) else {
        return false;
    };
    bus.clear();
    debug!("global bus torn down");
    true
}
