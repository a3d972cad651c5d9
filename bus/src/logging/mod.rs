//! Logging support.
//!
//! The bus logs through the [`log`] facade. [`ChannelLogger`] is a `log::Log`
//! implementation that forwards records over a channel so an application (or a test) can
//! drain and display them on its own schedule.

mod channel;

pub use channel::{ChannelLogger, LogMessage};
