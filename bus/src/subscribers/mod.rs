//! Ready-made subscribers.
//!
//! - [`Milestone`] counts events of one kind and fires every Nth occurrence.
//! - [`Journal`] records and logs every event it sees.

mod journal;
mod milestone;

pub use journal::Journal;
pub use milestone::Milestone;
