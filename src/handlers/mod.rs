//! Command handlers for the habit ledger shell
//!
//! Each file adds the `handle_*` methods for one area to `HabitHandler`.
//! Handlers parse their raw arguments, call the store and render a reply.

pub mod completion;
pub mod major_event;
pub mod month_card;
pub mod preferences;
pub mod punch_in;
pub mod snapshot;
pub mod statistics;
