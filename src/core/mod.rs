//! Building blocks of a transition table.
//!
//! This module contains the pieces a machine is assembled from:
//! - Closed symbol sets and tag cells via the `Symbol` trait and `Tag`
//! - States with entry actions and events as dispatch keys
//! - Links, the transition rules between states
//! - The journal a process keeps of the links it fired

mod event;
mod journal;
mod link;
mod state;
mod symbol;

pub use event::Event;
pub use journal::{Journal, Step};
pub use link::Link;
pub use state::{Action, State};
pub use symbol::{Symbol, Tag, NONE};
