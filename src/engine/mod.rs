//! Assembled machines and the processes that run them.

mod machine;
mod process;
pub(crate) mod validate;

pub use machine::Machine;
pub use process::{Process, ProcessTemplate};
