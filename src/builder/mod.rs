//! Builder API for declaring machines.
//!
//! This module provides the fluent [`MachineBuilder`], the [`symbols!`](crate::symbols)
//! macro for declaring state and event alphabets, and the errors reported
//! when a declaration is structurally invalid.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::{BuildError, StructureError};
pub use machine::MachineBuilder;
