//! Statelink: table-driven finite state machines
//!
//! A machine is a fixed table of links, each keyed by a `(state, event)` pair.
//! States and events are drawn from closed alphabets declared with the
//! [`symbols!`] macro, so an unknown state or event is a compile error rather
//! than a runtime surprise. Structural mistakes the type system cannot see
//! (duplicate keys, unreachable end states) are rejected once, when the
//! machine or template is assembled, with every violation reported together.
//!
//! # Core Concepts
//!
//! - **Symbol**: A closed alphabet with stable 1-based indices, see [`Tag`]
//! - **Link**: A `from --event--> to` transition with an optional action
//! - **Machine**: The validated link table, dispatching statically or by tag
//! - **Process**: A cursor over a machine from a begin to an end state,
//!   operating on caller-owned data
//! - **Visitor**: Structural traversal, used for PlantUML export
//!
//! # Example
//!
//! ```rust
//! use statelink::core::State;
//! use statelink::engine::{Machine, ProcessTemplate};
//! use statelink::symbols;
//!
//! symbols! {
//!     enum Phase {
//!         Idle,
//!         Running,
//!         Finished,
//!     }
//! }
//!
//! symbols! {
//!     enum Command {
//!         Run,
//!         Stop,
//!     }
//! }
//!
//! let machine = Machine::builder()
//!     .state(State::new(Phase::Running).on_enter(|runs: &mut u32| *runs += 1))
//!     .link(Phase::Idle, Command::Run, Phase::Running)
//!     .link(Phase::Running, Command::Stop, Phase::Finished)
//!     .build()
//!     .unwrap();
//!
//! let template = ProcessTemplate::new(machine, Phase::Idle, Phase::Finished).unwrap();
//!
//! let mut runs = 0;
//! let mut process = template.bind(&mut runs);
//! process.start();
//! assert!(process.advance(Command::Run));
//! assert!(process.advance(Command::Stop));
//! assert!(process.done());
//! drop(process);
//! assert_eq!(runs, 1);
//!
//! assert!(template.to_uml().starts_with("@startuml\n[*] -> Idle\n"));
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod visit;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder, StructureError};
pub use core::{Event, Journal, Link, State, Step, Symbol, Tag};
pub use engine::{Machine, Process, ProcessTemplate};
pub use visit::{Diagram, UmlVisitor, Visitable, Visitor};
