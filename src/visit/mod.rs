//! Traversal of a machine's static structure.
//!
//! Templates, machines, links, states and events implement [`Visitable`].
//! Accepting a [`Visitor`] walks the structure in a fixed order and calls
//! back into the visitor, which decides what to produce from it.
//!
//! # Traversal order
//!
//! For a [`ProcessTemplate`](crate::engine::ProcessTemplate):
//!
//! 1. `pre_process`
//! 2. `visit_begin` with the begin state's name
//! 3. for every link in declaration order: `pre_link`, from-state,
//!    `between_states`, to-state, `before_event`, event, `post_link`
//! 4. `visit_end` with the end state's name
//! 5. `post_process`

mod diagram;
mod uml;

pub use diagram::{Diagram, DiagramVisitor, Edge};
pub use uml::UmlVisitor;

/// Pseudo-state shown as the source of the begin transition.
pub const BEGIN_MARKER: &str = "[*]";

/// Pseudo-state shown as the target of the end transition.
pub const END_MARKER: &str = "terminate";

/// Callbacks invoked while walking a machine.
///
/// Only the name callbacks are required. The default begin and end
/// callbacks render as synthetic links from [`BEGIN_MARKER`] and to
/// [`END_MARKER`] built from the other callbacks.
pub trait Visitor {
    fn pre_process(&mut self) {}

    fn post_process(&mut self) {}

    fn pre_link(&mut self) {}

    /// Between a link's from-state and to-state.
    fn between_states(&mut self) {}

    /// Between a link's to-state and its event.
    fn before_event(&mut self) {}

    fn post_link(&mut self) {}

    fn visit_state(&mut self, name: &str);

    fn visit_event(&mut self, name: &str);

    fn visit_begin(&mut self, name: &str) {
        self.pre_link();
        self.visit_state(BEGIN_MARKER);
        self.between_states();
        self.visit_state(name);
        self.post_link();
    }

    fn visit_end(&mut self, name: &str) {
        self.pre_link();
        self.visit_state(name);
        self.between_states();
        self.visit_state(END_MARKER);
        self.post_link();
    }
}

/// Structure that can be walked by a [`Visitor`].
pub trait Visitable {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V);
}
