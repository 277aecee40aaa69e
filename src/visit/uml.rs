//! PlantUML state diagram output.

use super::Visitor;

/// Renders a template as a PlantUML state diagram.
///
/// # Example output:
///
/// ```text
/// @startuml
/// [*] -> Start
/// Start -> End : Digit
/// End -> terminate
/// @enduml
/// ```
#[derive(Debug, Default)]
pub struct UmlVisitor {
    out: String,
}

impl UmlVisitor {
    /// Create a visitor with no output yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text produced so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consume the visitor, returning the diagram text.
    pub fn finish(self) -> String {
        self.out
    }
}

impl Visitor for UmlVisitor {
    fn pre_process(&mut self) {
        self.out.push_str("@startuml\n");
    }

    fn post_process(&mut self) {
        self.out.push_str("@enduml\n");
    }

    fn between_states(&mut self) {
        self.out.push_str(" -> ");
    }

    fn before_event(&mut self) {
        self.out.push_str(" : ");
    }

    fn post_link(&mut self) {
        self.out.push('\n');
    }

    fn visit_state(&mut self, name: &str) {
        self.out.push_str(name);
    }

    fn visit_event(&mut self, name: &str) {
        self.out.push_str(name);
    }
}
