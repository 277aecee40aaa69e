//! Structured export of a template's graph.

use super::Visitor;
use serde::{Deserialize, Serialize};

/// One link of a [`Diagram`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub event: String,
}

/// Begin state, end state and links of a template, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagram {
    pub begin: Option<String>,
    pub end: Option<String>,
    pub edges: Vec<Edge>,
}

impl Diagram {
    /// Pretty-printed JSON form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a diagram produced by [`Diagram::to_json`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Distinct state names in order of first appearance.
    pub fn states(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for edge in &self.edges {
            for name in [edge.from.as_str(), edge.to.as_str()] {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// Collects a [`Diagram`] while walking a template or machine.
#[derive(Debug, Default)]
pub struct DiagramVisitor {
    diagram: Diagram,
    names: Vec<String>,
    event: Option<String>,
}

impl DiagramVisitor {
    /// Create a visitor with an empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the visitor, returning what it collected.
    pub fn finish(self) -> Diagram {
        self.diagram
    }
}

impl Visitor for DiagramVisitor {
    fn pre_link(&mut self) {
        self.names.clear();
        self.event = None;
    }

    fn post_link(&mut self) {
        let event = self.event.take();
        if let (Some(event), [from, to]) = (event, self.names.as_slice()) {
            self.diagram.edges.push(Edge {
                from: from.clone(),
                to: to.clone(),
                event,
            });
        }
        self.names.clear();
    }

    fn visit_state(&mut self, name: &str) {
        self.names.push(name.to_string());
    }

    fn visit_event(&mut self, name: &str) {
        self.event = Some(name.to_string());
    }

    fn visit_begin(&mut self, name: &str) {
        self.diagram.begin = Some(name.to_string());
    }

    fn visit_end(&mut self, name: &str) {
        self.diagram.end = Some(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Machine, ProcessTemplate};
    use crate::symbols;

    symbols! {
        enum Door {
            Closed,
            Open,
            Locked,
        }
    }

    symbols! {
        enum Action {
            Push,
            Pull,
            Lock,
        }
    }

    fn door() -> ProcessTemplate<Door, Action, ()> {
        let machine = Machine::<Door, Action, ()>::builder()
            .link(Door::Closed, Action::Push, Door::Open)
            .link(Door::Open, Action::Pull, Door::Closed)
            .link(Door::Closed, Action::Lock, Door::Locked)
            .build()
            .unwrap();
        ProcessTemplate::new(machine, Door::Closed, Door::Locked).unwrap()
    }

    #[test]
    fn collects_edges_and_endpoints() {
        let diagram = door().diagram();

        assert_eq!(diagram.begin.as_deref(), Some("Closed"));
        assert_eq!(diagram.end.as_deref(), Some("Locked"));
        assert_eq!(diagram.edges.len(), 3);
        assert_eq!(
            diagram.edges[2],
            Edge {
                from: "Closed".to_string(),
                to: "Locked".to_string(),
                event: "Lock".to_string(),
            }
        );
        assert_eq!(diagram.states(), vec!["Closed", "Open", "Locked"]);
    }

    #[test]
    fn json_round_trip() {
        let diagram = door().diagram();

        let json = diagram.to_json().unwrap();
        assert!(json.contains("\"begin\": \"Closed\""));

        let restored = Diagram::from_json(&json).unwrap();
        assert_eq!(restored, diagram);
    }
}
