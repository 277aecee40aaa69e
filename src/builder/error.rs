//! Build errors for machines and process templates.

use thiserror::Error;

/// Errors that prevent a machine or process template from being assembled.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No links defined. Add at least one link before .build()")]
    NoLinks,

    #[error("Invalid definition: {}", join(.0))]
    Invalid(Vec<StructureError>),
}

impl BuildError {
    /// Every structural violation carried by this error.
    pub fn violations(&self) -> &[StructureError] {
        match self {
            Self::NoLinks => &[],
            Self::Invalid(violations) => violations,
        }
    }
}

/// A single defect in a transition table or begin/end pairing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("More than one link leaves '{from}' on event '{event}'")]
    DuplicateLink { from: String, event: String },

    #[error("State '{state}' is registered more than once")]
    DuplicateState { state: String },

    #[error("State '{state}' is registered but no link uses it")]
    UnlinkedState { state: String },

    #[error("Symbol '{name}' is missing from its set's ALL list")]
    UndeclaredSymbol { name: String },

    #[error("Begin state '{state}' is not a state of the machine")]
    UnknownBegin { state: String },

    #[error("End state '{state}' is not a state of the machine")]
    UnknownEnd { state: String },

    #[error("End state '{end}' cannot be reached from begin state '{begin}'")]
    Unreachable { begin: String, end: String },
}

fn join(violations: &[StructureError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_violation() {
        let err = BuildError::Invalid(vec![
            StructureError::DuplicateLink {
                from: "Start".to_string(),
                event: "Go".to_string(),
            },
            StructureError::UnknownEnd {
                state: "Gone".to_string(),
            },
        ]);

        assert_eq!(
            err.to_string(),
            "Invalid definition: More than one link leaves 'Start' on event 'Go'; \
             End state 'Gone' is not a state of the machine"
        );
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn no_links_has_no_violations() {
        assert!(BuildError::NoLinks.violations().is_empty());
    }
}
