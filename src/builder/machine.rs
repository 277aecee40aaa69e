//! Builder for assembling machines.

use crate::builder::error::BuildError;
use crate::core::{Action, Link, State, Symbol};
use crate::engine::{validate, Machine};
use std::sync::Arc;

/// A link declared by symbol, resolved against registered states at build time.
struct LinkDraft<S, E, D> {
    from: S,
    event: E,
    to: S,
    action: Option<Action<D>>,
}

/// Builder for constructing machines with a fluent API.
///
/// States only need registering when they carry an entry action; every
/// state named by a link is part of the machine either way.
pub struct MachineBuilder<S: Symbol, E: Symbol, D> {
    states: Vec<State<S, D>>,
    links: Vec<LinkDraft<S, E, D>>,
}

impl<S: Symbol, E: Symbol, D> MachineBuilder<S, E, D> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Register a state and its entry action.
    pub fn state(mut self, state: State<S, D>) -> Self {
        self.states.push(state);
        self
    }

    /// Register several states at once.
    pub fn states(mut self, states: Vec<State<S, D>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Add a link without a transition action.
    pub fn link(mut self, from: S, event: E, to: S) -> Self {
        self.links.push(LinkDraft {
            from,
            event,
            to,
            action: None,
        });
        self
    }

    /// Add a link whose transition action runs before `to` is entered.
    pub fn link_with<F>(mut self, from: S, event: E, to: S, action: F) -> Self
    where
        F: Fn(&mut D) + Send + Sync + 'static,
    {
        self.links.push(LinkDraft {
            from,
            event,
            to,
            action: Some(Arc::new(action)),
        });
        self
    }

    /// Build the machine.
    ///
    /// Every structural violation is collected before failing, so a
    /// single error lists all undeclared symbols, duplicate keys and
    /// misregistered states.
    pub fn build(self) -> Result<Machine<S, E, D>, BuildError> {
        if self.links.is_empty() {
            return Err(BuildError::NoLinks);
        }

        let keys: Vec<(S, E)> = self.links.iter().map(|l| (l.from, l.event)).collect();
        let registered: Vec<S> = self.states.iter().map(State::symbol).collect();
        let linked: Vec<S> = self.links.iter().flat_map(|l| [l.from, l.to]).collect();
        let events: Vec<E> = self.links.iter().map(|l| l.event).collect();

        validate::finish(vec![
            validate::check_symbols(&linked, &events),
            validate::check_links(&keys),
            validate::check_states(&registered, &linked),
        ])?;

        let resolve = |symbol: S| {
            self.states
                .iter()
                .find(|state| state.symbol() == symbol)
                .cloned()
                .unwrap_or_else(|| State::new(symbol))
        };

        let links = self
            .links
            .iter()
            .map(|draft| {
                Link::new(resolve(draft.from), draft.event, resolve(draft.to))
                    .with_action(draft.action.clone())
            })
            .collect();

        Ok(Machine::assemble(links))
    }
}

impl<S: Symbol, E: Symbol, D> Default for MachineBuilder<S, E, D> {
    fn default() -> Self {
        Self::new()
    }
}
