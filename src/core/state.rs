//! States: named symbols with an optional entry action.
//!
//! The entry action runs every time a machine enters the state, either
//! because a process started there or because a link led there.

use super::symbol::{Symbol, Tag};
use crate::visit::{Visitable, Visitor};
use std::fmt;
use std::sync::Arc;

/// Side-effecting procedure over the caller's context.
///
/// Shared behind an `Arc` so an assembled machine can be cloned into many
/// processes and moved across threads.
pub type Action<D> = Arc<dyn Fn(&mut D) + Send + Sync>;

/// A state of a machine: its symbol plus what happens on entry.
///
/// # Example
///
/// ```rust
/// use statelink::core::{State, Tag};
/// use statelink::symbols;
///
/// symbols! {
///     enum Door {
///         Closed,
///         Open,
///     }
/// }
///
/// let open = State::new(Door::Open).on_enter(|log: &mut Vec<String>| {
///     log.push("opened".to_string());
/// });
///
/// let mut tag = Tag::of(Door::Closed);
/// let mut log = Vec::new();
/// open.enter(&mut tag, &mut log);
///
/// assert!(tag.is(Door::Open));
/// assert_eq!(log, vec!["opened".to_string()]);
/// ```
pub struct State<S: Symbol, D> {
    symbol: S,
    on_enter: Option<Action<D>>,
}

impl<S: Symbol, D> State<S, D> {
    /// Create a state with no entry action.
    pub fn new(symbol: S) -> Self {
        Self {
            symbol,
            on_enter: None,
        }
    }

    /// Attach the entry action.
    pub fn on_enter<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut D) + Send + Sync + 'static,
    {
        self.on_enter = Some(Arc::new(action));
        self
    }

    /// Symbol identifying this state.
    pub fn symbol(&self) -> S {
        self.symbol
    }

    /// Display name of the symbol.
    pub fn name(&self) -> &'static str {
        self.symbol.name()
    }

    /// Whether an entry action is attached.
    pub fn has_entry_action(&self) -> bool {
        self.on_enter.is_some()
    }

    /// Run the entry action without touching any tag.
    pub fn invoke(&self, data: &mut D) {
        if let Some(action) = &self.on_enter {
            tracing::trace!(state = self.name(), "running entry action");
            action(data);
        }
    }

    /// Make `tag` point at this state, then run the entry action.
    pub fn enter(&self, tag: &mut Tag<S>, data: &mut D) {
        tag.set(self.symbol);
        self.invoke(data);
    }
}

impl<S: Symbol, D> Clone for State<S, D> {
    fn clone(&self) -> Self {
        Self {
            symbol: self.symbol,
            on_enter: self.on_enter.clone(),
        }
    }
}

impl<S: Symbol, D> fmt::Debug for State<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("symbol", &self.symbol)
            .field("on_enter", &self.on_enter.is_some())
            .finish()
    }
}

impl<S: Symbol, D> Visitable for State<S, D> {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_state(self.name());
    }
}
