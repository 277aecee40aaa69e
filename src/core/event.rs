//! Events: named symbols used purely as dispatch keys.

use super::symbol::{Symbol, Tag};
use crate::visit::{Visitable, Visitor};

/// An event that can trigger a link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Event<E: Symbol> {
    symbol: E,
}

impl<E: Symbol> Event<E> {
    /// Wrap `symbol` as an event.
    pub fn new(symbol: E) -> Self {
        Self { symbol }
    }

    /// Symbol identifying this event.
    pub fn symbol(&self) -> E {
        self.symbol
    }

    /// Display name of the symbol.
    pub fn name(&self) -> &'static str {
        self.symbol.name()
    }

    /// True iff `tag` currently holds this event.
    pub fn matches(&self, tag: &Tag<E>) -> bool {
        tag.is(self.symbol)
    }
}

impl<E: Symbol> From<E> for Event<E> {
    fn from(symbol: E) -> Self {
        Self::new(symbol)
    }
}

impl<E: Symbol> Visitable for Event<E> {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_event(self.name());
    }
}
