//! Closed symbol sets and the tag cells that hold one of their members.
//!
//! A symbol set is a Rust enum whose variants are the only legal members.
//! Each variant gets a dense 1-based index; index `0` ([`NONE`]) is reserved
//! for "unset". Because [`Tag::set`] takes a value of the enum type, trying
//! to store an undeclared symbol is a compile error rather than a runtime
//! condition.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::marker::PhantomData;

/// Index reserved for an unset tag.
pub const NONE: usize = 0;

/// A member of a closed, ordered set of named symbols.
///
/// States and events are both symbol sets. Implementations are usually
/// generated with [`symbols!`](crate::symbols), which lists the variants in
/// [`Symbol::ALL`] in declaration order.
///
/// # Example
///
/// ```rust
/// use statelink::core::Symbol;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Light {
///     Red,
///     Green,
/// }
///
/// impl Symbol for Light {
///     const ALL: &'static [Self] = &[Self::Red, Self::Green];
///
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Red => "Red",
///             Self::Green => "Green",
///         }
///     }
/// }
///
/// assert_eq!(Light::Red.index(), 1);
/// assert_eq!(Light::Green.index(), 2);
/// assert_eq!(Light::from_index(2), Some(Light::Green));
/// assert_eq!(Light::from_index(0), None);
/// ```
pub trait Symbol:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Every member of the set, in declaration order.
    const ALL: &'static [Self];

    /// Stable display name.
    fn name(&self) -> &'static str;

    /// 1-based position of this symbol in [`Symbol::ALL`].
    ///
    /// Returns [`NONE`] only for a value missing from `ALL`, which a
    /// correct implementation never produces.
    fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|s| s == self)
            .map_or(NONE, |pos| pos + 1)
    }

    /// Inverse of [`Symbol::index`]. `NONE` and out-of-range values map to `None`.
    fn from_index(index: usize) -> Option<Self> {
        index
            .checked_sub(1)
            .and_then(|pos| Self::ALL.get(pos))
            .copied()
    }

    /// Number of members in the set.
    fn count() -> usize {
        Self::ALL.len()
    }
}

/// Mutable cell holding either "unset" or exactly one symbol of `S`.
///
/// # Example
///
/// ```rust
/// use statelink::core::Tag;
/// use statelink::symbols;
///
/// symbols! {
///     enum Phase {
///         Idle,
///         Busy,
///     }
/// }
///
/// let mut tag = Tag::<Phase>::new();
/// assert!(!tag.valid());
///
/// tag.set(Phase::Busy);
/// assert!(tag.is(Phase::Busy));
/// assert!(!tag.is(Phase::Idle));
///
/// // Dynamic indices are range checked.
/// assert!(!tag.set_index(7));
/// assert!(tag.is(Phase::Busy));
/// assert!(tag.set_index(1));
/// assert!(tag.is(Phase::Idle));
/// ```
pub struct Tag<S: Symbol> {
    index: usize,
    _phantom: PhantomData<S>,
}

impl<S: Symbol> Tag<S> {
    /// Create an unset tag.
    pub fn new() -> Self {
        Self {
            index: NONE,
            _phantom: PhantomData,
        }
    }

    /// Create a tag already holding `symbol`.
    pub fn of(symbol: S) -> Self {
        let mut tag = Self::new();
        tag.set(symbol);
        tag
    }

    /// Store `symbol`.
    pub fn set(&mut self, symbol: S) {
        self.index = symbol.index();
    }

    /// Store the symbol at a runtime-computed index.
    ///
    /// Returns `false` and leaves the tag untouched unless
    /// `index` lies in `1..=S::count()`.
    pub fn set_index(&mut self, index: usize) -> bool {
        match S::from_index(index) {
            Some(symbol) => {
                self.set(symbol);
                true
            }
            None => false,
        }
    }

    /// Return to the unset state.
    pub fn clear(&mut self) {
        self.index = NONE;
    }

    /// True iff the tag currently holds `symbol`.
    pub fn is(&self, symbol: S) -> bool {
        self.index != NONE && self.index == symbol.index()
    }

    /// True iff the tag holds any symbol.
    pub fn valid(&self) -> bool {
        self.index != NONE
    }

    /// Raw index, [`NONE`] when unset.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The held symbol, if any.
    pub fn symbol(&self) -> Option<S> {
        S::from_index(self.index)
    }
}

impl<S: Symbol> Default for Tag<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> Clone for Tag<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Symbol> Copy for Tag<S> {}

impl<S: Symbol> PartialEq for Tag<S> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<S: Symbol> Eq for Tag<S> {}

impl<S: Symbol> From<S> for Tag<S> {
    fn from(symbol: S) -> Self {
        Self::of(symbol)
    }
}

impl<S: Symbol> Debug for Tag<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => write!(f, "Tag({:?})", symbol),
            None => f.write_str("Tag(none)"),
        }
    }
}

impl<S: Symbol> Display for Tag<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => f.write_str(symbol.name()),
            None => f.write_str("-"),
        }
    }
}
