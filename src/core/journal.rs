//! Record of the links a process has fired during a run.
//!
//! A [`Journal`] is owned by a process and cleared whenever the process
//! starts over, so it always describes the current run only.

use super::symbol::Symbol;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One fired link.
///
/// # Example
///
/// ```rust
/// use statelink::core::Step;
/// use statelink::symbols;
/// use chrono::Utc;
///
/// symbols! {
///     enum Light { Red, Green }
/// }
///
/// symbols! {
///     enum Timer { Elapsed }
/// }
///
/// let step = Step {
///     from: Light::Red,
///     event: Timer::Elapsed,
///     to: Light::Green,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(step.key(), (Light::Red, Timer::Elapsed));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Step<S: Symbol, E: Symbol> {
    /// State the process was in
    pub from: S,
    /// Event that fired the link
    pub event: E,
    /// State the process moved to
    pub to: S,
    /// When the link fired
    pub timestamp: DateTime<Utc>,
}

impl<S: Symbol, E: Symbol> Step<S, E> {
    /// Record a step happening now.
    pub fn now(from: S, event: E, to: S) -> Self {
        Self {
            from,
            event,
            to,
            timestamp: Utc::now(),
        }
    }

    /// The key of the link that fired.
    pub fn key(&self) -> (S, E) {
        (self.from, self.event)
    }
}

/// Ordered steps of a single run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Journal<S: Symbol, E: Symbol> {
    steps: Vec<Step<S, E>>,
}

impl<S: Symbol, E: Symbol> Default for Journal<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol, E: Symbol> Journal<S, E> {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step.
    pub fn record(&mut self, step: Step<S, E>) {
        self.steps.push(step);
    }

    /// Forget every step.
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// States traversed: the first step's `from`, then each step's `to`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statelink::core::{Journal, Step};
    /// use statelink::symbols;
    ///
    /// symbols! {
    ///     enum Phase { One, Two, Three }
    /// }
    ///
    /// symbols! {
    ///     enum Tick { Next }
    /// }
    ///
    /// let mut journal = Journal::new();
    /// journal.record(Step::now(Phase::One, Tick::Next, Phase::Two));
    /// journal.record(Step::now(Phase::Two, Tick::Next, Phase::Three));
    ///
    /// assert_eq!(journal.path(), vec![Phase::One, Phase::Two, Phase::Three]);
    /// ```
    pub fn path(&self) -> Vec<S> {
        let mut path = Vec::with_capacity(self.steps.len() + 1);
        if let Some(first) = self.steps.first() {
            path.push(first.from);
        }
        path.extend(self.steps.iter().map(|step| step.to));
        path
    }

    /// Events in the order they fired.
    pub fn events(&self) -> Vec<E> {
        self.steps.iter().map(|step| step.event).collect()
    }

    /// Time between the first and last step, `None` when empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.steps.first()?, self.steps.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Steps in the order they were recorded.
    pub fn steps(&self) -> &[Step<S, E>] {
        &self.steps
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True iff nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
