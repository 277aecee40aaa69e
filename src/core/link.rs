//! Links: transition rules of a machine.

use super::event::Event;
use super::state::{Action, State};
use super::symbol::{Symbol, Tag};
use crate::visit::{Visitable, Visitor};
use std::fmt;
use std::sync::Arc;

/// A transition rule `(from, event, to)` with an optional transition action.
///
/// The pair `(from, event)` is the link's key; a machine never holds two
/// links with the same key.
///
/// # Example
///
/// ```rust
/// use statelink::core::{Link, State, Tag};
/// use statelink::symbols;
///
/// symbols! {
///     enum Stage { Draft, Sent }
/// }
///
/// symbols! {
///     enum Command { Send, Cancel }
/// }
///
/// let link = Link::new(
///     State::new(Stage::Draft),
///     Command::Send,
///     State::new(Stage::Sent).on_enter(|log: &mut Vec<String>| log.push("enter".into())),
/// )
/// .action(|log: &mut Vec<String>| log.push("send".into()));
///
/// let mut tag = Tag::of(Stage::Draft);
/// assert!(link.relevant_to(Command::Send, &tag));
/// assert!(!link.relevant_to(Command::Cancel, &tag));
///
/// let mut log: Vec<String> = Vec::new();
/// link.follow(&mut tag, &mut log);
/// assert!(tag.is(Stage::Sent));
/// assert_eq!(log, vec!["send", "enter"]);
/// ```
pub struct Link<S: Symbol, E: Symbol, D> {
    from: State<S, D>,
    event: Event<E>,
    to: State<S, D>,
    action: Option<Action<D>>,
}

impl<S: Symbol, E: Symbol, D> Link<S, E, D> {
    /// Create a link without a transition action.
    pub fn new(from: State<S, D>, event: E, to: State<S, D>) -> Self {
        Self {
            from,
            event: Event::new(event),
            to,
            action: None,
        }
    }

    /// Attach the transition action.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut D) + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    pub(crate) fn with_action(mut self, action: Option<Action<D>>) -> Self {
        self.action = action;
        self
    }

    /// State the link leaves.
    pub fn from(&self) -> &State<S, D> {
        &self.from
    }

    /// Event that triggers the link.
    pub fn event(&self) -> &Event<E> {
        &self.event
    }

    /// State the link enters.
    pub fn to(&self) -> &State<S, D> {
        &self.to
    }

    /// The uniqueness key `(from, event)`.
    pub fn key(&self) -> (S, E) {
        (self.from.symbol(), self.event.symbol())
    }

    /// True iff `state` is at this link's from-state.
    pub fn relevant(&self, state: &Tag<S>) -> bool {
        state.is(self.from.symbol())
    }

    /// True iff `event` is this link's event and `state` is at its from-state.
    pub fn relevant_to(&self, event: E, state: &Tag<S>) -> bool {
        self.event.symbol() == event && self.relevant(state)
    }

    /// Dynamic form of [`Link::relevant_to`] taking the event as a tag.
    pub fn relevant_tag(&self, event: &Tag<E>, state: &Tag<S>) -> bool {
        self.event.matches(event) && self.relevant(state)
    }

    /// Fire the link: transition action, then enter the to-state.
    ///
    /// Relevance is the caller's responsibility.
    pub fn follow(&self, state: &mut Tag<S>, data: &mut D) {
        tracing::trace!(
            from = self.from.name(),
            event = self.event.name(),
            to = self.to.name(),
            "following link"
        );
        if let Some(action) = &self.action {
            action(data);
        }
        self.to.enter(state, data);
    }
}

impl<S: Symbol, E: Symbol, D> Clone for Link<S, E, D> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            event: self.event,
            to: self.to.clone(),
            action: self.action.clone(),
        }
    }
}

impl<S: Symbol, E: Symbol, D> fmt::Debug for Link<S, E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("from", &self.from.symbol())
            .field("event", &self.event.symbol())
            .field("to", &self.to.symbol())
            .field("action", &self.action.is_some())
            .finish()
    }
}

impl<S: Symbol, E: Symbol, D> Visitable for Link<S, E, D> {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.pre_link();
        self.from.accept(visitor);
        visitor.between_states();
        self.to.accept(visitor);
        visitor.before_event();
        self.event.accept(visitor);
        visitor.post_link();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols;

    symbols! {
        enum TestState {
            Start,
            Middle,
            End,
        }
    }

    symbols! {
        enum TestEvent {
            Next,
            Skip,
        }
    }

    fn start_to_middle() -> Link<TestState, TestEvent, Vec<String>> {
        Link::new(
            State::new(TestState::Start),
            TestEvent::Next,
            State::new(TestState::Middle).on_enter(|log: &mut Vec<String>| {
                log.push("enter Middle".to_string())
            }),
        )
        .action(|log: &mut Vec<String>| log.push("link".to_string()))
    }

    #[test]
    fn relevant_matches_from_state() {
        let link = start_to_middle();

        assert!(link.relevant(&Tag::of(TestState::Start)));
        assert!(!link.relevant(&Tag::of(TestState::Middle)));
        assert!(!link.relevant(&Tag::new()));
    }

    #[test]
    fn relevant_to_requires_event_and_state() {
        let link = start_to_middle();
        let at_start = Tag::of(TestState::Start);

        assert!(link.relevant_to(TestEvent::Next, &at_start));
        assert!(!link.relevant_to(TestEvent::Skip, &at_start));
        assert!(!link.relevant_to(TestEvent::Next, &Tag::of(TestState::End)));
    }

    #[test]
    fn relevant_tag_uses_runtime_event() {
        let link = start_to_middle();
        let at_start = Tag::of(TestState::Start);

        assert!(link.relevant_tag(&Tag::of(TestEvent::Next), &at_start));
        assert!(!link.relevant_tag(&Tag::of(TestEvent::Skip), &at_start));
        assert!(!link.relevant_tag(&Tag::new(), &at_start));
    }

    #[test]
    fn follow_runs_link_action_before_entry_action() {
        let link = start_to_middle();
        let mut tag = Tag::of(TestState::Start);
        let mut log = Vec::new();

        link.follow(&mut tag, &mut log);

        assert!(tag.is(TestState::Middle));
        assert_eq!(log, vec!["link".to_string(), "enter Middle".to_string()]);
    }

    #[test]
    fn key_is_from_and_event() {
        let link = start_to_middle();
        assert_eq!(link.key(), (TestState::Start, TestEvent::Next));
    }

    #[test]
    fn follow_without_actions_only_moves_tag() {
        let link: Link<TestState, TestEvent, u8> = Link::new(
            State::new(TestState::Middle),
            TestEvent::Skip,
            State::new(TestState::End),
        );
        let mut tag = Tag::of(TestState::Middle);
        let mut data = 0u8;

        link.follow(&mut tag, &mut data);

        assert!(tag.is(TestState::End));
        assert_eq!(data, 0);
    }
}
