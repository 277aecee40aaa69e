//! The assembled transition table.

use crate::builder::MachineBuilder;
use crate::core::{Event, Link, State, Symbol, Tag};
use crate::visit::{Visitable, Visitor};
use std::collections::HashSet;
use std::fmt;

/// An immutable, validated set of links.
///
/// The state and event sets are derived from the links in order of first
/// appearance. No two links share a `(from, event)` key, so dispatch is a
/// function of the current state and the incoming event.
///
/// Wrap a machine in an `Arc` to share it between process templates and
/// threads; nothing in it changes after assembly.
pub struct Machine<S: Symbol, E: Symbol, D> {
    links: Vec<Link<S, E, D>>,
    states: Vec<State<S, D>>,
    events: Vec<Event<E>>,
}

impl<S: Symbol, E: Symbol, D> Machine<S, E, D> {
    /// Start declaring a machine.
    pub fn builder() -> MachineBuilder<S, E, D> {
        MachineBuilder::new()
    }

    /// Derive the state and event sets from already validated links.
    pub(crate) fn assemble(links: Vec<Link<S, E, D>>) -> Self {
        let mut states: Vec<State<S, D>> = Vec::new();
        let mut events: Vec<Event<E>> = Vec::new();

        for link in &links {
            for state in [link.from(), link.to()] {
                if !states.iter().any(|s| s.symbol() == state.symbol()) {
                    states.push(state.clone());
                }
            }
            if !events.contains(link.event()) {
                events.push(*link.event());
            }
        }

        tracing::debug!(
            states = states.len(),
            events = events.len(),
            links = links.len(),
            "machine assembled"
        );

        Self {
            links,
            states,
            events,
        }
    }

    /// Links in declaration order.
    pub fn links(&self) -> &[Link<S, E, D>] {
        &self.links
    }

    /// States in order of first appearance across the links.
    pub fn states(&self) -> &[State<S, D>] {
        &self.states
    }

    /// Events in order of first appearance across the links.
    pub fn events(&self) -> &[Event<E>] {
        &self.events
    }

    /// The declared state for `symbol`, if the machine has one.
    pub fn state(&self, symbol: S) -> Option<&State<S, D>> {
        self.states.iter().find(|s| s.symbol() == symbol)
    }

    /// True iff some link starts or ends at `symbol`.
    pub fn contains_state(&self, symbol: S) -> bool {
        self.state(symbol).is_some()
    }

    /// True iff some link is triggered by `symbol`.
    pub fn contains_event(&self, symbol: E) -> bool {
        self.events.iter().any(|e| e.symbol() == symbol)
    }

    /// Handle a statically known event.
    ///
    /// Follows the link keyed by the current state and `event`, running its
    /// transition action and then the new state's entry action. Returns
    /// `false`, leaving `state` and `data` untouched, when no link matches.
    pub fn handle(&self, state: &mut Tag<S>, event: E, data: &mut D) -> bool {
        let current = *state;
        match self.links.iter().find(|l| l.relevant_to(event, &current)) {
            Some(link) => {
                link.follow(state, data);
                true
            }
            None => {
                tracing::debug!(state = %current, event = event.name(), "no link matches");
                false
            }
        }
    }

    /// Handle an event computed at runtime.
    ///
    /// Same as [`Machine::handle`]; an unset event tag never matches.
    pub fn handle_tag(&self, state: &mut Tag<S>, event: &Tag<E>, data: &mut D) -> bool {
        let current = *state;
        match self.links.iter().find(|l| l.relevant_tag(event, &current)) {
            Some(link) => {
                link.follow(state, data);
                true
            }
            None => {
                tracing::debug!(state = %current, event = %event, "no link matches");
                false
            }
        }
    }

    /// Run the entry action of the state `state` points at.
    ///
    /// Returns `false` when the tag is unset or names a state this machine
    /// does not contain.
    pub fn process(&self, state: &Tag<S>, data: &mut D) -> bool {
        match self.states.iter().find(|s| state.is(s.symbol())) {
            Some(current) => {
                current.invoke(data);
                true
            }
            None => false,
        }
    }

    /// States reachable from `state` by a single link, in link order.
    pub fn successors(&self, state: S) -> impl Iterator<Item = S> + '_ {
        self.links
            .iter()
            .filter(move |l| l.from().symbol() == state)
            .map(|l| l.to().symbol())
    }

    /// Whether `to` can be reached from `from` by following one or more links.
    ///
    /// Depth-first search with a visited set, so cycles and self loops
    /// terminate. `from == to` holds only when some cycle returns to it.
    pub fn reaches(&self, from: S, to: S) -> bool {
        let mut visited: HashSet<S> = HashSet::new();
        let mut stack = vec![from];

        while let Some(state) = stack.pop() {
            if !visited.insert(state) {
                continue;
            }
            for next in self.successors(state) {
                if next == to {
                    return true;
                }
                if !visited.contains(&next) {
                    stack.push(next);
                }
            }
        }

        false
    }
}

impl<S: Symbol, E: Symbol, D> Clone for Machine<S, E, D> {
    fn clone(&self) -> Self {
        Self {
            links: self.links.clone(),
            states: self.states.clone(),
            events: self.events.clone(),
        }
    }
}

impl<S: Symbol, E: Symbol, D> fmt::Debug for Machine<S, E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("links", &self.links)
            .field("states", &self.states)
            .field("events", &self.events)
            .finish()
    }
}

impl<S: Symbol, E: Symbol, D> Visitable for Machine<S, E, D> {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        for link in &self.links {
            link.accept(visitor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols;

    symbols! {
        enum Light {
            Red,
            Green,
            Yellow,
            Broken,
        }
    }

    symbols! {
        enum Signal {
            Timer,
            Fault,
            Repair,
        }
    }

    #[derive(Default)]
    struct Counts {
        entered: Vec<&'static str>,
        cycles: u32,
    }

    fn traffic_light() -> Machine<Light, Signal, Counts> {
        Machine::builder()
            .state(State::new(Light::Red).on_enter(|c: &mut Counts| c.entered.push("Red")))
            .state(State::new(Light::Green).on_enter(|c: &mut Counts| c.entered.push("Green")))
            .link(Light::Red, Signal::Timer, Light::Green)
            .link(Light::Green, Signal::Timer, Light::Yellow)
            .link_with(Light::Yellow, Signal::Timer, Light::Red, |c: &mut Counts| {
                c.cycles += 1
            })
            .link(Light::Red, Signal::Fault, Light::Broken)
            .build()
            .unwrap()
    }

    #[test]
    fn derived_sets_follow_first_appearance() {
        let machine = traffic_light();

        let states: Vec<Light> = machine.states().iter().map(State::symbol).collect();
        assert_eq!(
            states,
            vec![Light::Red, Light::Green, Light::Yellow, Light::Broken]
        );

        let events: Vec<Signal> = machine.events().iter().map(Event::symbol).collect();
        assert_eq!(events, vec![Signal::Timer, Signal::Fault]);
        assert!(!machine.contains_event(Signal::Repair));
    }

    #[test]
    fn handle_follows_matching_link() {
        let machine = traffic_light();
        let mut tag = Tag::of(Light::Red);
        let mut counts = Counts::default();

        assert!(machine.handle(&mut tag, Signal::Timer, &mut counts));
        assert!(tag.is(Light::Green));
        assert_eq!(counts.entered, vec!["Green"]);
    }

    #[test]
    fn handle_miss_leaves_everything_untouched() {
        let machine = traffic_light();
        let mut tag = Tag::of(Light::Green);
        let mut counts = Counts::default();

        assert!(!machine.handle(&mut tag, Signal::Fault, &mut counts));
        assert!(tag.is(Light::Green));
        assert!(counts.entered.is_empty());
    }

    #[test]
    fn handle_never_matches_unset_tag() {
        let machine = traffic_light();
        let mut tag = Tag::new();
        let mut counts = Counts::default();

        assert!(!machine.handle(&mut tag, Signal::Timer, &mut counts));
        assert!(!tag.valid());
    }

    #[test]
    fn handle_tag_dispatches_on_runtime_event() {
        let machine = traffic_light();
        let mut tag = Tag::of(Light::Yellow);
        let mut counts = Counts::default();

        let mut event = Tag::new();
        assert!(!machine.handle_tag(&mut tag, &event, &mut counts));

        assert!(event.set_index(Signal::Timer.index()));
        assert!(machine.handle_tag(&mut tag, &event, &mut counts));
        assert!(tag.is(Light::Red));
        assert_eq!(counts.cycles, 1);
        assert_eq!(counts.entered, vec!["Red"]);
    }

    #[test]
    fn process_runs_entry_action_of_current_state() {
        let machine = traffic_light();
        let mut counts = Counts::default();

        assert!(machine.process(&Tag::of(Light::Red), &mut counts));
        assert_eq!(counts.entered, vec!["Red"]);

        // Broken is only ever a destination but is still a declared state
        assert!(machine.process(&Tag::of(Light::Broken), &mut counts));
        assert!(!machine.process(&Tag::new(), &mut counts));
    }

    #[test]
    fn reaches_handles_cycles() {
        let machine = traffic_light();

        assert!(machine.reaches(Light::Red, Light::Yellow));
        assert!(machine.reaches(Light::Green, Light::Broken));
        assert!(machine.reaches(Light::Red, Light::Red));
        assert!(!machine.reaches(Light::Broken, Light::Red));
        assert!(!machine.reaches(Light::Broken, Light::Broken));
    }

    #[test]
    fn successors_follow_link_order() {
        let machine = traffic_light();
        let next: Vec<Light> = machine.successors(Light::Red).collect();
        assert_eq!(next, vec![Light::Green, Light::Broken]);
    }
}
