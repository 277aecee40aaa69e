//! Processes: cursors walking a machine from a begin state to an end state.

use crate::builder::BuildError;
use crate::core::{Journal, Step, Symbol, Tag};
use crate::engine::{validate, Machine};
use crate::visit::{Diagram, DiagramVisitor, UmlVisitor, Visitable, Visitor};
use std::fmt;
use std::sync::Arc;

/// A machine paired with a validated begin and end state.
///
/// Creating a template proves, once, that both states belong to the
/// machine and that the end state is reachable from the begin state.
/// Processes bound to the template never repeat those checks.
///
/// # Example
///
/// ```rust
/// use statelink::engine::{Machine, ProcessTemplate};
/// use statelink::symbols;
///
/// symbols! {
///     enum Door { Closed, Open, Locked }
/// }
///
/// symbols! {
///     enum Action { Push, Pull, Turn }
/// }
///
/// let machine = Machine::<Door, Action, ()>::builder()
///     .link(Door::Closed, Action::Push, Door::Open)
///     .link(Door::Open, Action::Pull, Door::Closed)
///     .link(Door::Closed, Action::Turn, Door::Locked)
///     .build()
///     .unwrap();
///
/// let template = ProcessTemplate::new(machine, Door::Open, Door::Locked).unwrap();
///
/// let mut data = ();
/// let mut process = template.bind(&mut data);
/// assert!(process.start());
/// assert!(!process.advance(Action::Turn));
/// assert!(process.advance(Action::Pull));
/// assert!(process.advance(Action::Turn));
/// assert!(process.done());
/// ```
pub struct ProcessTemplate<S: Symbol, E: Symbol, D> {
    machine: Arc<Machine<S, E, D>>,
    begin: S,
    end: S,
}

impl<S: Symbol, E: Symbol, D> ProcessTemplate<S, E, D> {
    /// Validate `begin` and `end` against `machine`.
    ///
    /// Fails with every applicable violation: unknown begin state, unknown
    /// end state, or an end state no sequence of links can reach.
    pub fn new(
        machine: impl Into<Arc<Machine<S, E, D>>>,
        begin: S,
        end: S,
    ) -> Result<Self, BuildError> {
        let machine = machine.into();
        validate::finish(vec![validate::check_route(&machine, begin, end)])?;

        tracing::debug!(
            begin = begin.name(),
            end = end.name(),
            "process template validated"
        );

        Ok(Self {
            machine,
            begin,
            end,
        })
    }

    /// Create a process operating on `data`.
    pub fn bind<'a>(&'a self, data: &'a mut D) -> Process<'a, S, E, D> {
        Process {
            template: self,
            data,
            state: Tag::new(),
            journal: Journal::new(),
        }
    }

    /// The shared machine.
    pub fn machine(&self) -> &Arc<Machine<S, E, D>> {
        &self.machine
    }

    /// State a process enters on [`Process::start`].
    pub fn begin(&self) -> S {
        self.begin
    }

    /// State at which [`Process::done`] holds.
    pub fn end(&self) -> S {
        self.end
    }

    /// PlantUML state diagram of the template.
    pub fn to_uml(&self) -> String {
        let mut visitor = UmlVisitor::new();
        self.accept(&mut visitor);
        visitor.finish()
    }

    /// Structured view of the template's graph.
    pub fn diagram(&self) -> Diagram {
        let mut visitor = DiagramVisitor::new();
        self.accept(&mut visitor);
        visitor.finish()
    }
}

impl<S: Symbol, E: Symbol, D> Clone for ProcessTemplate<S, E, D> {
    fn clone(&self) -> Self {
        Self {
            machine: Arc::clone(&self.machine),
            begin: self.begin,
            end: self.end,
        }
    }
}

impl<S: Symbol, E: Symbol, D> fmt::Debug for ProcessTemplate<S, E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessTemplate")
            .field("begin", &self.begin)
            .field("end", &self.end)
            .field("machine", &self.machine)
            .finish()
    }
}

impl<S: Symbol, E: Symbol, D> Visitable for ProcessTemplate<S, E, D> {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.pre_process();
        visitor.visit_begin(self.begin.name());
        self.machine.accept(visitor);
        visitor.visit_end(self.end.name());
        visitor.post_process();
    }
}

/// Runtime cursor over a machine, bound to caller-owned data.
///
/// A new process is unset. [`Process::start`] moves it to the begin state,
/// each successful [`Process::advance`] fires one link, and
/// [`Process::done`] reports arrival at the end state. [`Process::reset`]
/// makes the process reusable for another run over the same data.
pub struct Process<'a, S: Symbol, E: Symbol, D> {
    template: &'a ProcessTemplate<S, E, D>,
    data: &'a mut D,
    state: Tag<S>,
    journal: Journal<S, E>,
}

impl<'a, S: Symbol, E: Symbol, D> Process<'a, S, E, D> {
    /// Return to the unset state, discarding the journal. Data is untouched.
    pub fn reset(&mut self) {
        self.state.clear();
        self.journal.clear();
    }

    /// Move to the begin state and run its entry action.
    ///
    /// May be called on a running process to start over.
    pub fn start(&mut self) -> bool {
        self.journal.clear();
        self.state.set(self.template.begin);
        self.template.machine.process(&self.state, &mut *self.data)
    }

    /// Fire the link for `event` from the current state.
    ///
    /// Returns `false` without side effects when the process is unset or
    /// no link matches.
    pub fn advance(&mut self, event: E) -> bool {
        if !self.state.valid() {
            tracing::debug!(event = event.name(), "advance on unset process");
            return false;
        }
        let from = self.state;
        if !self
            .template
            .machine
            .handle(&mut self.state, event, &mut *self.data)
        {
            return false;
        }
        self.record(from, event);
        true
    }

    /// Fire the link for an event held in a tag, as produced by a classifier.
    pub fn advance_tag(&mut self, event: &Tag<E>) -> bool {
        let Some(symbol) = event.symbol() else {
            return false;
        };
        if !self.state.valid() {
            tracing::debug!(event = symbol.name(), "advance on unset process");
            return false;
        }
        let from = self.state;
        if !self
            .template
            .machine
            .handle_tag(&mut self.state, event, &mut *self.data)
        {
            return false;
        }
        self.record(from, symbol);
        true
    }

    /// Fire the link for the event at 1-based `index` in `E::ALL`.
    ///
    /// [`NONE`](crate::core::NONE) and out-of-range indices fail.
    pub fn advance_index(&mut self, index: usize) -> bool {
        let mut event = Tag::new();
        event.set_index(index) && self.advance_tag(&event)
    }

    /// Run the current state's entry action again. Fails when unset.
    pub fn invoke(&mut self) -> bool {
        self.state.valid() && self.template.machine.process(&self.state, &mut *self.data)
    }

    /// True iff the process is at the end state.
    pub fn done(&self) -> bool {
        self.state.is(self.template.end)
    }

    /// True iff the process is at `state`.
    pub fn at(&self, state: S) -> bool {
        self.state.is(state)
    }

    /// True iff the process is at any state.
    pub fn valid(&self) -> bool {
        self.state.valid()
    }

    /// Symbol of the current state, `None` when unset.
    pub fn current(&self) -> Option<S> {
        self.state.symbol()
    }

    /// The cursor itself.
    pub fn tag(&self) -> &Tag<S> {
        &self.state
    }

    /// Context the actions operate on.
    pub fn data(&self) -> &D {
        &*self.data
    }

    /// Mutable context, for feeding input between steps.
    pub fn data_mut(&mut self) -> &mut D {
        &mut *self.data
    }

    /// Links fired since the last start or reset.
    pub fn journal(&self) -> &Journal<S, E> {
        &self.journal
    }

    /// Template this process was bound from.
    pub fn template(&self) -> &'a ProcessTemplate<S, E, D> {
        self.template
    }

    fn record(&mut self, from: Tag<S>, event: E) {
        if let (Some(from), Some(to)) = (from.symbol(), self.state.symbol()) {
            self.journal.record(Step::now(from, event, to));
        }
    }
}

impl<S: Symbol, E: Symbol, D> fmt::Debug for Process<'_, S, E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Process")
            .field("state", &self.state)
            .field("begin", &self.template.begin)
            .field("end", &self.template.end)
            .field("steps", &self.journal.len())
            .finish()
    }
}

impl<S: Symbol, E: Symbol, D> Visitable for Process<'_, S, E, D> {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.template.accept(visitor);
    }
}
