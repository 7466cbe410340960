//! Composite actions.
//!
//! Composites own child actions and drive them through the [`Action`]
//! contract: [`Sequence`] runs children one at a time in order, [`Parallel`]
//! runs all of them each frame and prunes finished ones.
//!
//! Both keep their children behind shared state so that a child can schedule
//! more work on its own parent (typically from `end()`) through a weak
//! [`SequenceHandle`] / [`ParallelHandle`]. No borrow of that state is held
//! while a child method runs.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::mem;
use std::rc::{Rc, Weak};

use crate::{
    Action, ActionError, BoxedAction, ContractViolation, DeltaPolicy, Guarded, Result,
    SchedulerConfig,
};

type Child = Guarded<BoxedAction>;

// ============================================================================
// Sequence
// ============================================================================

/// Queue entry. The front is `Active` while the sequence is calling into it,
/// so the entry still counts as queued during re-entrant `add_action` calls.
enum Slot {
    Parked(Child),
    Active,
}

struct SequenceState {
    queue: VecDeque<Slot>,
    /// Set while `advance` runs, including while a popped front is ended.
    in_pass: bool,
    config: SchedulerConfig,
}

/// Runs child actions one at a time, each to completion, in insertion order.
///
/// # Semantics
///
/// - Adding to an empty sequence starts the new action immediately.
/// - `update(dt)` updates the front action. When the front reports over it is
///   popped *then* ended, and the next one is started, repeatedly, so a run of
///   already-finished actions drains within one call.
/// - Only the first action found not over consumes `dt` (see
///   [`DeltaPolicy`]).
/// - The sequence is over when its queue is empty, and stays usable: new
///   actions can be added at any time.
///
/// As a child of another composite, `start` and `end` are no-ops.
pub struct Sequence {
    state: Rc<RefCell<SequenceState>>,
}

/// Weak handle for adding actions to a [`Sequence`] from inside its children.
#[derive(Clone)]
pub struct SequenceHandle {
    state: Weak<RefCell<SequenceState>>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(SequenceState {
                queue: VecDeque::new(),
                in_pass: false,
                config,
            })),
        }
    }

    /// Creates a sequence and adds `actions` in order.
    ///
    /// The first action is started as part of construction.
    pub fn from_actions(actions: Vec<BoxedAction>) -> Result<Self> {
        let sequence = Self::new();
        for action in actions {
            sequence.add_action(action)?;
        }
        Ok(sequence)
    }

    /// Returns a weak handle children can capture without keeping the
    /// sequence alive.
    pub fn handle(&self) -> SequenceHandle {
        SequenceHandle {
            state: Rc::downgrade(&self.state),
        }
    }

    pub fn config(&self) -> SchedulerConfig {
        self.state.borrow().config
    }

    /// Number of queued actions, including the active one.
    pub fn len(&self) -> usize {
        self.state.borrow().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().queue.is_empty()
    }

    /// Appends `action`, starting it right away if the queue was empty.
    pub fn add_action(&self, action: BoxedAction) -> Result<()> {
        enqueue(&self.state, action)
    }

    /// Advances the sequence by `dt`. A no-op when empty.
    pub fn update(&self, dt: f64) -> Result<()> {
        advance(&self.state, dt)
    }

    pub fn is_over(&self) -> bool {
        self.is_empty()
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceHandle {
    /// Appends `action` to the sequence this handle was taken from.
    ///
    /// Fails with [`ActionError::Detached`] once that sequence is dropped.
    pub fn add_action(&self, action: BoxedAction) -> Result<()> {
        let state = self.state.upgrade().ok_or(ActionError::Detached)?;
        enqueue(&state, action)
    }

    pub fn is_attached(&self) -> bool {
        self.state.strong_count() > 0
    }
}

impl Action for Sequence {
    fn update(&mut self, dt: f64) -> Result<()> {
        advance(&self.state, dt)
    }

    fn is_over(&self) -> bool {
        self.is_empty()
    }

    fn name(&self) -> &'static str {
        "Sequence"
    }
}

fn enqueue(cell: &RefCell<SequenceState>, action: BoxedAction) -> Result<()> {
    let mut child = Guarded::new(action);
    {
        let mut state = cell.borrow_mut();
        if !state.queue.is_empty() {
            tracing::trace!(
                action = child.name(),
                queued = state.queue.len() + 1,
                "queued action"
            );
            state.queue.push_back(Slot::Parked(child));
            return Ok(());
        }
        state.queue.push_back(Slot::Active);
    }

    // The new action is the front: nothing else would ever start it.
    tracing::debug!(action = child.name(), "starting action added to empty sequence");
    let started = child.start();
    park_front(cell, child);
    started
}

fn advance(cell: &RefCell<SequenceState>, dt: f64) -> Result<()> {
    let config = {
        let mut state = cell.borrow_mut();
        state.config.check_delta(dt)?;
        if state.in_pass {
            return Err(ContractViolation::Reentrant {
                composite: "Sequence",
            }
            .into());
        }
        state.in_pass = true;
        state.config
    };

    let outcome = drain(cell, dt, config);
    cell.borrow_mut().in_pass = false;
    outcome
}

fn drain(cell: &RefCell<SequenceState>, dt: f64, config: SchedulerConfig) -> Result<()> {
    let Some(mut front) = checkout_front(cell)? else {
        return Ok(());
    };
    let mut step = Some(dt);

    loop {
        // A front added from a predecessor's end() was already started by
        // enqueue. One left idle by an earlier failure is started here.
        if front.phase().is_idle() {
            tracing::debug!(action = front.name(), "starting next action");
            if let Err(err) = front.start() {
                park_front(cell, front);
                return Err(err);
            }
        }

        if !front.is_over() {
            let Some(dt) = step else {
                park_front(cell, front);
                return Ok(());
            };
            if let Err(err) = front.update(dt) {
                park_front(cell, front);
                return Err(err);
            }
            if config.delta_policy == DeltaPolicy::ConsumeOnce {
                step = None;
            }
            if !front.is_over() {
                park_front(cell, front);
                return Ok(());
            }
        }

        // Pop before end: if end() adds an action, it must see the queue
        // without the finished front.
        cell.borrow_mut().queue.pop_front();
        tracing::debug!(action = front.name(), "action finished");
        front.end()?;

        front = match checkout_front(cell)? {
            Some(next) => next,
            None => {
                tracing::trace!("sequence drained");
                return Ok(());
            }
        };
    }
}

/// Takes the front child out of its slot, leaving the slot marked active.
fn checkout_front(cell: &RefCell<SequenceState>) -> Result<Option<Child>> {
    let mut state = cell.borrow_mut();
    let Some(slot) = state.queue.front_mut() else {
        return Ok(None);
    };
    match mem::replace(slot, Slot::Active) {
        Slot::Parked(child) => Ok(Some(child)),
        Slot::Active => Err(ContractViolation::Reentrant {
            composite: "Sequence",
        }
        .into()),
    }
}

fn park_front(cell: &RefCell<SequenceState>, child: Child) {
    let mut state = cell.borrow_mut();
    debug_assert!(matches!(state.queue.front(), Some(Slot::Active)));
    if let Some(slot) = state.queue.front_mut() {
        *slot = Slot::Parked(child);
    }
}

// ============================================================================
// Parallel
// ============================================================================

/// Whether a [`Parallel`] has run its initial start pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StartState {
    /// Added children wait for the composite's own `start()`.
    #[default]
    NotStarted,

    /// Added children are started on arrival.
    Started,
}

struct ParallelState {
    children: Vec<Child>,
    start: StartState,
    /// Children are checked out while a pass is running.
    in_pass: bool,
    config: SchedulerConfig,
}

/// Runs all child actions concurrently within the same frame.
///
/// # Semantics
///
/// - `start()` starts every idle child and switches to
///   [`StartState::Started`]; children added afterwards start on arrival.
/// - `update(dt)` first ends and removes every child that already reports
///   over, then updates the survivors, then ends and removes those that
///   finished during that update. A child is never updated after its `end`,
///   and never skips it.
/// - Children added during a pass join after it and get their first `dt` on
///   the next `update`.
/// - No ordering among children is guaranteed.
/// - The composite is over when no children remain. `end()` returns it to
///   [`StartState::NotStarted`] for reuse.
pub struct Parallel {
    state: Rc<RefCell<ParallelState>>,
}

/// Weak handle for adding actions to a [`Parallel`] from inside its children.
#[derive(Clone)]
pub struct ParallelHandle {
    state: Weak<RefCell<ParallelState>>,
}

impl Parallel {
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self::build(Vec::new(), config)
    }

    /// Creates a not-yet-started composite holding `actions`.
    pub fn from_actions(actions: Vec<BoxedAction>) -> Self {
        let children = actions.into_iter().map(Guarded::new).collect();
        Self::build(children, SchedulerConfig::default())
    }

    fn build(children: Vec<Child>, config: SchedulerConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(ParallelState {
                children,
                start: StartState::NotStarted,
                in_pass: false,
                config,
            })),
        }
    }

    pub fn handle(&self) -> ParallelHandle {
        ParallelHandle {
            state: Rc::downgrade(&self.state),
        }
    }

    pub fn start_state(&self) -> StartState {
        self.state.borrow().start
    }

    pub fn len(&self) -> usize {
        self.state.borrow().children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds `action`, starting it immediately if the composite has started.
    pub fn add_action(&self, action: BoxedAction) -> Result<()> {
        join(&self.state, action)
    }

    /// Starts every child that has not been started yet.
    pub fn start(&self) -> Result<()> {
        launch(&self.state)
    }

    /// Prunes finished children, then updates the rest by `dt`.
    pub fn update(&self, dt: f64) -> Result<()> {
        step(&self.state, dt)
    }

    pub fn is_over(&self) -> bool {
        let state = self.state.borrow();
        state.children.is_empty() && !state.in_pass
    }
}

impl Default for Parallel {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelHandle {
    /// Adds `action` to the composite this handle was taken from.
    ///
    /// Fails with [`ActionError::Detached`] once that composite is dropped.
    pub fn add_action(&self, action: BoxedAction) -> Result<()> {
        let state = self.state.upgrade().ok_or(ActionError::Detached)?;
        join(&state, action)
    }

    pub fn is_attached(&self) -> bool {
        self.state.strong_count() > 0
    }
}

impl Action for Parallel {
    fn start(&mut self) -> Result<()> {
        launch(&self.state)
    }

    fn update(&mut self, dt: f64) -> Result<()> {
        step(&self.state, dt)
    }

    fn is_over(&self) -> bool {
        let state = self.state.borrow();
        state.children.is_empty() && !state.in_pass
    }

    fn end(&mut self) -> Result<()> {
        self.state.borrow_mut().start = StartState::NotStarted;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Parallel"
    }
}

fn join(cell: &RefCell<ParallelState>, action: BoxedAction) -> Result<()> {
    let mut child = Guarded::new(action);
    let start = cell.borrow().start;
    let started = match start {
        StartState::Started => {
            tracing::debug!(action = child.name(), "starting action added to running set");
            child.start()
        }
        StartState::NotStarted => {
            tracing::trace!(action = child.name(), "deferring start until set starts");
            Ok(())
        }
    };
    // Kept even if start failed, so the failure shows up again instead of the
    // child vanishing.
    cell.borrow_mut().children.push(child);
    started
}

fn launch(cell: &RefCell<ParallelState>) -> Result<()> {
    let mut batch = {
        let mut state = cell.borrow_mut();
        if state.in_pass {
            return Err(ContractViolation::Reentrant {
                composite: "Parallel",
            }
            .into());
        }
        // Marked first so children added from a child's start() begin on
        // arrival instead of being missed by this batch.
        state.start = StartState::Started;
        state.in_pass = true;
        mem::take(&mut state.children)
    };

    let outcome = batch
        .iter_mut()
        .filter(|child| child.phase().is_idle())
        .try_for_each(|child| child.start());
    tracing::trace!(children = batch.len(), "set started");

    restore(cell, batch);
    outcome
}

fn step(cell: &RefCell<ParallelState>, dt: f64) -> Result<()> {
    let pending = {
        let mut state = cell.borrow_mut();
        state.config.check_delta(dt)?;
        if state.in_pass {
            return Err(ContractViolation::Reentrant {
                composite: "Parallel",
            }
            .into());
        }
        state.in_pass = true;
        mem::take(&mut state.children)
    };

    // Phase 1: children already over, e.g. finished right after start().
    let (mut survivors, outcome) = prune(pending);

    // Phase 2: update whatever is still running.
    let outcome =
        outcome.and_then(|()| survivors.iter_mut().try_for_each(|child| child.update(dt)));

    // Phase 3: children that finished during this update.
    let (survivors, outcome) = match outcome {
        Ok(()) => prune(survivors),
        Err(err) => (survivors, Err(err)),
    };

    restore(cell, survivors);
    outcome
}

/// Ends and drops every child that reports over.
///
/// On failure the children not yet visited are kept alongside the survivors.
fn prune(children: Vec<Child>) -> (Vec<Child>, Result<()>) {
    let mut survivors = Vec::with_capacity(children.len());
    let mut pending = children.into_iter();
    while let Some(mut child) = pending.next() {
        if !child.is_over() {
            survivors.push(child);
            continue;
        }
        tracing::debug!(action = child.name(), "pruning finished action");
        if let Err(err) = child.end() {
            survivors.extend(pending);
            return (survivors, Err(err));
        }
    }
    (survivors, Ok(()))
}

/// Puts checked-out children back ahead of any added during the pass.
fn restore(cell: &RefCell<ParallelState>, mut children: Vec<Child>) {
    let mut state = cell.borrow_mut();
    children.append(&mut state.children);
    state.children = children;
    state.in_pass = false;
}
