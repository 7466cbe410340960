//! Top-level action list for a host loop.

use crate::{BoxedAction, Result, SchedulerConfig, Sequence, SequenceHandle};

/// A queue of actions a host drives with `update(dt)` once per frame.
///
/// Delegates to a [`Sequence`] so the host never has to call `start`/`end`
/// on the top-level container itself.
///
/// # Example
///
/// ```rust
/// use action_list::{ActionList, builder::wait};
///
/// let mut list = ActionList::new();
/// list.add_action(wait(0.5)).unwrap();
/// while !list.is_over() {
///     list.update(0.25).unwrap();
/// }
/// ```
#[derive(Default)]
pub struct ActionList {
    sequence: Sequence,
}

impl ActionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            sequence: Sequence::with_config(config),
        }
    }

    pub fn add_action(&mut self, action: BoxedAction) -> Result<()> {
        self.sequence.add_action(action)
    }

    /// Advances the list by `dt` unless it is already over.
    pub fn update(&mut self, dt: f64) -> Result<()> {
        if !self.sequence.is_over() {
            self.sequence.update(dt)?;
        }
        Ok(())
    }

    pub fn is_over(&self) -> bool {
        self.sequence.is_over()
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Handle for scheduling follow-up work from inside queued actions.
    pub fn handle(&self) -> SequenceHandle {
        self.sequence.handle()
    }
}
