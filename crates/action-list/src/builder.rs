//! Builder utilities for ergonomic action construction.
//!
//! This module provides helper functions to reduce boilerplate when queueing
//! actions. Instead of writing verbose `Box::new(Wait::new(1.0))`, you can use
//! shorter functions like `wait(1.0)`.

use crate::{Action, BoxedAction, Callback, Parallel, Result, Sequence, Shared, Wait};

/// Creates a wait action.
///
/// Shorthand for `Box::new(Wait::new(duration))`.
#[inline]
pub fn wait(duration: f64) -> BoxedAction {
    Box::new(Wait::new(duration))
}

/// Creates a callback action.
///
/// Shorthand for `Box::new(Callback::new(f))`.
#[inline]
pub fn callback<F>(f: F) -> BoxedAction
where
    F: FnMut() -> Result<()> + 'static,
{
    Box::new(Callback::new(f))
}

/// Creates a sequence node.
///
/// The first action is started immediately, as with
/// [`Sequence::add_action`] on an empty sequence.
pub fn sequence(actions: Vec<BoxedAction>) -> Result<BoxedAction> {
    Ok(Box::new(Sequence::from_actions(actions)?))
}

/// Creates a parallel node. Its children start when the node does.
#[inline]
pub fn parallel(actions: Vec<BoxedAction>) -> BoxedAction {
    Box::new(Parallel::from_actions(actions))
}

/// Boxes `action` and returns it along with a handle the caller keeps.
pub fn shared<A: Action + 'static>(action: A) -> (BoxedAction, Shared<A>) {
    let handle = Shared::new(action);
    (Box::new(handle.clone()), handle)
}
