//! Core action trait.
//!
//! This module defines the [`Action`] trait, the unit of deferred or
//! time-extended work that every leaf and composite implements. Composites
//! hold children as [`BoxedAction`] and drive them only through this trait.

use std::any::Any;

use crate::Result;

/// A unit of work driven by repeated `update(dt)` calls.
///
/// # Lifecycle
///
/// One activation runs `start`, then zero or more `update`s while
/// [`is_over`](Action::is_over) is false, then exactly one `end` right after
/// `is_over` first reports true (possibly straight after `start`). An action
/// may be started again after `end`; `start` must reset whatever timers or
/// counters the previous activation left behind.
///
/// An action that is removed without completing never sees `end`.
pub trait Action {
    /// Begins an activation.
    fn start(&mut self) -> Result<()> {
        Ok(())
    }

    /// Advances the action by `dt` in the host's time unit.
    fn update(&mut self, _dt: f64) -> Result<()> {
        Ok(())
    }

    /// Returns `true` once this activation has finished.
    ///
    /// Must be free of side effects; callers may ask repeatedly.
    fn is_over(&self) -> bool;

    /// Completes an activation after it reported over.
    fn end(&mut self) -> Result<()> {
        Ok(())
    }

    /// A value produced by the action, if it has one.
    fn result(&self) -> Option<Box<dyn Any>> {
        None
    }

    /// Name used in logs and error reports.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Owned, dynamically dispatched action as stored by composites.
pub type BoxedAction = Box<dyn Action>;

/// Blanket implementation for boxed actions.
///
/// This allows `Box<dyn Action>` to be wrapped by generic decorators such as
/// [`Guarded`](crate::Guarded) and [`Shared`](crate::Shared).
impl Action for Box<dyn Action> {
    #[inline]
    fn start(&mut self) -> Result<()> {
        (**self).start()
    }

    #[inline]
    fn update(&mut self, dt: f64) -> Result<()> {
        (**self).update(dt)
    }

    #[inline]
    fn is_over(&self) -> bool {
        (**self).is_over()
    }

    #[inline]
    fn end(&mut self) -> Result<()> {
        (**self).end()
    }

    #[inline]
    fn result(&self) -> Option<Box<dyn Any>> {
        (**self).result()
    }

    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }
}
