//! Lifecycle tracking for actions.
//!
//! [`Guarded`] records how far an action has been driven and rejects calls
//! that break the start/update/end ordering. Composites wrap every child in
//! one, and hosts can wrap actions they drive by hand.

use std::any::Any;

use crate::{Action, ContractViolation, Result};

/// Where an action is in its current activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Never started, or ended since the last start.
    #[default]
    Idle,

    /// Started and not yet ended.
    Running,
}

impl Phase {
    /// Returns `true` if this phase is `Idle`.
    #[inline]
    pub fn is_idle(self) -> bool {
        matches!(self, Phase::Idle)
    }

    /// Returns `true` if this phase is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Phase::Running)
    }
}

/// Enforces the action lifecycle around an inner action.
///
/// - `start` while running fails with [`ContractViolation::AlreadyStarted`]
/// - `update` or `end` while idle fails with [`ContractViolation::NotStarted`]
/// - `end` before the inner action reports over fails with
///   [`ContractViolation::EndedEarly`]
///
/// A `start` that fails leaves the action idle.
pub struct Guarded<A> {
    inner: A,
    phase: Phase,
}

impl<A: Action> Guarded<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            phase: Phase::Idle,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn get_ref(&self) -> &A {
        &self.inner
    }

    pub fn into_inner(self) -> A {
        self.inner
    }

    fn require_running(&self, call: &'static str) -> Result<()> {
        if self.phase.is_idle() {
            return Err(ContractViolation::NotStarted {
                action: self.inner.name(),
                call,
            }
            .into());
        }
        Ok(())
    }
}

impl<A: Action> Action for Guarded<A> {
    fn start(&mut self) -> Result<()> {
        if self.phase.is_running() {
            return Err(ContractViolation::AlreadyStarted {
                action: self.inner.name(),
            }
            .into());
        }
        self.inner.start()?;
        self.phase = Phase::Running;
        Ok(())
    }

    fn update(&mut self, dt: f64) -> Result<()> {
        self.require_running("update")?;
        self.inner.update(dt)
    }

    #[inline]
    fn is_over(&self) -> bool {
        self.inner.is_over()
    }

    fn end(&mut self) -> Result<()> {
        self.require_running("end")?;
        if !self.inner.is_over() {
            return Err(ContractViolation::EndedEarly {
                action: self.inner.name(),
            }
            .into());
        }
        self.phase = Phase::Idle;
        self.inner.end()
    }

    fn result(&self) -> Option<Box<dyn Any>> {
        self.inner.result()
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
