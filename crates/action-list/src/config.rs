//! Scheduler configuration.
//!
//! [`SchedulerConfig`] controls how a sequence hands out `dt` and whether
//! time steps are validated.

use crate::{ContractViolation, Result};

/// How a single `update(dt)` on a sequence hands out its time step when
/// finished children are drained and successors are activated in the same
/// call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeltaPolicy {
    /// At most one child consumes `dt` per call: the first one found not over.
    /// Successors activated after it are only checked for completion.
    #[default]
    ConsumeOnce,

    /// Every child activated during the call that is not already over is
    /// updated with the same `dt`.
    Forward,
}

/// Scheduler configuration and tunable parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerConfig {
    pub delta_policy: DeltaPolicy,
    /// Reject negative or non-finite time steps with
    /// [`ContractViolation::InvalidDelta`].
    pub validate_delta: bool,
}

impl SchedulerConfig {
    pub const DEFAULT_DELTA_POLICY: DeltaPolicy = DeltaPolicy::ConsumeOnce;
    pub const DEFAULT_VALIDATE_DELTA: bool = true;

    pub const fn new() -> Self {
        Self {
            delta_policy: Self::DEFAULT_DELTA_POLICY,
            validate_delta: Self::DEFAULT_VALIDATE_DELTA,
        }
    }

    pub fn with_delta_policy(self, delta_policy: DeltaPolicy) -> Self {
        Self {
            delta_policy,
            ..self
        }
    }

    pub fn with_validate_delta(self, validate_delta: bool) -> Self {
        Self {
            validate_delta,
            ..self
        }
    }

    /// Checks `dt` against the validation setting.
    pub fn check_delta(&self, dt: f64) -> Result<()> {
        if self.validate_delta && !(dt.is_finite() && dt >= 0.0) {
            return Err(ContractViolation::InvalidDelta { dt }.into());
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}
