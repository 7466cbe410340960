//! Error types raised by actions and composites.
//!
//! Two kinds of failure exist:
//!
//! - **Contract violations**: a caller drove an action out of order (update
//!   before start, end before over, a nested update on a composite that is
//!   already mid-pass). These indicate bugs in the caller and are reported
//!   loudly instead of corrupting composite state.
//! - **Child failures**: an action's own `start`/`update`/`end` failed.
//!   Composites never catch or translate these; they reach the caller of the
//!   composite unchanged.

use thiserror::Error;

/// Ways the lifecycle contract between a caller and an action can be broken.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ContractViolation {
    #[error("`{action}` was started while already running")]
    AlreadyStarted { action: &'static str },

    #[error("`{action}` received `{call}` without being started")]
    NotStarted {
        action: &'static str,
        call: &'static str,
    },

    #[error("`{action}` was ended before reporting over")]
    EndedEarly { action: &'static str },

    #[error("`{composite}` was driven again from inside its own pass")]
    Reentrant { composite: &'static str },

    #[error("invalid time step {dt}: must be finite and non-negative")]
    InvalidDelta { dt: f64 },
}

/// Errors surfaced by [`Action`](crate::Action) methods and composites.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("lifecycle contract violated: {0}")]
    Contract(#[from] ContractViolation),

    #[error("composite handle used after its composite was dropped")]
    Detached,

    /// Failure raised by the action itself.
    #[error(transparent)]
    Failed(Box<dyn std::error::Error + Send + Sync>),
}

impl ActionError {
    /// Wraps an arbitrary failure raised inside an action.
    pub fn failed<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Failed(error.into())
    }

    /// Returns the contract violation, if this error is one.
    pub fn as_contract(&self) -> Option<&ContractViolation> {
        match self {
            Self::Contract(violation) => Some(violation),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ActionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_keeps_the_original_message() {
        let err = ActionError::failed("fuse jammed");
        assert_eq!(err.to_string(), "fuse jammed");
        assert!(err.as_contract().is_none());
    }

    #[test]
    fn contract_violation_converts_and_formats() {
        let err: ActionError = ContractViolation::EndedEarly { action: "Wait" }.into();
        assert_eq!(
            err.as_contract(),
            Some(&ContractViolation::EndedEarly { action: "Wait" })
        );
        assert_eq!(
            err.to_string(),
            "lifecycle contract violated: `Wait` was ended before reporting over"
        );
    }
}
