//! Leaf actions.

use std::any::Any;

use crate::{Action, Result};

/// Does nothing until `duration` has elapsed, blocking whatever sequence it
/// sits in.
///
/// `result()` yields the elapsed time as an `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Wait {
    duration: f64,
    elapsed: f64,
}

impl Wait {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn remaining(&self) -> f64 {
        (self.duration - self.elapsed).max(0.0)
    }
}

impl Action for Wait {
    fn start(&mut self) -> Result<()> {
        // Reused waits count from zero again.
        self.elapsed = 0.0;
        Ok(())
    }

    fn update(&mut self, dt: f64) -> Result<()> {
        self.elapsed += dt;
        Ok(())
    }

    fn is_over(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn result(&self) -> Option<Box<dyn Any>> {
        Some(Box::new(self.elapsed))
    }

    fn name(&self) -> &'static str {
        "Wait"
    }
}

/// Invokes a closure when started and finishes immediately.
///
/// An error returned by the closure fails the `start` call.
pub struct Callback<F> {
    callback: F,
}

impl<F> Callback<F>
where
    F: FnMut() -> Result<()>,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> Action for Callback<F>
where
    F: FnMut() -> Result<()>,
{
    fn start(&mut self) -> Result<()> {
        (self.callback)()
    }

    fn is_over(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "Callback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ActionError;

    #[test]
    fn wait_finishes_after_duration() {
        let mut wait = Wait::new(2.0);
        wait.start().unwrap();
        wait.update(1.5).unwrap();
        assert!(!wait.is_over());
        assert_eq!(wait.remaining(), 0.5);
        wait.update(0.5).unwrap();
        assert!(wait.is_over());
        assert_eq!(wait.remaining(), 0.0);
    }

    #[test]
    fn zero_wait_is_over_after_start() {
        let mut wait = Wait::new(0.0);
        wait.start().unwrap();
        assert!(wait.is_over());
    }

    #[test]
    fn wait_result_is_elapsed_time() {
        let mut wait = Wait::new(1.0);
        wait.start().unwrap();
        wait.update(0.25).unwrap();
        let elapsed = wait.result().and_then(|value| value.downcast::<f64>().ok());
        assert_eq!(elapsed.as_deref(), Some(&0.25));
    }

    #[test]
    fn callback_error_fails_start() {
        let mut callback = Callback::new(|| Err(ActionError::failed("no target")));
        let err = callback.start().unwrap_err();
        assert_eq!(err.to_string(), "no target");
        assert!(callback.is_over());
    }
}
