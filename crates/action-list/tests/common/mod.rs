//! Shared test fixtures: a probe action that records every lifecycle call.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use action_list::{Action, Result};

pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// Entries of the form `label:call`, e.g. `A:start`.
pub fn calls(journal: &Journal, call: &str) -> Vec<String> {
    let suffix = format!(":{call}");
    journal
        .borrow()
        .iter()
        .filter_map(|entry| entry.strip_suffix(&suffix).map(str::to_owned))
        .collect()
}

pub fn position(journal: &Journal, entry: &str) -> Option<usize> {
    journal.borrow().iter().position(|e| e == entry)
}

type Hook = Box<dyn FnMut() -> Result<()>>;

/// A timed action that logs `start`, `update` and `end` into a journal.
pub struct Probe {
    label: &'static str,
    duration: f64,
    elapsed: f64,
    journal: Journal,
    on_end: Option<Hook>,
}

impl Probe {
    pub fn new(label: &'static str, duration: f64, journal: &Journal) -> Self {
        Self {
            label,
            duration,
            elapsed: 0.0,
            journal: Rc::clone(journal),
            on_end: None,
        }
    }

    pub fn on_end<F>(mut self, hook: F) -> Self
    where
        F: FnMut() -> Result<()> + 'static,
    {
        self.on_end = Some(Box::new(hook));
        self
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    fn log(&self, call: &str) {
        self.journal
            .borrow_mut()
            .push(format!("{}:{call}", self.label));
    }
}

impl Action for Probe {
    fn start(&mut self) -> Result<()> {
        self.log("start");
        self.elapsed = 0.0;
        Ok(())
    }

    fn update(&mut self, dt: f64) -> Result<()> {
        self.log("update");
        self.elapsed += dt;
        Ok(())
    }

    fn is_over(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn end(&mut self) -> Result<()> {
        self.log("end");
        match self.on_end.as_mut() {
            Some(hook) => hook(),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        self.label
    }
}
