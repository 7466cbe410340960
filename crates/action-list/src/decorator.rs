//! Decorator actions.
//!
//! Decorators wrap a single action and change how it can be reached. This
//! module provides [`Shared`], which lets a host keep access to an action
//! after handing it to a composite.

use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::{Action, Result};

/// Shared ownership of an action.
///
/// Every clone refers to the same action. Give one clone to a composite and
/// keep another to inspect progress or read results once it finishes.
///
/// Borrowing the action from inside one of its own methods panics, as with
/// any `RefCell`.
pub struct Shared<A> {
    inner: Rc<RefCell<A>>,
}

impl<A> Shared<A> {
    pub fn new(action: A) -> Self {
        Self {
            inner: Rc::new(RefCell::new(action)),
        }
    }

    pub fn borrow(&self) -> Ref<'_, A> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, A> {
        self.inner.borrow_mut()
    }
}

impl<A> Clone for Shared<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A: Action> Action for Shared<A> {
    fn start(&mut self) -> Result<()> {
        self.inner.borrow_mut().start()
    }

    fn update(&mut self, dt: f64) -> Result<()> {
        self.inner.borrow_mut().update(dt)
    }

    fn is_over(&self) -> bool {
        self.inner.borrow().is_over()
    }

    fn end(&mut self) -> Result<()> {
        self.inner.borrow_mut().end()
    }

    fn result(&self) -> Option<Box<dyn Any>> {
        self.inner.borrow().result()
    }

    fn name(&self) -> &'static str {
        self.inner.borrow().name()
    }
}
