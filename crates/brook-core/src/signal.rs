use std::cell::RefCell;
use std::rc::Rc;

use crate::reactive::{self, SourceId};

/// Observable, dependency-tracked value.
pub struct Signal<T: 'static> {
    id: SourceId,
    value: Rc<RefCell<T>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            id: reactive::next_source_id(),
            value: Rc::new(RefCell::new(value)),
        }
    }

    /// Reads the current value. Inside an observer this registers a
    /// dependency, so a later `set` re-runs it.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        reactive::track_read(self.id);
        self.value.borrow().clone()
    }

    /// Reads without registering a dependency.
    pub fn peek(&self) -> T
    where
        T: Clone,
    {
        self.value.borrow().clone()
    }

    /// Borrowing read for values that are expensive to clone. Tracked.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        reactive::track_read(self.id);
        f(&self.value.borrow())
    }

    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
        reactive::notify(self.id);
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.value.borrow_mut());
        reactive::notify(self.id);
    }

    pub fn id(&self) -> SourceId {
        self.id
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: self.value.clone(),
        }
    }
}

pub fn signal<T>(value: T) -> Signal<T> {
    Signal::new(value)
}
