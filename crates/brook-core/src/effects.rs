use std::cell::RefCell;
use std::rc::Rc;

use crate::reactive;
use crate::scope::current_scope;

/// Cleanup guard; runs its closure at most once.
#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Safe to call multiple times.
    pub fn run(&self) {
        if let Some(f) = self.0.borrow_mut().take() {
            f()
        }
    }
}

/// Registers `f` as an observer, runs it once immediately under tracking,
/// and re-runs it whenever a signal it read changes.
///
/// The returned guard detaches the observer. Inside a scope the guard is
/// also attached to that scope, so the effect dies with it; outside any
/// scope the observer lives for the rest of the thread unless the guard is
/// run by hand.
pub fn effect(f: impl Fn() + 'static) -> Dispose {
    let key = reactive::register(f);
    reactive::run_now(key);

    let dispose = Dispose::new(move || reactive::unregister(key));
    if let Some(scope) = current_scope() {
        let d = dispose.clone();
        scope.add_disposer(move || d.run());
    }
    dispose
}
