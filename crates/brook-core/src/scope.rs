use std::cell::RefCell;
use std::rc::{Rc, Weak};

thread_local! {
    static CURRENT: RefCell<Vec<Weak<ScopeInner>>> = const { RefCell::new(Vec::new()) };
}

/// Lifecycle context that owns effects and resources created inside it.
///
/// Disposing a scope tears down its children first, then runs every
/// registered disposer. Dropping the last handle does the same.
pub struct Scope {
    inner: Rc<ScopeInner>,
}

#[derive(Default)]
struct ScopeInner {
    disposers: RefCell<Vec<Box<dyn FnOnce()>>>,
    children: RefCell<Vec<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ScopeInner::default()),
        }
    }

    /// Installs this scope as the current one for the duration of `f`.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        CURRENT.with(|st| st.borrow_mut().push(Rc::downgrade(&self.inner)));
        let out = f();
        CURRENT.with(|st| {
            st.borrow_mut().pop();
        });
        out
    }

    pub fn add_disposer(&self, f: impl FnOnce() + 'static) {
        self.inner.disposers.borrow_mut().push(Box::new(f));
    }

    pub fn child(&self) -> Scope {
        let child = Scope::new();
        self.inner.children.borrow_mut().push(child.clone());
        child
    }

    pub fn dispose(self) {
        self.inner.teardown();
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Scope {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl ScopeInner {
    // Safe to run more than once: both lists are drained up front.
    fn teardown(&self) {
        let children = std::mem::take(&mut *self.children.borrow_mut());
        for child in children {
            child.dispose();
        }

        let disposers = std::mem::take(&mut *self.disposers.borrow_mut());
        for disposer in disposers {
            disposer();
        }
    }
}

impl Drop for ScopeInner {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// The innermost scope currently running, if any.
pub fn current_scope() -> Option<Scope> {
    CURRENT.with(|st| {
        st.borrow()
            .last()
            .and_then(Weak::upgrade)
            .map(|inner| Scope { inner })
    })
}

/// Runs `f` when the current scope is torn down. Outside any scope the
/// callback is dropped with a warning.
pub fn on_scope_dispose(f: impl FnOnce() + 'static) {
    match current_scope() {
        Some(scope) => scope.add_disposer(f),
        None => log::warn!("on_scope_dispose called outside a scope; cleanup will never run"),
    }
}
