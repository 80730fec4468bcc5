use std::rc::Rc;

use crate::reactive;
use crate::scope::current_scope;
use crate::signal::{Signal, signal};

/// Computes a `Signal<T>` from other signals and recomputes it whenever one
/// of them changes.
///
/// The cascade is synchronous: by the time a `set` on a dependency returns,
/// the derived signal already holds the new value. `compute` runs once to
/// seed the signal and once more to establish the dependency set.
pub fn derived<T: Clone + 'static>(compute: impl Fn() -> T + 'static) -> Signal<T> {
    let compute = Rc::new(compute);
    let out = signal(compute());

    let key = reactive::register({
        let out = out.clone();
        let compute = compute.clone();
        move || out.set(compute())
    });
    // Initial run under tracking to collect dependencies.
    reactive::run_now(key);

    if let Some(scope) = current_scope() {
        scope.add_disposer(move || reactive::unregister(key));
    }

    out
}
