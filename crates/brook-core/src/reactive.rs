//! The dependency graph behind signals and effects.
//!
//! Observers are closures registered with [`register`]. While an observer
//! runs, every [`track_read`] call records an edge from the source to the
//! observer; [`notify`] re-runs the dependents of a source. Edges are
//! cleared before each re-run, so an observer's dependency set always
//! reflects its most recent execution.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use slotmap::{SecondaryMap, SlotMap, new_key_type};
use smallvec::{SmallVec, smallvec};

new_key_type! {
    /// Handle to a registered observer closure.
    pub struct ObserverKey;
}

/// Identity of a trackable source (one per signal).
pub type SourceId = u64;

type KeyList = SmallVec<[ObserverKey; 4]>;
type SourceList = SmallVec<[SourceId; 4]>;

thread_local! {
    static ACTIVE: RefCell<Option<ObserverKey>> = const { RefCell::new(None) };
    static GRAPH: RefCell<Graph> = RefCell::new(Graph::default());
}

#[derive(Default)]
struct Graph {
    next_source: SourceId,
    observers: SlotMap<ObserverKey, Rc<dyn Fn()>>,
    // source -> observers that read it on their last run
    dependents: HashMap<SourceId, KeyList>,
    // observer -> sources it read on its last run
    reads: SecondaryMap<ObserverKey, SourceList>,
    running: Vec<ObserverKey>,
}

impl Graph {
    fn clear_reads(&mut self, key: ObserverKey) {
        if let Some(sources) = self.reads.remove(key) {
            for src in sources {
                if let Some(deps) = self.dependents.get_mut(&src) {
                    deps.retain(|k| *k != key);
                }
            }
        }
    }
}

/// Allocates an id for a new trackable source.
pub fn next_source_id() -> SourceId {
    GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        g.next_source += 1;
        g.next_source
    })
}

/// Records a read of `src` by the active observer, if any.
pub fn track_read(src: SourceId) {
    ACTIVE.with(|active| {
        if let Some(key) = *active.borrow() {
            GRAPH.with(|g| {
                let mut g = g.borrow_mut();
                let deps = g.dependents.entry(src).or_default();
                if !deps.contains(&key) {
                    deps.push(key);
                }
                match g.reads.get_mut(key) {
                    Some(list) => {
                        if !list.contains(&src) {
                            list.push(src);
                        }
                    }
                    None => {
                        g.reads.insert(key, smallvec![src]);
                    }
                }
            });
        }
    });
}

/// Synchronously re-runs every observer that depends on `src`.
pub fn notify(src: SourceId) {
    let queue: KeyList =
        GRAPH.with(|g| g.borrow().dependents.get(&src).cloned().unwrap_or_default());
    for key in queue {
        run_observer(key);
    }
}

/// Registers a new observer closure. It does not run until [`run_now`] or a
/// [`notify`] on one of its sources.
pub fn register(f: impl Fn() + 'static) -> ObserverKey {
    let f: Rc<dyn Fn()> = Rc::new(f);
    GRAPH.with(|g| g.borrow_mut().observers.insert(f))
}

/// Removes an observer and all of its dependency edges.
pub fn unregister(key: ObserverKey) {
    GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        g.clear_reads(key);
        g.observers.remove(key);
        g.running.retain(|k| *k != key);
    });
}

/// Runs an observer immediately under tracking, re-collecting its edges.
pub fn run_now(key: ObserverKey) {
    run_observer(key);
}

fn run_observer(key: ObserverKey) {
    let f = GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        if g.running.contains(&key) {
            // An observer wrote a source it also reads; breaking the cycle.
            log::trace!("skipping re-entrant observer {key:?}");
            return None;
        }
        let f = g.observers.get(key).cloned()?;
        g.running.push(key);
        g.clear_reads(key);
        Some(f)
    });
    let Some(f) = f else { return };

    // The graph borrow is released while user code runs, so observers may
    // freely read and write signals.
    ACTIVE.with(|active| {
        let prev = active.borrow_mut().replace(key);
        f();
        *active.borrow_mut() = prev;
    });

    GRAPH.with(|g| g.borrow_mut().running.retain(|k| *k != key));
}
