//! Async resources: observable records fed by an asynchronous producer.
//!
//! A resource couples a producer (`Fn() -> Future<Output = Result<T, E>>`)
//! to a record holding the last resolved value and a tagged status. The
//! producer's synchronous reads are tracked like any other observer, so a
//! change to a signal it read re-invokes it; the returned future is handed
//! to the [`task`](crate::task) pool and its completion is applied on the
//! next drain.
//!
//! Two rules keep the record coherent:
//!
//! - `value` and `status` live in one signal and always change together.
//!   While a re-fetch is in flight (or after a failure) the previous value
//!   stays readable, so views can keep rendering stale data.
//! - Each invocation carries a generation; a completion is applied only if
//!   its generation is still the latest and the owning scope has not been
//!   disposed. Overlapping invocations therefore settle on the most recent
//!   one, never on whichever happened to finish last.
//!
//! A failed producer moves the record to [`Status::Error`] instead of
//! leaving it loading forever.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use web_time::Instant;

use crate::error::LoadError;
use crate::reactive::{self, ObserverKey};
use crate::scope::current_scope;
use crate::signal::{Signal, signal};
use crate::task;

/// Tagged outcome of the latest producer invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status<E> {
    Loading,
    Ready,
    Error(E),
}

impl<E> Status<E> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Status::Loading)
    }
}

/// Snapshot of a resource record.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResourceState<T, E = LoadError> {
    /// Last resolved result, or the caller-supplied seed before the first
    /// resolution. Retained across re-fetches and failures.
    pub value: Option<T>,
    pub status: Status<E>,
    /// When the last successful resolution was applied.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub updated_at: Option<Instant>,
}

/// Cloneable handle to a resource record.
///
/// All accessors are tracked: reading one inside an `effect` subscribes the
/// effect to record changes.
pub struct Resource<T: 'static, E: 'static = LoadError> {
    state: Signal<ResourceState<T, E>>,
    live: Rc<Cell<bool>>,
    observer: ObserverKey,
}

impl<T: Clone, E: Clone> Resource<T, E> {
    /// Last resolved value, or the seed.
    pub fn value(&self) -> Option<T> {
        self.state.with(|s| s.value.clone())
    }

    /// True while the latest invocation is still in flight.
    pub fn loading(&self) -> bool {
        self.state.with(|s| s.status.is_loading())
    }

    pub fn error(&self) -> Option<E> {
        self.state.with(|s| match &s.status {
            Status::Error(err) => Some(err.clone()),
            _ => None,
        })
    }

    pub fn status(&self) -> Status<E> {
        self.state.with(|s| s.status.clone())
    }

    /// The whole record, read as a unit.
    pub fn snapshot(&self) -> ResourceState<T, E> {
        self.state.get()
    }

    pub fn updated_at(&self) -> Option<Instant> {
        self.state.with(|s| s.updated_at)
    }

    /// Re-runs the producer now, regardless of dependency changes.
    pub fn refresh(&self) {
        if !self.live.get() {
            log::warn!("refresh on a resource whose scope was disposed; ignoring");
            return;
        }
        reactive::run_now(self.observer);
    }
}

impl<T, E> Clone for Resource<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            live: self.live.clone(),
            observer: self.observer,
        }
    }
}

/// Creates a resource with no seed value; `value()` is `None` until the
/// first resolution.
pub fn resource<T, E, Fut>(producer: impl Fn() -> Fut + 'static) -> Resource<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    make(None, producer)
}

/// Creates a resource seeded with `initial`; the seed is readable until the
/// first resolution replaces it.
pub fn resource_with_initial<T, E, Fut>(
    initial: T,
    producer: impl Fn() -> Fut + 'static,
) -> Resource<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    make(Some(initial), producer)
}

fn make<T, E, Fut>(initial: Option<T>, producer: impl Fn() -> Fut + 'static) -> Resource<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    let state = signal(ResourceState {
        value: initial,
        status: Status::Loading,
        updated_at: None,
    });
    let generation = Rc::new(Cell::new(0u64));
    let live = Rc::new(Cell::new(true));

    let observer = reactive::register({
        let state = state.clone();
        let generation = generation.clone();
        let live = live.clone();
        move || {
            if !live.get() {
                return;
            }
            let seq = generation.get().wrapping_add(1);
            generation.set(seq);

            state.update(|s| s.status = Status::Loading);

            // The synchronous part of the producer runs under tracking;
            // signals it reads here become this observer's dependencies.
            let fut = producer();

            task::spawn({
                let state = state.clone();
                let generation = generation.clone();
                let live = live.clone();
                async move {
                    let outcome = fut.await;
                    if !live.get() || generation.get() != seq {
                        log::debug!("discarding stale resource completion (invocation {seq})");
                        return;
                    }
                    match outcome {
                        Ok(value) => state.update(|s| {
                            s.value = Some(value);
                            s.status = Status::Ready;
                            s.updated_at = Some(Instant::now());
                        }),
                        Err(err) => state.update(|s| s.status = Status::Error(err)),
                    }
                }
            });
        }
    });
    reactive::run_now(observer);

    if let Some(scope) = current_scope() {
        let live = live.clone();
        scope.add_disposer(move || {
            live.set(false);
            reactive::unregister(observer);
        });
    }

    Resource {
        state,
        live,
        observer,
    }
}
