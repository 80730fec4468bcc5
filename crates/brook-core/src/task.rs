//! A single-threaded, cooperative task pool.
//!
//! Resource completions (and anything else spawned here) make progress only
//! while [`drain`] runs, which the host loop calls between updates. Tasks
//! and the pool are thread-local; nothing here is `Send`.

use std::cell::RefCell;
use std::future::Future;

use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;

thread_local! {
    static POOL: RefCell<LocalPool> = RefCell::new(LocalPool::new());
    // Kept separate from POOL so tasks can spawn while the pool is being
    // polled.
    static SPAWNER: LocalSpawner = POOL.with(|pool| pool.borrow().spawner());
}

/// Queues a future on this thread's pool.
pub fn spawn(fut: impl Future<Output = ()> + 'static) {
    let queued = SPAWNER.with(|s| s.spawn_local(fut));
    if let Err(err) = queued {
        log::error!("task::spawn failed: {err}");
    }
}

/// Polls queued tasks until every one is complete or stalled on a pending
/// future. Call from the host loop, never from inside a task.
pub fn drain() {
    POOL.with(|pool| match pool.try_borrow_mut() {
        Ok(mut pool) => pool.run_until_stalled(),
        Err(_) => log::warn!("task::drain called from inside a task; ignoring"),
    });
}
