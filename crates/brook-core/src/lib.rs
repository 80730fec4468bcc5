//! # Signals, Effects, and Resources
//!
//! Brook is a small reactive core for driving views and dashboards from
//! changing data. There are three main pieces:
//!
//! - `Signal<T>` — observable, dependency-tracked value.
//! - `effect` / `derived` — side effects and computed values that re-run
//!   when the signals they read change.
//! - `resource` — an observable record fed by an asynchronous producer,
//!   re-fetched whenever one of its dependencies changes.
//!
//! ## Signals
//!
//! `Signal<T>` is a cloneable handle to a piece of state:
//!
//! ```rust
//! use brook_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! Reads participate in a dependency graph: when you call `get()` inside an
//! `effect`, `derived`, or a resource producer, future writes will
//! automatically re-run it.
//!
//! ## Derived state
//!
//! `derived` computes a `Signal<T>` from other signals and recomputes it
//! whenever a dependency changes:
//!
//! ```rust
//! use brook_core::*;
//!
//! let first = signal("Jane".to_string());
//! let last = signal("Doe".to_string());
//!
//! let full = derived({
//!     let first = first.clone();
//!     let last = last.clone();
//!     move || format!("{} {}", first.get(), last.get())
//! });
//!
//! assert_eq!(full.get(), "Jane Doe");
//! first.set("Joan".into());
//! assert_eq!(full.get(), "Joan Doe");
//! ```
//!
//! ## Effects
//!
//! `effect` runs immediately and again on every dependency change. It
//! returns a `Dispose` guard, and cleans itself up with the enclosing
//! [`Scope`] when one exists:
//!
//! ```rust
//! use brook_core::*;
//!
//! let count = signal(0);
//! let seen = std::rc::Rc::new(std::cell::Cell::new(0));
//!
//! let _watch = effect({
//!     let count = count.clone();
//!     let seen = seen.clone();
//!     move || seen.set(count.get())
//! });
//!
//! count.set(3);
//! assert_eq!(seen.get(), 3);
//! ```
//!
//! ## Resources
//!
//! `resource` turns an async producer into a record with a value and a
//! loading flag. The producer's synchronous reads are tracked, so changing
//! one of them re-fetches. Completions land when the task pool is drained:
//!
//! ```rust
//! use brook_core::*;
//!
//! let answer = resource(|| async { Ok::<_, LoadError>(6 * 7) });
//! assert!(answer.loading());
//!
//! task::drain();
//! assert_eq!(answer.value(), Some(42));
//! assert!(!answer.loading());
//! ```
//!
//! For producers that can fail, the record carries a tagged
//! [`Status`](resource::Status) instead of hanging in the loading state, and
//! stale completions from overlapping invocations are discarded.

pub mod derived;
pub mod effects;
pub mod error;
pub mod prelude;
pub mod reactive;
pub mod resource;
pub mod scope;
pub mod signal;
pub mod task;
pub mod tests;

pub use derived::*;
pub use effects::*;
pub use error::*;
pub use reactive::*;
pub use resource::*;
pub use scope::*;
pub use signal::*;
