//! `des-sched` — event queue, handler registry, and run loop for the `des`
//! discrete-event kernel.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`handler`]   | `Arity`, `HandlerEntry<H>`                                  |
//! | [`dispatch`]  | `Dispatcher` trait (host boundary, four entry points)       |
//! | [`closure`]   | `FnDispatcher<S, A>`, `FnHandler<S, A>`, `FnScheduler<S, A>` |
//! | [`registry`]  | `HandlerRegistry<H>` (per-code lists + init list)           |
//! | [`queue`]     | `EventQueue<A>` (min-heap + tombstones), `Popped<A>`        |
//! | [`scheduler`] | `Scheduler<D>`, `RunSummary`, `RunEnd`                      |
//! | [`builder`]   | `SchedulerBuilder<D>`                                       |
//! | [`observer`]  | `RunObserver<A>`, `NoopObserver`                            |
//!
//! # Run loop (summary)
//!
//! ```text
//! run():
//!   clock ← initial_time; stop request cleared
//!   call init handlers (every run, or first run only)
//!   while !stopped:
//!     next event beyond time_limit → return
//!     pop min (time, id)           → none left: return
//!     cancelled?                   → drop it, clock unchanged
//!     else clock ← event.time; call each handler for event.code in order
//! ```
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the registry and tombstones. |
//! | `serde`   | Serde derives on `des-core` ids, time, and config.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use des_core::EventCode;
//! use des_sched::{FnHandler, FnScheduler};
//!
//! const TICK: EventCode = EventCode(0);
//!
//! let mut sched: FnScheduler<u32, ()> = FnScheduler::with_state(0);
//! sched.on(TICK, FnHandler::empty(|count, s| {
//!     *count += 1;
//!     if *count < 10 {
//!         s.schedule_in(1.0, TICK, -1, None);
//!     }
//! }));
//! sched.schedule_bare(0.0, TICK);
//! sched.run()?;
//! assert_eq!(sched.state(), Some(&10));
//! ```

pub mod builder;
pub mod closure;
pub mod dispatch;
pub mod handler;
pub mod observer;
pub mod queue;
pub mod registry;
pub mod scheduler;


pub use builder::SchedulerBuilder;
pub use closure::{FnDispatcher, FnHandler, FnScheduler};
pub use dispatch::Dispatcher;
pub use handler::{Arity, HandlerEntry};
pub use observer::{NoopObserver, RunObserver};
pub use queue::{EventQueue, Popped};
pub use registry::HandlerRegistry;
pub use scheduler::{RunEnd, RunSummary, Scheduler};

#[cfg(feature = "fx-hash")]
pub(crate) type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(feature = "fx-hash")]
pub(crate) type Set<T> = rustc_hash::FxHashSet<T>;

#[cfg(not(feature = "fx-hash"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type Set<T> = std::collections::HashSet<T>;
