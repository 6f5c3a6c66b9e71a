//! Run observer trait for progress reporting and tracing.

use des_core::{Event, SimTime};

use crate::RunSummary;

/// Callbacks invoked by [`Scheduler::run_observed`][crate::Scheduler::run_observed]
/// at key points in the run loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Observers see events read-only; to react
/// to an event, register a handler instead.
///
/// # Example — dispatch counter
///
/// ```rust,ignore
/// struct Progress { every: u64, seen: u64 }
///
/// impl<A> RunObserver<A> for Progress {
///     fn on_dispatch(&mut self, event: &Event<A>, _handlers: usize) {
///         self.seen += 1;
///         if self.seen % self.every == 0 {
///             println!("{} events, clock {}", self.seen, event.time);
///         }
///     }
/// }
/// ```
pub trait RunObserver<A> {
    /// Called after the clock reset, before init handlers run.
    fn on_run_start(&mut self, _time: SimTime, _queued: usize) {}

    /// Called just before `event` is handed to its `handlers` registrations.
    /// The clock already reads `event.time`.
    fn on_dispatch(&mut self, _event: &Event<A>, _handlers: usize) {}

    /// Called when a cancelled event is popped and discarded.
    fn on_skip(&mut self, _event: &Event<A>) {}

    /// Called once when the loop exits.
    fn on_run_end(&mut self, _summary: &RunSummary) {}
}

/// A [`RunObserver`] that does nothing.  Used by [`Scheduler::run`][crate::Scheduler::run].
pub struct NoopObserver;

impl<A> RunObserver<A> for NoopObserver {}
