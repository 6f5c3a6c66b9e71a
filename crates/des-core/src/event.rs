//! The immutable event record.
//!
//! # Attachment ownership
//!
//! An event may carry one opaque attachment handle of type `A`.  The kernel
//! never looks inside it; it only moves, clones and drops the handle.  With a
//! reference-counted handle such as `Rc<T>` or `Arc<T>` this gives exactly the
//! acquire/release contract hosts rely on:
//!
//! | Event operation | Handle operation          |
//! |-----------------|---------------------------|
//! | construction    | takes one counted handle  |
//! | `clone()`       | count + 1 (never a deep copy) |
//! | drop            | count - 1                 |
//!
//! Drop runs exactly once per event however it leaves the queue: dispatched,
//! discarded as cancelled, or dropped with the scheduler.

use std::cmp::Ordering;
use std::fmt;

use crate::{EventCode, EventId, SimTime};

/// `index` value used when the caller has nothing to put there.
pub const NO_INDEX: i64 = -1;

/// A single scheduled occurrence.
///
/// Ordered by `(time, id)`: earlier time first, and among events at the same
/// time, the one scheduled first.  Equality follows the same key, so two
/// events compare equal only when they share both time and id.
#[derive(Clone, Debug)]
pub struct Event<A> {
    pub id:         EventId,
    pub code:       EventCode,
    pub time:       SimTime,
    /// Caller-defined auxiliary integer (e.g. an entity slot).
    pub index:      i64,
    pub attachment: Option<A>,
}

impl<A> Event<A> {
    pub fn new(
        id:         EventId,
        code:       EventCode,
        time:       SimTime,
        index:      i64,
        attachment: Option<A>,
    ) -> Self {
        Self { id, code, time, index, attachment }
    }

    /// The `(time, id)` ordering key.
    #[inline]
    pub fn key(&self) -> (SimTime, EventId) {
        (self.time, self.id)
    }
}

impl<A> PartialEq for Event<A> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<A> Eq for Event<A> {}

impl<A> Ord for Event<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl<A> PartialOrd for Event<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> fmt::Display for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Event[id={}, code={}, {}, index={}, attachment={}]",
            self.id.0,
            self.code.0,
            self.time,
            self.index,
            if self.attachment.is_some() { "yes" } else { "no" },
        )
    }
}
