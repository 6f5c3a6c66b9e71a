//! `EventQueue` — time-ordered event heap with lazy cancellation.
//!
//! # Why tombstones
//!
//! `BinaryHeap` cannot remove an arbitrary element without an O(n) scan and
//! rebuild.  Cancelling therefore only records the id in a tombstone set;
//! the event stays in the heap until it reaches the top, where `pop` reports
//! it as [`Popped::Cancelled`] and clears its tombstone.  Push and pop stay
//! O(log n); cancel is O(1).
//!
//! # Tombstone growth
//!
//! Under [`CancelPolicy::Tombstone`] any issued id can be tombstoned,
//! including ids whose events already left the queue.  Those entries are
//! never popped and so never cleared.  [`CancelPolicy::PendingOnly`] tracks
//! the ids still in the heap and ignores everything else, which bounds the
//! set by the queue length.
//!
//! Ids the queue has not issued yet are ignored under both policies, so a
//! stray cancel can never hit an event scheduled later.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use des_core::{CancelPolicy, Event, EventCode, EventId, EventIdGen, SimTime};

use crate::Set;

/// Result of a single [`EventQueue::pop`].
#[derive(Debug)]
pub enum Popped<A> {
    /// Not cancelled: dispatch it.
    Live(Event<A>),
    /// Cancelled while queued: discard it.
    Cancelled(Event<A>),
}

/// A min-priority queue of events ordered by `(time, id)`.
pub struct EventQueue<A> {
    heap:       BinaryHeap<Reverse<Event<A>>>,
    tombstones: Set<EventId>,
    /// Ids currently in `heap`.  Only maintained under `PendingOnly`.
    pending:    Option<Set<EventId>>,
    ids:        EventIdGen,
}

impl<A> EventQueue<A> {
    pub fn new(policy: CancelPolicy) -> Self {
        let pending = match policy {
            CancelPolicy::Tombstone   => None,
            CancelPolicy::PendingOnly => Some(Set::default()),
        };
        Self {
            heap:       BinaryHeap::new(),
            tombstones: Set::default(),
            pending,
            ids:        EventIdGen::new(),
        }
    }

    /// Mint the next id, enqueue the event, and return the id.
    pub fn push(
        &mut self,
        time:       SimTime,
        code:       EventCode,
        index:      i64,
        attachment: Option<A>,
    ) -> EventId {
        let id = self.ids.next_id();
        if let Some(pending) = &mut self.pending {
            pending.insert(id);
        }
        self.heap.push(Reverse(Event::new(id, code, time, index, attachment)));
        id
    }

    /// Mark `id` for skip-on-pop.  Never fails; see the module docs for which
    /// ids are actually recorded.
    pub fn cancel(&mut self, id: EventId) {
        let record = match &self.pending {
            None          => self.ids.was_issued(id),
            Some(pending) => pending.contains(&id),
        };
        if record {
            self.tombstones.insert(id);
        }
    }

    /// Remove the earliest event, reporting whether it was cancelled.
    ///
    /// A cancelled event's tombstone is cleared as it is popped.
    pub fn pop(&mut self) -> Option<Popped<A>> {
        let Reverse(event) = self.heap.pop()?;
        if let Some(pending) = &mut self.pending {
            pending.remove(&event.id);
        }
        if self.tombstones.remove(&event.id) {
            Some(Popped::Cancelled(event))
        } else {
            Some(Popped::Live(event))
        }
    }

    /// Time of the earliest queued event, cancelled or not.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|Reverse(e)| e.time)
    }

    /// Is `id` currently tombstoned?
    pub fn is_cancelled(&self, id: EventId) -> bool {
        self.tombstones.contains(&id)
    }

    /// Queued events, including cancelled ones not yet popped.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn tombstone_count(&self) -> usize {
        self.tombstones.len()
    }

    /// The id the next `push` will return.
    pub fn next_id(&self) -> EventId {
        self.ids.peek()
    }

    /// Drop every queued event and all tombstones.  The id sequence is not
    /// reset, so ids issued before the clear are never handed out again.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.tombstones.clear();
        if let Some(pending) = &mut self.pending {
            pending.clear();
        }
    }
}
