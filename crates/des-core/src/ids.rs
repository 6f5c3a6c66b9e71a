//! Strongly typed identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can key maps and sets without
//! ceremony.  The inner integer is `pub` so hosts that speak raw integers
//! (foreign callers, config files) can convert at the boundary.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The wrapped integer.
            #[inline(always)]
            pub fn raw(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> $name {
                $name(raw)
            }
        }
    };
}

typed_id! {
    /// Identity of one scheduled event.  Issued from 1 upwards and never
    /// reused by the scheduler that issued it.
    pub struct EventId(u64);
}

typed_id! {
    /// Event kind.  Only ever used as the handler-registry lookup key.
    pub struct EventCode(u32);
}

typed_id! {
    /// Identity of one handler registration, returned by `attach_handler`.
    pub struct HandlerId(u64);
}

// ── EventIdGen ────────────────────────────────────────────────────────────────

/// Strictly increasing event-ID generator.
///
/// The first ID minted is `EventId(1)`; `EventId(0)` is never issued, which
/// lets hosts use 0 as a "no event" marker.
#[derive(Clone, Debug)]
pub struct EventIdGen {
    next: u64,
}

impl EventIdGen {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Mint the next ID.
    #[inline]
    pub fn next_id(&mut self) -> EventId {
        let id = EventId(self.next);
        self.next += 1;
        id
    }

    /// The ID the next call to [`next_id`](Self::next_id) will return.
    #[inline]
    pub fn peek(&self) -> EventId {
        EventId(self.next)
    }

    /// Has `id` already been handed out by this generator?
    #[inline]
    pub fn was_issued(&self, id: EventId) -> bool {
        id.0 >= 1 && id.0 < self.next
    }
}

impl Default for EventIdGen {
    fn default() -> Self {
        Self::new()
    }
}
