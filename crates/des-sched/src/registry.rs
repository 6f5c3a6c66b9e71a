//! `HandlerRegistry` — per-code handler lists and the init-handler list.
//!
//! Lists are stored behind `Rc` and edited copy-on-write.  The run loop
//! clones the `Rc` for the code it is about to dispatch, so a handler that
//! attaches or detaches registrations mid-dispatch edits a fresh copy and
//! never disturbs the iteration in progress.  When nothing is dispatching the
//! `Rc` is unique and `make_mut` edits in place.

use std::rc::Rc;

use des_core::{EventCode, HandlerId};

use crate::{Arity, HandlerEntry, Map};

/// Handler registrations keyed by [`EventCode`], in registration order.
pub struct HandlerRegistry<H> {
    by_code: Map<EventCode, Rc<Vec<HandlerEntry<H>>>>,
    init:    Rc<Vec<H>>,
    next_id: u64,
    /// Cached total registration count for O(1) `len()`.
    total:   usize,
}

impl<H: Clone> HandlerRegistry<H> {
    pub fn new() -> Self {
        Self {
            by_code: Map::default(),
            init:    Rc::new(Vec::new()),
            next_id: 0,
            total:   0,
        }
    }

    /// Append `handler` to `code`'s list.
    pub fn attach(&mut self, code: EventCode, handler: H, arity: Arity) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        let list = self.by_code.entry(code).or_default();
        Rc::make_mut(list).push(HandlerEntry { id, handler, arity });
        self.total += 1;
        id
    }

    /// Remove the registration `id` from `code`'s list.
    ///
    /// Returns `false` if no such registration exists under that code.
    pub fn detach(&mut self, code: EventCode, id: HandlerId) -> bool {
        let Some(list) = self.by_code.get_mut(&code) else {
            return false;
        };
        let Some(pos) = list.iter().position(|e| e.id == id) else {
            return false;
        };
        Rc::make_mut(list).remove(pos);
        if list.is_empty() {
            self.by_code.remove(&code);
        }
        self.total -= 1;
        true
    }

    /// Append `handler` to the init list.
    pub fn attach_init(&mut self, handler: H) {
        Rc::make_mut(&mut self.init).push(handler);
    }

    /// Registrations for `code`, empty if none were ever attached.
    pub fn handlers_for(&self, code: EventCode) -> &[HandlerEntry<H>] {
        self.by_code.get(&code).map(|l| l.as_slice()).unwrap_or(&[])
    }

    pub fn init_handlers(&self) -> &[H] {
        &self.init
    }

    /// Total registrations across all codes (init handlers excluded).
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Shared view of `code`'s list as it is right now.
    pub(crate) fn snapshot(&self, code: EventCode) -> Option<Rc<Vec<HandlerEntry<H>>>> {
        self.by_code.get(&code).cloned()
    }

    pub(crate) fn init_snapshot(&self) -> Rc<Vec<H>> {
        Rc::clone(&self.init)
    }
}

impl<H: Clone> Default for HandlerRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
