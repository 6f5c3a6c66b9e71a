//! `FnDispatcher` — a ready-made dispatcher for handlers written as Rust closures.
//!
//! Hosts that bridge to another runtime implement [`Dispatcher`] themselves.
//! Pure-Rust simulations can use `FnDispatcher<S, A>` instead: the context
//! owner is a plain state value `S`, and every handler is a closure receiving
//! `&mut S` plus the scheduler.

use std::marker::PhantomData;
use std::rc::Rc;

use des_core::{EventCode, HandlerId, NO_INDEX};

use crate::{Arity, Dispatcher, Scheduler};

/// Scheduler driven by an [`FnDispatcher`].
pub type FnScheduler<S, A> = Scheduler<FnDispatcher<S, A>>;

type EmptyFn<S, A> = dyn Fn(&mut S, &mut FnScheduler<S, A>);
type IndexFn<S, A> = dyn Fn(&mut S, &mut FnScheduler<S, A>, i64);
type AttachmentFn<S, A> = dyn Fn(&mut S, &mut FnScheduler<S, A>, Option<&A>);
type IndexAttachmentFn<S, A> = dyn Fn(&mut S, &mut FnScheduler<S, A>, i64, Option<&A>);

/// A closure handler tagged with its arity class.
pub enum FnHandler<S, A: Clone> {
    Empty(Rc<EmptyFn<S, A>>),
    Index(Rc<IndexFn<S, A>>),
    Attachment(Rc<AttachmentFn<S, A>>),
    IndexAttachment(Rc<IndexAttachmentFn<S, A>>),
}

impl<S: 'static, A: Clone + 'static> FnHandler<S, A> {
    pub fn empty(f: impl Fn(&mut S, &mut FnScheduler<S, A>) + 'static) -> Self {
        FnHandler::Empty(Rc::new(f))
    }

    pub fn index(f: impl Fn(&mut S, &mut FnScheduler<S, A>, i64) + 'static) -> Self {
        FnHandler::Index(Rc::new(f))
    }

    pub fn attachment(f: impl Fn(&mut S, &mut FnScheduler<S, A>, Option<&A>) + 'static) -> Self {
        FnHandler::Attachment(Rc::new(f))
    }

    pub fn index_attachment(
        f: impl Fn(&mut S, &mut FnScheduler<S, A>, i64, Option<&A>) + 'static,
    ) -> Self {
        FnHandler::IndexAttachment(Rc::new(f))
    }
}

impl<S, A: Clone> FnHandler<S, A> {
    /// The arity class implied by the closure's signature.
    pub fn arity(&self) -> Arity {
        match self {
            FnHandler::Empty(_)           => Arity::Empty,
            FnHandler::Index(_)           => Arity::Index,
            FnHandler::Attachment(_)      => Arity::Attachment,
            FnHandler::IndexAttachment(_) => Arity::IndexAttachment,
        }
    }

    /// Call the closure with the arguments its signature takes.  Arguments
    /// the entry point did not supply arrive as `NO_INDEX` / `None`.
    fn invoke(&self, state: &mut S, sched: &mut FnScheduler<S, A>, index: i64, att: Option<&A>) {
        match self {
            FnHandler::Empty(f)           => f(state, sched),
            FnHandler::Index(f)           => f(state, sched, index),
            FnHandler::Attachment(f)      => f(state, sched, att),
            FnHandler::IndexAttachment(f) => f(state, sched, index, att),
        }
    }
}

impl<S, A: Clone> Clone for FnHandler<S, A> {
    fn clone(&self) -> Self {
        match self {
            FnHandler::Empty(f)           => FnHandler::Empty(Rc::clone(f)),
            FnHandler::Index(f)           => FnHandler::Index(Rc::clone(f)),
            FnHandler::Attachment(f)      => FnHandler::Attachment(Rc::clone(f)),
            FnHandler::IndexAttachment(f) => FnHandler::IndexAttachment(Rc::clone(f)),
        }
    }
}

// ── FnDispatcher ──────────────────────────────────────────────────────────────

/// Dispatcher whose context owner is a state value `S` and whose handlers are
/// [`FnHandler`] closures.  `A` is the attachment handle type.
pub struct FnDispatcher<S, A> {
    state:   S,
    _marker: PhantomData<fn() -> A>,
}

impl<S, A> FnDispatcher<S, A> {
    pub fn new(state: S) -> Self {
        Self { state, _marker: PhantomData }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S, A: Clone> Dispatcher for FnDispatcher<S, A> {
    type Handler = FnHandler<S, A>;
    type Attachment = A;

    fn call_empty(&mut self, sched: &mut Scheduler<Self>, handler: &Self::Handler) {
        handler.invoke(&mut self.state, sched, NO_INDEX, None);
    }

    fn call_index(&mut self, sched: &mut Scheduler<Self>, handler: &Self::Handler, index: i64) {
        handler.invoke(&mut self.state, sched, index, None);
    }

    fn call_attachment(
        &mut self,
        sched:      &mut Scheduler<Self>,
        handler:    &Self::Handler,
        attachment: Option<&A>,
    ) {
        handler.invoke(&mut self.state, sched, NO_INDEX, attachment);
    }

    fn call_index_attachment(
        &mut self,
        sched:      &mut Scheduler<Self>,
        handler:    &Self::Handler,
        index:      i64,
        attachment: Option<&A>,
    ) {
        handler.invoke(&mut self.state, sched, index, attachment);
    }
}

impl<S, A: Clone> Scheduler<FnDispatcher<S, A>> {
    /// Create a scheduler around `state` with the default configuration.
    pub fn with_state(state: S) -> Self {
        Scheduler::new(FnDispatcher::new(state))
    }

    /// Register `handler` for `code` under the arity its closure declares.
    pub fn on(&mut self, code: EventCode, handler: FnHandler<S, A>) -> HandlerId {
        let arity = handler.arity();
        self.attach_handler(code, handler, arity)
    }

    /// The host state, or `None` while `run` is in progress (handlers get it
    /// as their first argument instead).
    pub fn state(&self) -> Option<&S> {
        self.context().map(FnDispatcher::state)
    }

    pub fn state_mut(&mut self) -> Option<&mut S> {
        self.context_mut().map(FnDispatcher::state_mut)
    }
}
