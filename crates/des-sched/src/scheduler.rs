//! The `Scheduler` struct and its run loop.

use std::rc::Rc;

use des_core::{
    DesError, DesResult, Event, EventCode, EventId, HandlerId, InitPolicy, NO_INDEX,
    SchedulerConfig, SimTime,
};
use log::{debug, trace};

use crate::{
    Arity, Dispatcher, EventQueue, HandlerEntry, HandlerRegistry, NoopObserver, Popped,
    RunObserver, SchedulerBuilder,
};

// ── Run summary ───────────────────────────────────────────────────────────────

/// Why a call to `run` returned.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RunEnd {
    /// The queue ran empty.
    Exhausted,
    /// A handler called [`Scheduler::stop`].
    Stopped,
    /// The next event lies beyond `SchedulerConfig::time_limit`.
    TimeLimit,
}

/// Counters for one call to `run`.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Events popped and dispatched (including events no handler listened to).
    pub dispatched:    u64,
    /// Cancelled events popped and discarded.
    pub skipped:       u64,
    /// Per-event handler invocations.
    pub handler_calls: u64,
    /// Init handler invocations.
    pub init_calls:    u64,
    /// Clock value when the loop exited.
    pub final_time:    SimTime,
    pub end:           RunEnd,
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// A discrete-event scheduler.
///
/// `Scheduler<D>` owns the event queue, the tombstone set, the handler
/// registry and the simulation clock, and drives the run loop:
///
/// 1. Reset the clock to `config.initial_time`.
/// 2. Invoke init handlers in registration order (every run, or only the
///    first, per [`InitPolicy`]).
/// 3. Until the queue is empty or [`stop`](Self::stop) was called:
///    - pop the earliest event by `(time, id)`;
///    - if it was cancelled, discard it without touching the clock;
///    - otherwise set the clock to its time and hand it to every handler
///      registered for its code, in registration order.
///
/// The loop is single-threaded and synchronous.  Handlers run inside it and
/// may schedule, cancel, attach, detach or stop through the `&mut Scheduler`
/// their dispatcher receives.
///
/// Events left in the queue when the scheduler is dropped are dropped with it,
/// releasing their attachments.
pub struct Scheduler<D: Dispatcher> {
    config:     SchedulerConfig,
    queue:      EventQueue<D::Attachment>,
    registry:   HandlerRegistry<D::Handler>,
    /// The context owner.  `None` exactly while `run` is in progress.
    dispatcher: Option<D>,
    clock:      SimTime,
    stopped:    bool,
    init_done:  bool,
}

impl<D: Dispatcher> Scheduler<D> {
    /// Create a scheduler with the default configuration.
    pub fn new(dispatcher: D) -> Self {
        Self::from_parts(dispatcher, SchedulerConfig::default())
    }

    /// Create a scheduler with an explicit configuration.
    pub fn with_config(dispatcher: D, config: SchedulerConfig) -> DesResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(dispatcher, config))
    }

    /// Start a [`SchedulerBuilder`].
    pub fn builder(dispatcher: D) -> SchedulerBuilder<D> {
        SchedulerBuilder::new(dispatcher)
    }

    pub(crate) fn from_parts(dispatcher: D, config: SchedulerConfig) -> Self {
        Self {
            queue:      EventQueue::new(config.cancel_policy),
            registry:   HandlerRegistry::new(),
            dispatcher: Some(dispatcher),
            clock:      config.start_time(),
            stopped:    false,
            init_done:  false,
            config,
        }
    }

    // ── Scheduling ────────────────────────────────────────────────────────

    /// Queue an event and return its id.
    ///
    /// `time` is not checked against the clock: an event in the past simply
    /// pops next if it is the earliest queued.
    pub fn schedule(
        &mut self,
        time:       impl Into<SimTime>,
        code:       EventCode,
        index:      i64,
        attachment: Option<D::Attachment>,
    ) -> EventId {
        self.queue.push(time.into(), code, index, attachment)
    }

    /// Queue an event with no index and no attachment.
    pub fn schedule_bare(&mut self, time: impl Into<SimTime>, code: EventCode) -> EventId {
        self.schedule(time, code, NO_INDEX, None)
    }

    /// Queue an event `delay` time units after the current clock.
    pub fn schedule_in(
        &mut self,
        delay:      f64,
        code:       EventCode,
        index:      i64,
        attachment: Option<D::Attachment>,
    ) -> EventId {
        self.schedule(self.clock + delay, code, index, attachment)
    }

    /// Cancel a queued event.
    ///
    /// Always accepted, never reports anything.  Unknown or already consumed
    /// ids have no effect on the queue.
    pub fn cancel(&mut self, id: EventId) {
        self.queue.cancel(id);
    }

    /// Ask the run loop to return before its next pop.  Handlers still
    /// registered for the event being dispatched run to completion.
    ///
    /// The request is cleared at the start of the next `run`.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Drop every queued event, releasing their attachments.  Ids are not
    /// reused afterwards.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    // ── Handler registration ──────────────────────────────────────────────

    /// Append `handler` to the list for `code`.
    pub fn attach_handler(&mut self, code: EventCode, handler: D::Handler, arity: Arity) -> HandlerId {
        self.registry.attach(code, handler, arity)
    }

    /// Remove one registration.  Returns `false` if `id` is not registered
    /// under `code`.
    pub fn detach_handler(&mut self, code: EventCode, id: HandlerId) -> bool {
        self.registry.detach(code, id)
    }

    /// Append `handler` to the init list.
    pub fn attach_init_handler(&mut self, handler: D::Handler) {
        self.registry.attach_init(handler);
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run until the queue empties, a handler stops the loop, or the time
    /// limit is reached.
    ///
    /// Calling `run` again after it returns resumes with whatever is still
    /// queued.  Calling it from inside a handler returns
    /// [`DesError::AlreadyRunning`].
    ///
    /// # Panics
    /// A panicking handler unwinds through the loop.  The dispatcher is not
    /// restored in that case and the scheduler stays in the running state.
    pub fn run(&mut self) -> DesResult<RunSummary> {
        self.run_observed(&mut NoopObserver)
    }

    /// [`run`](Self::run) with observer hooks.
    pub fn run_observed<O: RunObserver<D::Attachment>>(
        &mut self,
        observer: &mut O,
    ) -> DesResult<RunSummary> {
        let Some(mut ctx) = self.dispatcher.take() else {
            return Err(DesError::AlreadyRunning);
        };
        let summary = self.drive(&mut ctx, observer);
        self.dispatcher = Some(ctx);
        Ok(summary)
    }

    fn drive<O: RunObserver<D::Attachment>>(&mut self, ctx: &mut D, observer: &mut O) -> RunSummary {
        self.clock = self.config.start_time();
        self.stopped = false;

        debug!("run start at {}: {} queued", self.clock, self.queue.len());
        observer.on_run_start(self.clock, self.queue.len());

        let mut init_calls = 0;
        if self.config.init_policy == InitPolicy::EveryRun || !self.init_done {
            self.init_done = true;
            let inits = self.registry.init_snapshot();
            for handler in inits.iter() {
                ctx.call_empty(self, handler);
                init_calls += 1;
            }
        }

        let limit = self.config.limit();
        let mut dispatched = 0;
        let mut skipped = 0;
        let mut handler_calls = 0;

        let end = loop {
            if self.stopped {
                break RunEnd::Stopped;
            }
            if let (Some(limit), Some(next)) = (limit, self.queue.peek_time()) {
                if next > limit {
                    break RunEnd::TimeLimit;
                }
            }
            let Some(popped) = self.queue.pop() else {
                break RunEnd::Exhausted;
            };

            match popped {
                Popped::Cancelled(event) => {
                    trace!("skip cancelled {event}");
                    observer.on_skip(&event);
                    skipped += 1;
                }
                Popped::Live(event) => {
                    self.clock = event.time;
                    let entries = self.registry.snapshot(event.code);
                    let count = entries.as_ref().map_or(0, |e| e.len());
                    trace!("dispatch {event} to {count} handler(s)");
                    observer.on_dispatch(&event, count);
                    if let Some(entries) = entries {
                        self.invoke_all(ctx, &entries, &event);
                    }
                    dispatched += 1;
                    handler_calls += count as u64;
                }
            }
            // The popped event, and its attachment handle, drop here.
        };

        let summary = RunSummary {
            dispatched,
            skipped,
            handler_calls,
            init_calls,
            final_time: self.clock,
            end,
        };
        debug!(
            "run end ({:?}) at {}: {} dispatched, {} skipped, {} left",
            summary.end,
            summary.final_time,
            summary.dispatched,
            summary.skipped,
            self.queue.len()
        );
        observer.on_run_end(&summary);
        summary
    }

    /// Hand `event` to each entry through the entry point for its arity.
    fn invoke_all(
        &mut self,
        ctx:     &mut D,
        entries: &Rc<Vec<HandlerEntry<D::Handler>>>,
        event:   &Event<D::Attachment>,
    ) {
        let attachment = event.attachment.as_ref();
        for entry in entries.iter() {
            match entry.arity {
                Arity::Empty => ctx.call_empty(self, &entry.handler),
                Arity::Index => ctx.call_index(self, &entry.handler, event.index),
                Arity::Attachment => ctx.call_attachment(self, &entry.handler, attachment),
                Arity::IndexAttachment => {
                    ctx.call_index_attachment(self, &entry.handler, event.index, attachment)
                }
            }
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The simulation clock.  Advances only when an event is dispatched.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock
    }

    /// Queued events, including cancelled ones not yet popped.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Time of the earliest queued event, cancelled or not.
    pub fn next_event_time(&self) -> Option<SimTime> {
        self.queue.peek_time()
    }

    /// The id the next `schedule` call will return.
    pub fn next_event_id(&self) -> EventId {
        self.queue.next_id()
    }

    pub fn is_cancelled(&self, id: EventId) -> bool {
        self.queue.is_cancelled(id)
    }

    pub fn tombstone_count(&self) -> usize {
        self.queue.tombstone_count()
    }

    pub fn is_running(&self) -> bool {
        self.dispatcher.is_none()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn registry(&self) -> &HandlerRegistry<D::Handler> {
        &self.registry
    }

    /// The dispatcher, or `None` while `run` is in progress.
    pub fn context(&self) -> Option<&D> {
        self.dispatcher.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut D> {
        self.dispatcher.as_mut()
    }

    /// Consume the scheduler and hand back the dispatcher.  Queued events are
    /// dropped.
    pub fn into_context(self) -> Option<D> {
        self.dispatcher
    }
}
