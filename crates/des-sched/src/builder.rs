//! Fluent builder for constructing a [`Scheduler`].

use des_core::{CancelPolicy, DesResult, EventCode, InitPolicy, SchedulerConfig};

use crate::{Arity, Dispatcher, Scheduler};

/// Fluent builder for [`Scheduler<D>`].
///
/// # Required inputs
///
/// - `D: Dispatcher` — the host's dispatch entry points and context owner.
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                          |
/// |-----------------------|----------------------------------|
/// | `.config(c)`          | `SchedulerConfig::default()`     |
/// | `.initial_time(t)`    | `0.0`                            |
/// | `.init_policy(p)`     | `InitPolicy::EveryRun`           |
/// | `.cancel_policy(p)`   | `CancelPolicy::Tombstone`        |
/// | `.time_limit(t)`      | none                             |
/// | `.handler(c, h, a)`   | no handlers                      |
/// | `.init_handler(h)`    | no init handlers                 |
///
/// # Example
///
/// ```rust,ignore
/// let mut sched = Scheduler::builder(host)
///     .init_policy(InitPolicy::Once)
///     .time_limit(1_000.0)
///     .handler(ARRIVAL, on_arrival, Arity::Index)
///     .init_handler(seed_arrivals)
///     .build()?;
/// sched.run()?;
/// ```
pub struct SchedulerBuilder<D: Dispatcher> {
    dispatcher:    D,
    config:        SchedulerConfig,
    handlers:      Vec<(EventCode, D::Handler, Arity)>,
    init_handlers: Vec<D::Handler>,
}

impl<D: Dispatcher> SchedulerBuilder<D> {
    pub fn new(dispatcher: D) -> Self {
        Self {
            dispatcher,
            config:        SchedulerConfig::default(),
            handlers:      Vec::new(),
            init_handlers: Vec::new(),
        }
    }

    /// Replace the whole configuration, e.g. one loaded from a file.
    pub fn config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn initial_time(mut self, t: f64) -> Self {
        self.config.initial_time = t;
        self
    }

    pub fn init_policy(mut self, policy: InitPolicy) -> Self {
        self.config.init_policy = policy;
        self
    }

    pub fn cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.config.cancel_policy = policy;
        self
    }

    pub fn time_limit(mut self, limit: f64) -> Self {
        self.config.time_limit = Some(limit);
        self
    }

    /// Register a handler.  Registrations keep the order of these calls.
    pub fn handler(mut self, code: EventCode, handler: D::Handler, arity: Arity) -> Self {
        self.handlers.push((code, handler, arity));
        self
    }

    pub fn init_handler(mut self, handler: D::Handler) -> Self {
        self.init_handlers.push(handler);
        self
    }

    /// Validate the configuration and return a ready-to-run [`Scheduler`].
    pub fn build(self) -> DesResult<Scheduler<D>> {
        self.config.validate()?;
        let mut sched = Scheduler::from_parts(self.dispatcher, self.config);
        for (code, handler, arity) in self.handlers {
            sched.attach_handler(code, handler, arity);
        }
        for handler in self.init_handlers {
            sched.attach_init_handler(handler);
        }
        Ok(sched)
    }
}
