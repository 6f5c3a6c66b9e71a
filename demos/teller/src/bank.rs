//! The bank model: configuration, state, and event handlers.
//!
//! | Code        | Arity            | Effect                                               |
//! |-------------|------------------|------------------------------------------------------|
//! | `ARRIVAL`   | index+attachment | record customer, arm renege timer, serve or enqueue  |
//! | `DEPARTURE` | index            | finish service, start the next customer in line      |
//! | `RENEGE`    | index            | customer gives up waiting and leaves the line        |
//! | `CLOSE`     | none             | stop the run; later events stay queued               |

use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::{Context, Result, ensure};
use des_core::{EventCode, EventId, SchedulerConfig};
use des_sched::{FnDispatcher, FnHandler, FnScheduler, RunSummary, Scheduler};
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const ARRIVAL:   EventCode = EventCode(1);
pub const DEPARTURE: EventCode = EventCode(2);
pub const RENEGE:    EventCode = EventCode(3);
pub const CLOSE:     EventCode = EventCode(4);

type Sched = FnScheduler<Bank, Rc<Customer>>;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Model parameters.  Times are in minutes from opening.  Every field has a
/// default, so a JSON config file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TellerConfig {
    pub customers:     u32,
    pub inter_arrival: f64,
    /// Half-width of the uniform noise added to each gap and each patience.
    pub jitter:        f64,
    pub service_time:  f64,
    pub patience:      f64,
    pub closing_time:  f64,
    pub seed:          u64,
    pub scheduler:     SchedulerConfig,
}

impl Default for TellerConfig {
    fn default() -> Self {
        Self {
            customers:     100,
            inter_arrival: 4.0,
            jitter:        2.0,
            service_time:  3.5,
            patience:      10.0,
            closing_time:  480.0,
            seed:          42,
            scheduler:     SchedulerConfig::default(),
        }
    }
}

impl TellerConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("inter_arrival", self.inter_arrival),
            ("jitter", self.jitter),
            ("service_time", self.service_time),
            ("patience", self.patience),
            ("closing_time", self.closing_time),
        ] {
            ensure!(value.is_finite() && value >= 0.0, "{name} must be finite and >= 0, got {value}");
        }
        Ok(())
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

/// Attachment carried by an `ARRIVAL` event.
#[derive(Debug)]
pub struct Customer {
    pub number:   u32,
    pub patience: f64,
}

/// What happened to one customer.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomerRecord {
    pub number:   u32,
    pub arrived:  f64,
    pub patience: f64,
    pub started:  Option<f64>,
    pub finished: Option<f64>,
    pub reneged:  bool,
    renege:       Option<EventId>,
}

/// Result of one simulated day.
pub struct Outcome {
    pub records: Vec<CustomerRecord>,
    pub summary: RunSummary,
    /// Events still queued when the run returned.
    pub pending: usize,
}

impl Outcome {
    pub fn served(&self) -> usize {
        self.records.iter().filter(|r| r.finished.is_some()).count()
    }

    pub fn reneged(&self) -> usize {
        self.records.iter().filter(|r| r.reneged).count()
    }

    /// Customers in service or still in line at closing.
    pub fn unfinished(&self) -> usize {
        self.records.len() - self.served() - self.reneged()
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

pub struct Bank {
    config:  TellerConfig,
    rng:     SmallRng,
    line:    VecDeque<u32>,
    busy:    bool,
    records: Vec<CustomerRecord>,
}

impl Bank {
    pub fn new(config: TellerConfig) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(config.seed),
            config,
            line: VecDeque::new(),
            busy: false,
            records: Vec::new(),
        }
    }

    fn jitter(&mut self) -> f64 {
        let j = self.config.jitter;
        if j > 0.0 { self.rng.gen_range(-j..=j) } else { 0.0 }
    }

    /// Queue the arrival of customer `number`, if the day has one.
    fn schedule_arrival(&mut self, sched: &mut Sched, number: u32) {
        if number >= self.config.customers {
            return;
        }
        let gap = (self.config.inter_arrival + self.jitter()).max(0.0);
        let patience = (self.config.patience + self.jitter()).max(0.0);
        let customer = Rc::new(Customer { number, patience });
        sched.schedule_in(gap, ARRIVAL, i64::from(number), Some(customer));
    }

    fn start_service(&mut self, sched: &mut Sched, number: u32) {
        let now = sched.now().as_f64();
        let Some(record) = self.records.get_mut(number as usize) else {
            warn!("no record for customer {number}");
            return;
        };
        if let Some(timer) = record.renege.take() {
            sched.cancel(timer);
        }
        record.started = Some(now);
        self.busy = true;
        debug!("t={now:.2} serving customer {number} (waited {:.2})", now - record.arrived);
        sched.schedule_in(self.config.service_time, DEPARTURE, i64::from(number), None);
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

fn open(bank: &mut Bank, sched: &mut Sched) {
    info!("bank opens at {}, closes at t={}", sched.now(), bank.config.closing_time);
    sched.schedule_bare(bank.config.closing_time, CLOSE);
    bank.schedule_arrival(sched, 0);
}

fn on_arrival(bank: &mut Bank, sched: &mut Sched, index: i64, customer: Option<&Rc<Customer>>) {
    let Some(customer) = customer else {
        warn!("arrival {index} carries no customer");
        return;
    };
    let now = sched.now().as_f64();
    let timer = sched.schedule_in(customer.patience, RENEGE, index, None);
    bank.records.push(CustomerRecord {
        number:   customer.number,
        arrived:  now,
        patience: customer.patience,
        started:  None,
        finished: None,
        reneged:  false,
        renege:   Some(timer),
    });
    debug!("t={now:.2} customer {} arrives, {} in line", customer.number, bank.line.len());

    if bank.busy {
        bank.line.push_back(customer.number);
    } else {
        bank.start_service(sched, customer.number);
    }
    bank.schedule_arrival(sched, customer.number + 1);
}

fn on_departure(bank: &mut Bank, sched: &mut Sched, index: i64) {
    let now = sched.now().as_f64();
    if let Some(record) = usize::try_from(index).ok().and_then(|i| bank.records.get_mut(i)) {
        record.finished = Some(now);
    }
    bank.busy = false;
    if let Some(next) = bank.line.pop_front() {
        bank.start_service(sched, next);
    }
}

fn on_renege(bank: &mut Bank, sched: &mut Sched, index: i64) {
    let Some(record) = usize::try_from(index).ok().and_then(|i| bank.records.get_mut(i)) else {
        warn!("renege for unknown customer {index}");
        return;
    };
    record.reneged = true;
    record.renege = None;
    let number = record.number;
    bank.line.retain(|&c| c != number);
    debug!("t={:.2} customer {number} gives up", sched.now().as_f64());
}

fn on_close(_bank: &mut Bank, sched: &mut Sched) {
    info!("bank closes at {}", sched.now());
    sched.stop();
}

// ── Driver ────────────────────────────────────────────────────────────────────

/// Simulate one day and return what happened to every customer.
pub fn simulate(config: TellerConfig) -> Result<Outcome> {
    config.validate()?;
    let mut sched: Sched = Scheduler::builder(FnDispatcher::new(Bank::new(config.clone())))
        .config(config.scheduler)
        .init_handler(FnHandler::empty(open))
        .build()?;
    sched.on(ARRIVAL, FnHandler::index_attachment(on_arrival));
    sched.on(DEPARTURE, FnHandler::index(on_departure));
    sched.on(RENEGE, FnHandler::index(on_renege));
    sched.on(CLOSE, FnHandler::empty(on_close));

    let summary = sched.run()?;
    let pending = sched.queued();
    let bank = sched
        .into_context()
        .map(FnDispatcher::into_state)
        .context("scheduler returned without its bank state")?;

    Ok(Outcome { records: bank.records, summary, pending })
}

/// Write one row per customer.
pub fn write_csv(path: &std::path::Path, records: &[CustomerRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    writer.write_record(["customer", "arrived", "patience", "started", "finished", "reneged"])?;
    let opt = |v: Option<f64>| v.map(|t| format!("{t:.3}")).unwrap_or_default();
    for r in records {
        writer.write_record(&[
            r.number.to_string(),
            format!("{:.3}", r.arrived),
            format!("{:.3}", r.patience),
            opt(r.started),
            opt(r.finished),
            (r.reneged as u8).to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
