//! Scheduler configuration.
//!
//! Every field has a default that reproduces the classic kernel behavior, so
//! `SchedulerConfig::default()` is what most callers want.  Applications that
//! load settings from disk enable the `serde` feature; missing JSON keys fall
//! back to the defaults.

use crate::{DesError, DesResult, SimTime};

/// When init handlers run.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InitPolicy {
    /// At the start of every `run`, including runs that resume after `stop`.
    #[default]
    EveryRun,
    /// At the start of the first `run` only.
    Once,
}

/// What `cancel` records.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CancelPolicy {
    /// Tombstone every issued id, whether or not it is still queued.  Ids of
    /// events that already left the queue stay in the set forever.
    #[default]
    Tombstone,
    /// Tombstone only ids that are still queued.  Keeps the set bounded by
    /// the queue length at the cost of tracking the pending ids.
    PendingOnly,
}

/// Top-level scheduler configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// Value the clock is reset to at the start of each `run`.  Default: 0.
    pub initial_time:  f64,

    pub init_policy:   InitPolicy,

    pub cancel_policy: CancelPolicy,

    /// If set, `run` returns before dispatching the first event whose time
    /// exceeds this limit.  That event and everything after it stay queued.
    pub time_limit:    Option<f64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_time:  0.0,
            init_policy:   InitPolicy::EveryRun,
            cancel_policy: CancelPolicy::Tombstone,
            time_limit:    None,
        }
    }
}

impl SchedulerConfig {
    /// Reject configurations the run loop cannot honor.
    pub fn validate(&self) -> DesResult<()> {
        if !self.initial_time.is_finite() {
            return Err(DesError::Config(format!(
                "initial_time must be finite, got {}",
                self.initial_time
            )));
        }
        if let Some(limit) = self.time_limit {
            if limit.is_nan() {
                return Err(DesError::Config("time_limit must not be NaN".into()));
            }
            if limit < self.initial_time {
                return Err(DesError::Config(format!(
                    "time_limit {limit} is before initial_time {}",
                    self.initial_time
                )));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn start_time(&self) -> SimTime {
        SimTime::new(self.initial_time)
    }

    #[inline]
    pub fn limit(&self) -> Option<SimTime> {
        self.time_limit.map(SimTime::new)
    }
}
