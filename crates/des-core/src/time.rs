//! Simulation time model.
//!
//! # Design
//!
//! Time is a floating-point timestamp in whatever unit the host chooses.  It
//! advances only when the scheduler dispatches an event, never from
//! wall-clock observation.
//!
//! Raw `f64` is only `PartialOrd`, which a binary heap cannot use, so
//! `SimTime` wraps `OrderedFloat<f64>` to get a total order.  Under that order
//! NaN compares greater than every other value, including `+inf`: an event
//! scheduled at NaN is dispatched after everything else.

use std::fmt;

use ordered_float::OrderedFloat;

/// An absolute simulation timestamp.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(OrderedFloat<f64>);

impl SimTime {
    pub const ZERO: SimTime = SimTime(OrderedFloat(0.0));

    #[inline]
    pub const fn new(t: f64) -> Self {
        SimTime(OrderedFloat(t))
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0.into_inner()
    }

    /// `true` for everything except NaN and the infinities.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.as_f64().is_finite()
    }

    /// The time `delay` units after `self`.  Negative delays are allowed.
    #[inline]
    pub fn offset(self, delay: f64) -> SimTime {
        SimTime::new(self.as_f64() + delay)
    }
}

impl From<f64> for SimTime {
    #[inline]
    fn from(t: f64) -> Self {
        SimTime::new(t)
    }
}

impl From<SimTime> for f64 {
    #[inline]
    fn from(t: SimTime) -> f64 {
        t.as_f64()
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        self.offset(rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.as_f64() - rhs.as_f64()
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.as_f64())
    }
}
