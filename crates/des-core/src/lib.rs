//! `des-core` — foundational types for the `des` discrete-event kernel.
//!
//! This crate has no `des-*` dependencies and only small external ones
//! (`ordered-float`, `thiserror`, plus optional `serde`).  The scheduler
//! itself lives in `des-sched`.
//!
//! # What lives here
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`ids`]       | `EventId`, `EventCode`, `HandlerId`, `EventIdGen`        |
//! | [`time`]      | `SimTime` (totally ordered `f64`)                        |
//! | [`event`]     | `Event<A>`, `NO_INDEX`                                   |
//! | [`config`]    | `SchedulerConfig`, `InitPolicy`, `CancelPolicy`          |
//! | [`error`]     | `DesError`, `DesResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, time, and config.   |

pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CancelPolicy, InitPolicy, SchedulerConfig};
pub use error::{DesError, DesResult};
pub use event::{Event, NO_INDEX};
pub use ids::{EventCode, EventId, EventIdGen, HandlerId};
pub use time::SimTime;
