//! Kernel error type.
//!
//! The scheduling operations themselves (`schedule`, `cancel`, `attach_*`,
//! `stop`) are total and never fail.  Errors only come from constructing a
//! scheduler with a bad configuration or from misusing `run`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DesError {
    #[error("scheduler is already running; `run` cannot be called from inside a handler")]
    AlreadyRunning,

    #[error("scheduler configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `des-*` crates.
pub type DesResult<T> = Result<T, DesError>;
