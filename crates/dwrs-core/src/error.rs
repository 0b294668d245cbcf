//! Configuration error type.
//!
//! Everything in here is detected before the first tick runs.  Contract
//! violations raised while the simulation is stepping live in
//! `dwrs-entity` instead.

use thiserror::Error;

use crate::Mode;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unsupported distribution kind {0:?}")]
    UnsupportedDistribution(String),

    #[error("invalid {kind} parameters {params:?}: {reason}")]
    InvalidParameters {
        kind:   &'static str,
        params: Vec<f64>,
        reason: String,
    },

    #[error("{mode} mode is inconsistent with parameter {field}")]
    ModeMismatch {
        mode:  Mode,
        field: &'static str,
    },
}

/// Shorthand result type for `dwrs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
