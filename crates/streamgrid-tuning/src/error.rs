//! Error types for the memory tuning engine.

use streamgrid_state::MetricKind;
use thiserror::Error;

/// Result type alias for tuning operations.
pub type TuningResult<T> = Result<T, TuningError>;

/// Errors that abort a tuning call.
///
/// Both variants are fatal to the call: no partial change-set is produced.
/// The engine never retries; skip-and-retry policy belongs to the
/// surrounding control loop, and a failed tuning call must not affect the
/// parallelism scaling pass for the same cycle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TuningError {
    /// Invalid static configuration, or a contradictory change-set request.
    #[error("invalid tuning configuration: {0}")]
    Configuration(String),

    /// A required cluster-wide metric was absent from the snapshot.
    #[error("metric {0} missing from snapshot")]
    MissingMetric(MetricKind),
}
