//! Domain error types.
//!
//! Per-observation failures are never errors; they are represented as
//! [`crate::domain::scan::ScanOutcome`] values. This enum covers batch-level
//! failures only: configuration, observation ingestion, and total inability
//! to reach price data.

/// Top-level error type for rallyscan.
#[derive(Debug, thiserror::Error)]
pub enum RallyscanError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to load observations from {file}: {reason}")]
    ObservationsLoad { file: String, reason: String },

    #[error("invalid observation at row {row}: {reason}")]
    ObservationsInvalid { row: usize, reason: String },

    #[error("invalid scan parameters: {reason}")]
    Parameters { reason: String },

    #[error("price data unavailable: {reason}")]
    DataUnavailable { reason: String },

    #[error("failed to write report to {path}: {reason}")]
    ReportWrite { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&RallyscanError> for std::process::ExitCode {
    fn from(err: &RallyscanError) -> Self {
        let code: u8 = match err {
            RallyscanError::Io(_) | RallyscanError::ReportWrite { .. } => 1,
            RallyscanError::ConfigParse { .. }
            | RallyscanError::ConfigMissing { .. }
            | RallyscanError::ConfigInvalid { .. } => 2,
            RallyscanError::ObservationsLoad { .. }
            | RallyscanError::ObservationsInvalid { .. } => 3,
            RallyscanError::Parameters { .. } => 4,
            RallyscanError::DataUnavailable { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
