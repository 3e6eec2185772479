//! Configuration validation.
//!
//! Validates the `[scan]` section before a batch runs. Every key has a
//! default, so validation only rejects values that are present but out of
//! range.

use crate::domain::error::RallyscanError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_TARGET_RETURN_PCT: f64 = 3.0;
pub const DEFAULT_MIN_DAYS: i64 = 5;
pub const DEFAULT_MAX_DAYS: i64 = 6;

pub fn validate_scan_config(config: &dyn ConfigPort) -> Result<(), RallyscanError> {
    validate_target_return(config)?;
    validate_day_bounds(config)?;
    Ok(())
}

fn validate_target_return(config: &dyn ConfigPort) -> Result<(), RallyscanError> {
    let value = config.get_double("scan", "target_return", DEFAULT_TARGET_RETURN_PCT);
    if !value.is_finite() || value <= 0.0 {
        return Err(RallyscanError::ConfigInvalid {
            section: "scan".to_string(),
            key: "target_return".to_string(),
            reason: "target_return must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_day_bounds(config: &dyn ConfigPort) -> Result<(), RallyscanError> {
    let min_days = config.get_int("scan", "min_days", DEFAULT_MIN_DAYS);
    if min_days < 0 {
        return Err(RallyscanError::ConfigInvalid {
            section: "scan".to_string(),
            key: "min_days".to_string(),
            reason: "min_days must be non-negative".to_string(),
        });
    }

    let max_days = config.get_int("scan", "max_days", DEFAULT_MAX_DAYS);
    if max_days < min_days {
        return Err(RallyscanError::ConfigInvalid {
            section: "scan".to_string(),
            key: "max_days".to_string(),
            reason: format!("max_days ({max_days}) must be >= min_days ({min_days})"),
        });
    }
    Ok(())
}
