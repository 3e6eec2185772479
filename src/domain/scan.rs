//! Target scanner: entry-price resolution, target computation, and the
//! forward-window search for the earliest qualifying high.

use crate::domain::error::RallyscanError;
use crate::domain::observation::Observation;
use crate::domain::price_series::PriceSeries;
use chrono::{Duration, NaiveDate};

/// Batch-wide scan parameters, applied uniformly to every observation.
///
/// `min_days` gates the earliest eligible hit date: only dates at or after
/// `entry_date + min_days` are considered, so a rally on the entry day itself
/// only counts when `min_days` is zero. The entry price is always resolved at
/// `entry_date` regardless.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanParameters {
    pub target_return_pct: f64,
    pub min_days: u32,
    pub max_days: u32,
}

impl ScanParameters {
    pub fn new(
        target_return_pct: f64,
        min_days: u32,
        max_days: u32,
    ) -> Result<Self, RallyscanError> {
        if !target_return_pct.is_finite() || target_return_pct <= 0.0 {
            return Err(RallyscanError::Parameters {
                reason: format!(
                    "target_return_pct must be a positive number, got {target_return_pct}"
                ),
            });
        }
        if max_days < min_days {
            return Err(RallyscanError::Parameters {
                reason: format!("max_days ({max_days}) must be >= min_days ({min_days})"),
            });
        }
        Ok(Self {
            target_return_pct,
            min_days,
            max_days,
        })
    }

    /// Entry price scaled up by the target return percentage.
    pub fn target_price(&self, entry_price: f64) -> f64 {
        entry_price * (1.0 + self.target_return_pct / 100.0)
    }
}

/// Tri-state outcome of scanning one observation.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// Symbol absent from the fetched data, no bar at the entry date, or the
    /// entry bar was unusable. Nothing can be reported.
    Unresolved,
    /// Entry resolved but no day in the window reached the target price. The
    /// entry and target prices are still reported for diagnostics.
    NotMet { entry_price: f64, target_price: f64 },
    /// Earliest qualifying day found within the window.
    Met {
        entry_price: f64,
        target_price: f64,
        hit_date: NaiveDate,
        days_taken: i64,
        return_pct: f64,
    },
}

/// Result of scanning one observation. Created once by [`scan`] and
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub symbol: String,
    pub entry_date: NaiveDate,
    pub outcome: ScanOutcome,
}

impl ScanResult {
    fn unresolved(observation: &Observation) -> Self {
        Self {
            symbol: observation.symbol.clone(),
            entry_date: observation.entry_date,
            outcome: ScanOutcome::Unresolved,
        }
    }

    pub fn target_met(&self) -> bool {
        matches!(self.outcome, ScanOutcome::Met { .. })
    }

    pub fn entry_price(&self) -> Option<f64> {
        match self.outcome {
            ScanOutcome::Unresolved => None,
            ScanOutcome::NotMet { entry_price, .. } | ScanOutcome::Met { entry_price, .. } => {
                Some(entry_price)
            }
        }
    }

    pub fn target_price(&self) -> Option<f64> {
        match self.outcome {
            ScanOutcome::Unresolved => None,
            ScanOutcome::NotMet { target_price, .. } | ScanOutcome::Met { target_price, .. } => {
                Some(target_price)
            }
        }
    }

    pub fn hit_date(&self) -> Option<NaiveDate> {
        match self.outcome {
            ScanOutcome::Met { hit_date, .. } => Some(hit_date),
            _ => None,
        }
    }

    pub fn days_taken(&self) -> Option<i64> {
        match self.outcome {
            ScanOutcome::Met { days_taken, .. } => Some(days_taken),
            _ => None,
        }
    }

    pub fn return_pct(&self) -> Option<f64> {
        match self.outcome {
            ScanOutcome::Met { return_pct, .. } => Some(return_pct),
            _ => None,
        }
    }
}

/// Scan one observation against its symbol's price series.
///
/// Resolves the entry close at `entry_date`, computes the target price, and
/// walks the window `[entry_date + min_days, entry_date + max_days]` in
/// chronological order looking for the first high at or above the target.
/// A series that ends before the window does simply shortens the effective
/// window. Never fails: every per-observation problem degrades to
/// [`ScanOutcome::Unresolved`] or [`ScanOutcome::NotMet`].
pub fn scan(
    observation: &Observation,
    series: Option<&PriceSeries>,
    params: &ScanParameters,
) -> ScanResult {
    let Some(series) = series else {
        return ScanResult::unresolved(observation);
    };
    let Some(entry) = series.get(observation.entry_date) else {
        return ScanResult::unresolved(observation);
    };

    let entry_price = entry.close;
    if !entry_price.is_finite() || entry_price <= 0.0 {
        return ScanResult::unresolved(observation);
    }
    let target_price = params.target_price(entry_price);

    let window = observation
        .entry_date
        .checked_add_signed(Duration::days(params.min_days as i64))
        .zip(
            observation
                .entry_date
                .checked_add_signed(Duration::days(params.max_days as i64)),
        );
    let Some((window_start, window_end)) = window else {
        return ScanResult::unresolved(observation);
    };

    for point in series.range(window_start, window_end) {
        if point.high >= target_price {
            let days_taken = (point.date - observation.entry_date).num_days();
            let return_pct = (point.high - entry_price) / entry_price * 100.0;
            return ScanResult {
                symbol: observation.symbol.clone(),
                entry_date: observation.entry_date,
                outcome: ScanOutcome::Met {
                    entry_price,
                    target_price,
                    hit_date: point.date,
                    days_taken,
                    return_pct,
                },
            };
        }
    }

    ScanResult {
        symbol: observation.symbol.clone(),
        entry_date: observation.entry_date,
        outcome: ScanOutcome::NotMet {
            entry_price,
            target_price,
        },
    }
}
