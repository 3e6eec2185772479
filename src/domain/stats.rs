//! Summary statistics over a batch of scan results.

use crate::domain::scan::{ScanOutcome, ScanResult};

/// Aggregate figures for one evaluated batch.
///
/// Rates and averages are `None` when their denominator is empty: a batch
/// with no resolvable rows has no success rate, and a batch with no hits has
/// no average return or days-to-hit.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchStats {
    pub total: usize,
    pub met: usize,
    pub unmet: usize,
    pub unresolved: usize,
    /// Hits as a percentage of resolvable rows. Unresolved rows are data
    /// gaps, not failed rallies, so they stay out of the denominator.
    pub success_rate: Option<f64>,
    pub avg_return_pct: Option<f64>,
    pub avg_days_taken: Option<f64>,
}

impl BatchStats {
    pub fn compute(results: &[ScanResult]) -> Self {
        let mut met = 0usize;
        let mut unmet = 0usize;
        let mut unresolved = 0usize;
        let mut return_sum = 0.0_f64;
        let mut days_sum = 0i64;

        for result in results {
            match result.outcome {
                ScanOutcome::Met {
                    return_pct,
                    days_taken,
                    ..
                } => {
                    met += 1;
                    return_sum += return_pct;
                    days_sum += days_taken;
                }
                ScanOutcome::NotMet { .. } => unmet += 1,
                ScanOutcome::Unresolved => unresolved += 1,
            }
        }

        let resolvable = met + unmet;
        let success_rate = if resolvable > 0 {
            Some(met as f64 / resolvable as f64 * 100.0)
        } else {
            None
        };
        let avg_return_pct = if met > 0 {
            Some(return_sum / met as f64)
        } else {
            None
        };
        let avg_days_taken = if met > 0 {
            Some(days_sum as f64 / met as f64)
        } else {
            None
        };

        BatchStats {
            total: results.len(),
            met,
            unmet,
            unresolved,
            success_rate,
            avg_return_pct,
            avg_days_taken,
        }
    }
}
