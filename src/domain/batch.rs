//! Batch evaluation: span computation, symbol dedup, and the per-observation
//! fan-out over the scanner.
//!
//! Kept thin on purpose: no threshold logic lives here. The evaluator fetches
//! once, scans once per observation, and hands back results in input order.

use crate::domain::error::RallyscanError;
use crate::domain::observation::Observation;
use crate::domain::scan::{scan, ScanParameters, ScanResult};
use crate::ports::data_port::PriceDataPort;
use chrono::{Duration, NaiveDate};
use rayon::prelude::*;
use std::collections::HashSet;

/// The single date span requested from the data port for a whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Minimal span covering every observation's scan window: earliest entry
/// date through latest entry date plus `max_days`. `None` for an empty batch.
pub fn batch_span(observations: &[Observation], max_days: u32) -> Option<BatchSpan> {
    let start = observations.iter().map(|o| o.entry_date).min()?;
    let latest = observations.iter().map(|o| o.entry_date).max()?;
    let end = latest
        .checked_add_signed(Duration::days(max_days as i64))
        .unwrap_or(NaiveDate::MAX);
    Some(BatchSpan { start, end })
}

/// Symbols in first-seen order with duplicates removed, for one batched fetch.
pub fn unique_symbols(observations: &[Observation]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut symbols = Vec::new();
    for obs in observations {
        if seen.insert(obs.symbol.clone()) {
            symbols.push(obs.symbol.clone());
        }
    }
    symbols
}

/// Evaluate a whole batch: one fetch, one scan per observation.
///
/// Results come back in input order; rows are never dropped or reordered,
/// and a row the data cannot resolve still yields its unresolved result.
/// Scans are independent reads of the shared series map, so they run on the
/// rayon pool.
pub fn evaluate(
    data_port: &dyn PriceDataPort,
    observations: &[Observation],
    params: &ScanParameters,
) -> Result<Vec<ScanResult>, RallyscanError> {
    let Some(span) = batch_span(observations, params.max_days) else {
        return Ok(Vec::new());
    };

    let symbols = unique_symbols(observations);
    let series_by_symbol = data_port.fetch_series(&symbols, span.start, span.end)?;

    let results = observations
        .par_iter()
        .map(|obs| scan(obs, series_by_symbol.get(&obs.symbol), params))
        .collect();

    Ok(results)
}
