#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use rallyscan::domain::error::RallyscanError;
use rallyscan::domain::observation::Observation;
pub use rallyscan::domain::price_series::{PricePoint, PriceSeries};
use rallyscan::domain::scan::ScanParameters;
use rallyscan::ports::data_port::PriceDataPort;
use std::collections::HashMap;

pub struct MockPricePort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub fail_reason: Option<String>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            fail_reason: None,
        }
    }

    pub fn with_points(mut self, symbol: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(symbol.to_string(), points);
        self
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            data: HashMap::new(),
            fail_reason: Some(reason.to_string()),
        }
    }
}

impl PriceDataPort for MockPricePort {
    fn fetch_series(
        &self,
        symbols: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<HashMap<String, PriceSeries>, RallyscanError> {
        if let Some(reason) = &self.fail_reason {
            return Err(RallyscanError::DataUnavailable {
                reason: reason.clone(),
            });
        }
        Ok(symbols
            .iter()
            .filter_map(|s| {
                self.data.get(s).map(|points| {
                    let in_range = points
                        .iter()
                        .filter(|p| p.date >= start_date && p.date <= end_date)
                        .cloned()
                        .collect();
                    (s.clone(), PriceSeries::from_points(in_range))
                })
            })
            .collect())
    }

    fn list_symbols(&self) -> Result<Vec<String>, RallyscanError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn series_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, RallyscanError> {
        Ok(self.data.get(symbol).and_then(|points| {
            let series = PriceSeries::from_points(points.clone());
            series
                .first_date()
                .zip(series.last_date())
                .map(|(first, last)| (first, last, series.len()))
        }))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn obs(symbol: &str, entry: NaiveDate) -> Observation {
    Observation::new(symbol, entry)
}

pub fn params(target: f64, min_days: u32, max_days: u32) -> ScanParameters {
    ScanParameters::new(target, min_days, max_days).unwrap()
}

/// Consecutive daily points starting at `start`; every bar closes at `close`
/// and the highs are taken day by day from `highs`.
pub fn points_with_highs(start: NaiveDate, close: f64, highs: &[f64]) -> Vec<PricePoint> {
    highs
        .iter()
        .enumerate()
        .map(|(i, &high)| PricePoint {
            date: start + Duration::days(i as i64),
            close,
            high,
        })
        .collect()
}
