//! CSV directory price data adapter.
//!
//! One `SYMBOL.csv` file per symbol, with a header row naming at least
//! `date`, `high`, and `close` columns (`date` in YYYY-MM-DD). Extra columns
//! such as open/low/volume are ignored; the scanner never reads them.

use crate::domain::error::RallyscanError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::ports::data_port::PriceDataPort;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

pub struct CsvPriceAdapter {
    base_path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn read_symbol(&self, symbol: &str) -> Result<Vec<PricePoint>, String> {
        let path = self.csv_path(symbol);
        let content =
            fs::read_to_string(&path).map_err(|e| format!("{}: {}", path.display(), e))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| format!("{}: CSV parse error: {}", path.display(), e))?
            .clone();

        let date_idx = column_index(&headers, "date")
            .ok_or_else(|| format!("{}: missing date column", path.display()))?;
        let close_idx = column_index(&headers, "close")
            .ok_or_else(|| format!("{}: missing close column", path.display()))?;
        let high_idx = column_index(&headers, "high")
            .ok_or_else(|| format!("{}: missing high column", path.display()))?;

        let mut points = Vec::new();
        for record in rdr.records() {
            let record =
                record.map_err(|e| format!("{}: CSV parse error: {}", path.display(), e))?;

            let date_str = record.get(date_idx).unwrap_or_default().trim();
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
                .map_err(|_| format!("{}: invalid date '{}'", path.display(), date_str))?;

            let close = parse_price(&record, close_idx)
                .map_err(|v| format!("{}: invalid close '{}' on {}", path.display(), v, date))?;
            let high = parse_price(&record, high_idx)
                .map_err(|v| format!("{}: invalid high '{}' on {}", path.display(), v, date))?;

            points.push(PricePoint { date, close, high });
        }

        Ok(points)
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn parse_price(record: &csv::StringRecord, idx: usize) -> Result<f64, String> {
    let raw = record.get(idx).unwrap_or_default().trim();
    raw.parse::<f64>().map_err(|_| raw.to_string())
}

impl PriceDataPort for CsvPriceAdapter {
    fn fetch_series(
        &self,
        symbols: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<HashMap<String, PriceSeries>, RallyscanError> {
        if !self.base_path.is_dir() {
            return Err(RallyscanError::DataUnavailable {
                reason: format!("price directory {} not found", self.base_path.display()),
            });
        }

        let mut series_by_symbol = HashMap::new();
        for symbol in symbols {
            // Missing or unreadable symbols degrade to partial coverage; the
            // scanner reports those observations as unresolved.
            match self.read_symbol(symbol) {
                Ok(points) => {
                    let in_range = points
                        .into_iter()
                        .filter(|p| p.date >= start_date && p.date <= end_date)
                        .collect();
                    series_by_symbol.insert(symbol.clone(), PriceSeries::from_points(in_range));
                }
                Err(reason) => {
                    eprintln!("warning: skipping {} ({})", symbol, reason);
                }
            }
        }

        Ok(series_by_symbol)
    }

    fn list_symbols(&self) -> Result<Vec<String>, RallyscanError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| {
            RallyscanError::DataUnavailable {
                reason: format!(
                    "failed to read directory {}: {}",
                    self.base_path.display(),
                    e
                ),
            }
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| RallyscanError::DataUnavailable {
                reason: format!("directory entry error: {e}"),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn series_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, RallyscanError> {
        if !self.csv_path(symbol).is_file() {
            return Ok(None);
        }

        let points = self
            .read_symbol(symbol)
            .map_err(|reason| RallyscanError::DataUnavailable { reason })?;
        let series = PriceSeries::from_points(points);

        Ok(series
            .first_date()
            .zip(series.last_date())
            .map(|(first, last)| (first, last, series.len())))
    }
}
