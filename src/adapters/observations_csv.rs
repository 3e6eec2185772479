//! Observation CSV ingestion.
//!
//! Input files carry a header row with `symbol` and `date` columns; any
//! extra columns are ignored. Dates are day-first (`%d-%m-%Y`).

use crate::domain::error::RallyscanError;
use crate::domain::observation::Observation;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

const DATE_FORMAT: &str = "%d-%m-%Y";

pub fn load_observations<P: AsRef<Path>>(path: P) -> Result<Vec<Observation>, RallyscanError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| RallyscanError::ObservationsLoad {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_observations(&content).map_err(|e| match e {
        RallyscanError::ObservationsLoad { reason, .. } => RallyscanError::ObservationsLoad {
            file: path.display().to_string(),
            reason,
        },
        other => other,
    })
}

pub fn parse_observations(content: &str) -> Result<Vec<Observation>, RallyscanError> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| load_error(format!("CSV parse error: {e}")))?
        .clone();
    let symbol_idx = column_index(&headers, "symbol")
        .ok_or_else(|| load_error("missing required column 'symbol'".to_string()))?;
    let date_idx = column_index(&headers, "date")
        .ok_or_else(|| load_error("missing required column 'date'".to_string()))?;

    let mut observations = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let row = i + 1;
        let record = record.map_err(|e| RallyscanError::ObservationsInvalid {
            row,
            reason: format!("CSV parse error: {e}"),
        })?;

        let symbol = record
            .get(symbol_idx)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RallyscanError::ObservationsInvalid {
                row,
                reason: "empty symbol".to_string(),
            })?;

        let date_str = record.get(date_idx).map(str::trim).unwrap_or_default();
        let entry_date = NaiveDate::parse_from_str(date_str, DATE_FORMAT).map_err(|_| {
            RallyscanError::ObservationsInvalid {
                row,
                reason: format!("invalid date '{date_str}' (expected DD-MM-YYYY)"),
            }
        })?;

        observations.push(Observation::new(symbol, entry_date));
    }

    Ok(observations)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn load_error(reason: String) -> RallyscanError {
    RallyscanError::ObservationsLoad {
        file: String::new(),
        reason,
    }
}
