//! Observation input rows.

use chrono::NaiveDate;

/// One requested analysis: a symbol and the date the position is anchored on.
///
/// Observations are read-only once created. Duplicates are allowed and are
/// processed independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Observation {
    pub symbol: String,
    pub entry_date: NaiveDate,
}

impl Observation {
    pub fn new(symbol: impl Into<String>, entry_date: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            entry_date,
        }
    }
}
