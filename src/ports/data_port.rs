//! Price data access port trait.

use crate::domain::error::RallyscanError;
use crate::domain::price_series::PriceSeries;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Boundary to whatever supplies daily price history.
///
/// One batched call covers every symbol a batch needs. Partial coverage is
/// expected and is not an error: symbols the provider cannot serve are
/// simply absent from the returned map, and a series may cover fewer dates
/// than requested. Only a total inability to reach the data source is
/// reported as an error.
pub trait PriceDataPort {
    fn fetch_series(
        &self,
        symbols: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<HashMap<String, PriceSeries>, RallyscanError>;

    fn list_symbols(&self) -> Result<Vec<String>, RallyscanError>;

    /// Coverage for one symbol: first date, last date, and point count.
    fn series_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, RallyscanError>;
}
