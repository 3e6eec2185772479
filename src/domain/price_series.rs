//! Daily price points and the per-symbol series the scanner reads.

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One daily bar, reduced to the fields the scanner consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
    pub high: f64,
}

/// Chronologically ordered daily prices for one symbol.
///
/// Backed by a `BTreeMap` keyed on date: exact-date lookup, inclusive range
/// scans in chronological order, and deterministic iteration all fall out of
/// the ordered map. The series is immutable once built; the scanner only
/// reads from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    points: BTreeMap<NaiveDate, PricePoint>,
}

impl PriceSeries {
    /// Build a series from unordered points. On duplicate dates the last
    /// point wins.
    pub fn from_points(points: Vec<PricePoint>) -> Self {
        Self {
            points: points.into_iter().map(|p| (p.date, p)).collect(),
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&PricePoint> {
        self.points.get(&date)
    }

    /// All points with `start <= date <= end`, in chronological order.
    pub fn range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &PricePoint> + '_ {
        self.points.range(start..=end).map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.keys().next_back().copied()
    }
}
