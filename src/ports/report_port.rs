//! Report generation port trait.

use crate::domain::error::RallyscanError;
use crate::domain::scan::{ScanParameters, ScanResult};
use crate::domain::stats::BatchStats;
use std::path::Path;

/// Port for writing batch scan reports.
pub trait ReportPort {
    fn write(
        &self,
        results: &[ScanResult],
        stats: &BatchStats,
        params: &ScanParameters,
        output_path: &Path,
    ) -> Result<(), RallyscanError>;
}
