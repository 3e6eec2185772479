//! Markdown report generation.
//!
//! Assembles the batch report: scan parameters, summary statistics, the
//! return-distribution and outcome charts as inline SVG, and the detailed
//! per-observation table.

pub mod chart_svg;
pub mod tables;

use crate::domain::error::RallyscanError;
use crate::domain::scan::{ScanParameters, ScanResult};
use crate::domain::stats::BatchStats;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::Path;

pub struct MarkdownReportAdapter;

impl ReportPort for MarkdownReportAdapter {
    fn write(
        &self,
        results: &[ScanResult],
        stats: &BatchStats,
        params: &ScanParameters,
        output_path: &Path,
    ) -> Result<(), RallyscanError> {
        let content = render(results, stats, params);
        fs::write(output_path, content).map_err(|e| RallyscanError::ReportWrite {
            path: output_path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

pub fn render(results: &[ScanResult], stats: &BatchStats, params: &ScanParameters) -> String {
    let mut output = String::from("# Rally Target Report\n\n");

    output.push_str(&tables::render_parameters_summary(params));
    output.push_str(&tables::render_stats_table(stats));

    let hit_returns: Vec<f64> = results.iter().filter_map(|r| r.return_pct()).collect();
    let histogram = chart_svg::generate_return_histogram_svg(&hit_returns, params.target_return_pct);
    if histogram.is_empty() {
        output.push_str("## Return Distribution\n\nNo targets hit in this batch.\n\n");
    } else {
        output.push_str(&format!("## Return Distribution\n\n{histogram}\n\n"));
    }

    let outcomes = chart_svg::generate_outcome_svg(stats);
    if !outcomes.is_empty() {
        output.push_str(&format!("## Outcome Breakdown\n\n{outcomes}\n\n"));
    }

    output.push_str(&tables::render_results_table(results));
    output
}
