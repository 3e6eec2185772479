//! Table formatting for the Markdown report.

use crate::domain::scan::{ScanParameters, ScanResult};
use crate::domain::stats::BatchStats;

pub fn render_parameters_summary(params: &ScanParameters) -> String {
    let mut output = String::from("## Scan Parameters\n\n");
    output.push_str("| Parameter | Value |\n| --- | --- |\n");
    output.push_str(&format!(
        "| Target Return | {:.2}% |\n",
        params.target_return_pct
    ));
    output.push_str(&format!("| Minimum Days | {} |\n", params.min_days));
    output.push_str(&format!("| Maximum Days | {} |\n", params.max_days));
    output.push('\n');
    output
}

pub fn render_stats_table(stats: &BatchStats) -> String {
    let mut output = String::from("## Summary Statistics\n\n");
    output.push_str("| Metric | Value |\n| --- | --- |\n");
    output.push_str(&format!("| Observations | {} |\n", stats.total));
    output.push_str(&format!("| Targets Hit | {} |\n", stats.met));
    output.push_str(&format!("| Targets Missed | {} |\n", stats.unmet));
    output.push_str(&format!("| Unresolved | {} |\n", stats.unresolved));
    output.push_str(&format!(
        "| Success Rate | {} |\n",
        fmt_opt_pct(stats.success_rate)
    ));
    output.push_str(&format!(
        "| Average Return (hits) | {} |\n",
        fmt_opt_pct(stats.avg_return_pct)
    ));
    output.push_str(&format!(
        "| Average Days to Hit | {} |\n",
        stats
            .avg_days_taken
            .map(|d| format!("{:.1}", d))
            .unwrap_or_else(na)
    ));
    output.push('\n');
    output
}

pub fn render_results_table(results: &[ScanResult]) -> String {
    if results.is_empty() {
        return String::from("## Detailed Results\n\nNo observations evaluated.\n\n");
    }

    let mut output = String::from("## Detailed Results\n\n");
    output.push_str(
        "| Symbol | Entry Date | Entry Price | Target Price | Hit Date | Days | Return | Target Met |\n",
    );
    output.push_str("| --- | --- | --- | --- | --- | --- | --- | --- |\n");

    for result in results {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
            result.symbol,
            result.entry_date,
            fmt_opt_price(result.entry_price()),
            fmt_opt_price(result.target_price()),
            result
                .hit_date()
                .map(|d| d.to_string())
                .unwrap_or_else(na),
            result
                .days_taken()
                .map(|d| d.to_string())
                .unwrap_or_else(na),
            fmt_opt_pct(result.return_pct()),
            if result.target_met() { "yes" } else { "no" },
        ));
    }

    output.push('\n');
    output
}

fn na() -> String {
    "N/A".to_string()
}

fn fmt_opt_price(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(na)
}

fn fmt_opt_pct(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}%", v)).unwrap_or_else(na)
}
