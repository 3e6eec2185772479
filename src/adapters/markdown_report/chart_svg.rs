//! SVG chart rendering for the Markdown report.

use crate::domain::stats::BatchStats;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 300.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 40.0;

const HISTOGRAM_BINS: usize = 10;

/// Histogram of achieved returns among hits, with a dashed marker at the
/// target return. Empty input yields an empty string.
pub fn generate_return_histogram_svg(returns: &[f64], target_pct: f64) -> String {
    if returns.is_empty() {
        return String::new();
    }

    let max_ret = returns.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min_ret = returns.iter().cloned().fold(f64::INFINITY, f64::min);
    // Hits never return less than the target, so anchoring the axis at the
    // target keeps the marker on-chart.
    let lo = target_pct.min(min_ret);
    let hi = if max_ret > lo { max_ret } else { lo + 1.0 };
    let bin_width = (hi - lo) / HISTOGRAM_BINS as f64;

    let mut counts = [0usize; HISTOGRAM_BINS];
    for &r in returns {
        let mut bin = ((r - lo) / bin_width) as usize;
        if bin >= HISTOGRAM_BINS {
            bin = HISTOGRAM_BINS - 1;
        }
        counts[bin] += 1;
    }
    let max_count = counts.iter().cloned().max().unwrap_or(1).max(1);

    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let bar_width = plot_width / HISTOGRAM_BINS as f64;

    let x_scale = |value: f64| -> f64 { MARGIN_LEFT + ((value - lo) / (hi - lo)) * plot_width };
    let y_scale = |count: usize| -> f64 {
        MARGIN_TOP + plot_height - (count as f64 / max_count as f64) * plot_height
    };

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<svg width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"##,
        CHART_WIDTH, CHART_HEIGHT, CHART_WIDTH, CHART_HEIGHT
    ));
    svg.push_str("\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"15\" text-anchor=\"end\" font-size=\"12\" fill=\"#666\">Return (%)</text>\n",
        CHART_WIDTH
    ));
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT,
        MARGIN_TOP,
        MARGIN_LEFT,
        CHART_HEIGHT - MARGIN_BOTTOM
    ));
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT,
        CHART_HEIGHT - MARGIN_BOTTOM,
        CHART_WIDTH - MARGIN_RIGHT,
        CHART_HEIGHT - MARGIN_BOTTOM
    ));

    for (i, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let x = MARGIN_LEFT + i as f64 * bar_width;
        let y = y_scale(count);
        let height = CHART_HEIGHT - MARGIN_BOTTOM - y;
        svg.push_str(&format!(
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"#2563eb\" stroke=\"white\" stroke-width=\"1\"/>\n",
            x, y, bar_width, height
        ));
    }

    let target_x = x_scale(target_pct);
    svg.push_str(&format!(
        "  <line x1=\"{:.1}\" y1=\"{}\" x2=\"{:.1}\" y2=\"{}\" stroke=\"#16a34a\" stroke-width=\"2\" stroke-dasharray=\"6,3\"/>\n",
        target_x,
        MARGIN_TOP,
        target_x,
        CHART_HEIGHT - MARGIN_BOTTOM
    ));
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"{}\" text-anchor=\"middle\" font-size=\"10\" fill=\"#16a34a\">{:.1}% target</text>\n",
        target_x,
        MARGIN_TOP - 8.0,
        target_pct
    ));

    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"10\" fill=\"#666\">{}</text>\n",
        MARGIN_LEFT - 5.0,
        MARGIN_TOP + 5.0,
        max_count
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"10\" fill=\"#666\">0</text>\n",
        MARGIN_LEFT - 5.0,
        CHART_HEIGHT - MARGIN_BOTTOM - 5.0
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"10\" fill=\"#666\">{:.1}%</text>\n",
        MARGIN_LEFT, CHART_HEIGHT, lo
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"10\" fill=\"#666\">{:.1}%</text>\n",
        MARGIN_LEFT + plot_width / 2.0,
        CHART_HEIGHT,
        (lo + hi) / 2.0
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"10\" fill=\"#666\">{:.1}%</text>\n",
        CHART_WIDTH - MARGIN_RIGHT,
        CHART_HEIGHT,
        hi
    ));
    svg.push_str("</svg>");
    svg
}

/// Hit / missed / unresolved counts as a three-bar chart. Empty batch
/// yields an empty string.
pub fn generate_outcome_svg(stats: &BatchStats) -> String {
    if stats.total == 0 {
        return String::new();
    }

    let bars = [
        ("Hit", stats.met, "#16a34a"),
        ("Missed", stats.unmet, "#dc2626"),
        ("Unresolved", stats.unresolved, "#9ca3af"),
    ];
    let max_count = bars.iter().map(|(_, c, _)| *c).max().unwrap_or(1).max(1);

    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let slot_width = plot_width / bars.len() as f64;
    let bar_width = slot_width * 0.6;

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<svg width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"##,
        CHART_WIDTH, CHART_HEIGHT, CHART_WIDTH, CHART_HEIGHT
    ));
    svg.push_str("\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT,
        CHART_HEIGHT - MARGIN_BOTTOM,
        CHART_WIDTH - MARGIN_RIGHT,
        CHART_HEIGHT - MARGIN_BOTTOM
    ));

    for (i, (label, count, color)) in bars.iter().enumerate() {
        let x = MARGIN_LEFT + i as f64 * slot_width + (slot_width - bar_width) / 2.0;
        let height = (*count as f64 / max_count as f64) * plot_height;
        let y = CHART_HEIGHT - MARGIN_BOTTOM - height;

        if *count > 0 {
            svg.push_str(&format!(
                "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"/>\n",
                x, y, bar_width, height, color
            ));
        }
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"12\" fill=\"#333\">{}</text>\n",
            x + bar_width / 2.0,
            y - 6.0,
            count
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{}\" text-anchor=\"middle\" font-size=\"11\" fill=\"#666\">{}</text>\n",
            x + bar_width / 2.0,
            CHART_HEIGHT - MARGIN_BOTTOM + 16.0,
            label
        ));
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_empty_returns() {
        assert!(generate_return_histogram_svg(&[], 3.0).is_empty());
    }

    #[test]
    fn histogram_single_return() {
        let svg = generate_return_histogram_svg(&[3.5], 3.0);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("3.0% target"));
    }

    #[test]
    fn histogram_spreads_bins() {
        let svg = generate_return_histogram_svg(&[3.1, 3.5, 4.0, 5.5, 8.0], 3.0);
        assert!(svg.contains("fill=\"#2563eb\""));
        assert!(svg.contains("stroke-dasharray"));
    }

    #[test]
    fn outcome_empty_batch() {
        let stats = BatchStats::compute(&[]);
        assert!(generate_outcome_svg(&stats).is_empty());
    }

    #[test]
    fn outcome_bars_and_labels() {
        let stats = BatchStats {
            total: 5,
            met: 3,
            unmet: 1,
            unresolved: 1,
            success_rate: Some(75.0),
            avg_return_pct: Some(4.0),
            avg_days_taken: Some(2.0),
        };
        let svg = generate_outcome_svg(&stats);

        assert!(svg.contains("Hit"));
        assert!(svg.contains("Missed"));
        assert!(svg.contains("Unresolved"));
        assert!(svg.contains("fill=\"#16a34a\""));
        assert!(svg.contains("fill=\"#dc2626\""));
        assert!(svg.contains("fill=\"#9ca3af\""));
    }

    #[test]
    fn outcome_zero_count_bar_omits_rect_keeps_label() {
        let stats = BatchStats {
            total: 2,
            met: 2,
            unmet: 0,
            unresolved: 0,
            success_rate: Some(100.0),
            avg_return_pct: Some(3.5),
            avg_days_taken: Some(1.0),
        };
        let svg = generate_outcome_svg(&stats);

        assert!(!svg.contains("fill=\"#dc2626\""));
        assert!(svg.contains("Missed"));
    }
}
