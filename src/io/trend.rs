//! Text line chart of risk score over time.

use crate::history::TrendPoint;

pub const DEFAULT_CHART_HEIGHT: usize = 10;
pub const MAX_CHART_HEIGHT: usize = 100;

/// Render `points` (already in date order) as a fixed-height ASCII chart.
///
/// Each point takes one column; consecutive points are joined by a
/// vertical run of `:` so the direction of change is visible. `height` is
/// clamped to `1..=MAX_CHART_HEIGHT`.
pub fn render_trend(title: &str, points: &[TrendPoint], height: usize) -> String {
    let height = height.clamp(1, MAX_CHART_HEIGHT);
    if points.is_empty() {
        return format!("{}\n  No historical records available.\n", title);
    }

    let level = |score: u8| (usize::from(score) * height + 50) / 100;
    let levels: Vec<usize> = points.iter().map(|p| level(p.score)).collect();

    let mut out = format!("{}\n", title);
    for row in (0..=height).rev() {
        let axis_value = row * 100 / height;
        let mut line = format!("{:>4} |", axis_value);
        for (i, &lvl) in levels.iter().enumerate() {
            let prev = if i == 0 { lvl } else { levels[i - 1] };
            let (lo, hi) = (prev.min(lvl), prev.max(lvl));
            let cell = if lvl == row {
                'o'
            } else if row > lo && row < hi {
                ':'
            } else {
                ' '
            };
            line.push(' ');
            line.push(cell);
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(&format!("     +{}\n", "-".repeat(points.len() * 2)));
    let first = points[0].date.format("%Y-%m-%d").to_string();
    let last = points[points.len() - 1].date.format("%Y-%m-%d").to_string();
    if points.len() == 1 || first == last {
        out.push_str(&format!("      {}\n", first));
    } else {
        out.push_str(&format!("      {} .. {} ({} points)\n", first, last, points.len()));
    }
    out
}

/// Chart heading for an optional task filter.
pub fn trend_title(task: Option<&str>) -> String {
    match task {
        Some(task) => format!("Risk Trend ({})", task),
        None => "Risk Trend (All Tasks)".to_string(),
    }
}
