//! Trend chart: historical rank positions for the pages of one conflict.
//!
//! All series share one vertical domain on purpose: relative movement between
//! competing pages is the whole point of the chart, so per-series domains
//! would lie about which page overtook which.

use crate::model::{CircleData, DrawableElem, PathData, TrendChartLayout};
use crate::scale::{LinearScale, ScaleDirection};
use cannimap_core::{Conflict, DashboardConfig, Theme};

const GLOW_OPACITY: f64 = 0.25;

/// Builds an `M x,y L x,y …` path. A single point degenerates to a closed
/// zero-length subpath so the stroke still produces a dot with round caps.
fn line_path(points: &[(f64, f64)]) -> Option<String> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return Some(format!("M{},{}Z", first.0, first.1));
    }
    let mut out = format!("M{},{}", first.0, first.1);
    for p in rest {
        out.push_str(&format!("L{},{}", p.0, p.1));
    }
    Some(out)
}

/// Lays out one polyline per page of `conflict` over a shared vertical
/// domain padded by one rank unit on each side.
///
/// Pages with empty trend arrays are skipped and contribute nothing to the
/// shared domain. Series lengths may differ; each series spreads its own
/// indices across the full horizontal extent.
pub fn layout_trend_chart(
    conflict: &Conflict,
    width: f64,
    height: f64,
    config: &DashboardConfig,
    theme: &Theme,
) -> TrendChartLayout {
    let pad = config.trend.padding;
    let mut drawables: Vec<DrawableElem> = Vec::new();

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for page in &conflict.pages {
        for v in &page.trend {
            if v.is_finite() {
                min = min.min(*v);
                max = max.max(*v);
            }
        }
    }

    let scale_y = if min <= max {
        LinearScale::fit(
            [min - 1.0, max + 1.0],
            (0.0, height),
            pad,
            ScaleDirection::Forward,
        )
    } else {
        tracing::debug!(
            conflict = conflict.id,
            "trend chart: every series is empty, rendering empty plot"
        );
        None
    };

    if let Some(scale_y) = scale_y {
        let inner = width - 2.0 * pad;
        for (page_index, page) in conflict.pages.iter().enumerate() {
            let len = page.trend.len();
            if len == 0 {
                continue;
            }
            let points: Vec<(f64, f64)> = page
                .trend
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    // Single-sample series pin to the left edge of the plot.
                    let x = if len == 1 {
                        pad
                    } else {
                        pad + (i as f64) / ((len - 1) as f64) * inner
                    };
                    (x, scale_y.to_pixel(*v))
                })
                .collect();

            let Some(path) = line_path(&points) else {
                continue;
            };
            let color = theme.page_color(page_index).to_string();
            let group = vec!["series".to_string(), format!("series-{page_index}")];

            // Glow stroke first so the line reads on busy backgrounds.
            drawables.push(DrawableElem::Path {
                group_texts: group.clone(),
                data: vec![
                    PathData {
                        path: path.clone(),
                        fill: None,
                        stroke_fill: color.clone(),
                        stroke_width: config.trend.glow_width,
                        stroke_dash: None,
                        opacity: Some(GLOW_OPACITY),
                    },
                    PathData {
                        path,
                        fill: None,
                        stroke_fill: color.clone(),
                        stroke_width: config.trend.line_width,
                        stroke_dash: None,
                        opacity: None,
                    },
                ],
            });

            // Marker at the most recent sample.
            let (mx, my) = points[points.len() - 1];
            drawables.push(DrawableElem::Circle {
                group_texts: group,
                data: vec![CircleData {
                    cx: mx,
                    cy: my,
                    r: config.trend.marker_radius,
                    fill: color,
                    stroke_fill: theme.background_color.clone(),
                    stroke_width: 1.0,
                    fill_opacity: None,
                }],
            });
        }
    }

    TrendChartLayout {
        width,
        height,
        background_color: theme.background_color.clone(),
        drawables,
    }
}
