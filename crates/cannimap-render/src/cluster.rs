//! Cluster chart: one node per competing page, positioned by live metrics.
//!
//! The x axis is impressions, the y axis is average rank position. SVG y
//! grows downward, so mapping the position domain forward already renders
//! better (smaller) positions higher on screen.

use crate::model::{
    CircleData, ClusterChartLayout, ClusterNode, DrawableElem, PathData, RectData, TextData,
};
use crate::scale::{LinearScale, ScaleDirection};
use cannimap_core::metrics::{pulse_color, pulse_radius};
use cannimap_core::theme::lighten_hex;
use cannimap_core::{Conflict, ConflictId, DashboardConfig, Severity, Theme};

const GRID_LABEL_FONT_SIZE: f64 = 10.0;
const LEGEND_FONT_SIZE: f64 = 11.0;
const EDGE_DASH: &str = "4 3";

/// Axis label formatting: thousands collapse to `k` so impression counts stay
/// readable on a narrow plot.
fn fmt_label(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let (scaled, suffix) = if v.abs() >= 1000.0 {
        (v / 1000.0, "k")
    } else {
        (v, "")
    };
    let mut s = format!("{scaled:.1}");
    if s.ends_with(".0") {
        s.truncate(s.len() - 2);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    format!("{s}{suffix}")
}

fn cluster_scales(
    conflicts: &[Conflict],
    width: f64,
    height: f64,
    config: &DashboardConfig,
) -> Option<(LinearScale, LinearScale)> {
    let pad = config.cluster.padding;
    let sx = LinearScale::fit(
        conflicts
            .iter()
            .flat_map(|c| c.pages.iter())
            .map(|p| p.impressions as f64),
        (0.0, width),
        pad,
        ScaleDirection::Forward,
    )?;
    let sy = LinearScale::fit(
        conflicts
            .iter()
            .flat_map(|c| c.pages.iter())
            .map(|p| p.position),
        (0.0, height),
        pad,
        ScaleDirection::Forward,
    )?;
    Some((sx, sy))
}

/// Resolves every page of every conflict to screen space.
///
/// Pure function of (conflicts, dimensions, config): identical inputs always
/// yield identical coordinates. The hit-tester recomputes this instead of
/// caching, so geometry can never go stale across a resize.
pub fn cluster_nodes(
    conflicts: &[Conflict],
    width: f64,
    height: f64,
    config: &DashboardConfig,
) -> Vec<ClusterNode> {
    let Some((sx, sy)) = cluster_scales(conflicts, width, height, config) else {
        return Vec::new();
    };
    let mut nodes = Vec::new();
    for conflict in conflicts {
        for (page_index, page) in conflict.pages.iter().enumerate() {
            let radius = (page.clicks as f64 / config.cluster.radius_divisor)
                .max(config.cluster.min_radius)
                .min(config.cluster.max_radius);
            nodes.push(ClusterNode {
                x: sx.to_pixel(page.impressions as f64),
                y: sy.to_pixel(page.position),
                radius,
                color_index: page_index,
                conflict_id: conflict.id,
                page_index,
            });
        }
    }
    nodes
}

/// Lays out the full cluster chart for the currently visible conflict set.
///
/// One pass in dataset order; the active conflict is a style parameter inside
/// that pass, not a separate pass, so z-ordering across overlapping clusters
/// stays stable.
pub fn layout_cluster_chart(
    conflicts: &[Conflict],
    active: Option<ConflictId>,
    width: f64,
    height: f64,
    config: &DashboardConfig,
    theme: &Theme,
) -> ClusterChartLayout {
    let mut drawables: Vec<DrawableElem> = Vec::new();

    let scales = cluster_scales(conflicts, width, height, config);
    if let Some((sx, sy)) = &scales {
        let pad = config.cluster.padding;
        let (x0, x1) = (pad, width - pad);
        let (y0, y1) = (pad, height - pad);
        let divisions = config.cluster.grid_divisions.max(1);

        let mut lines: Vec<PathData> = Vec::new();
        let mut labels: Vec<TextData> = Vec::new();
        for i in 1..divisions {
            let f = f64::from(i) / f64::from(divisions);
            let gx = x0 + f * (x1 - x0);
            lines.push(PathData {
                path: format!("M {gx},{y0} L {gx},{y1}"),
                fill: None,
                stroke_fill: theme.grid_color.clone(),
                stroke_width: 1.0,
                stroke_dash: None,
                opacity: None,
            });
            labels.push(TextData {
                text: fmt_label(sx.to_value(gx)),
                x: gx,
                y: y1 + 4.0,
                fill: theme.label_color.clone(),
                font_size: GRID_LABEL_FONT_SIZE,
                vertical_pos: "top".to_string(),
                horizontal_pos: "center".to_string(),
            });

            let gy = y0 + f * (y1 - y0);
            lines.push(PathData {
                path: format!("M {x0},{gy} L {x1},{gy}"),
                fill: None,
                stroke_fill: theme.grid_color.clone(),
                stroke_width: 1.0,
                stroke_dash: None,
                opacity: None,
            });
            labels.push(TextData {
                text: fmt_label(sy.to_value(gy)),
                x: x0 - 4.0,
                y: gy,
                fill: theme.label_color.clone(),
                font_size: GRID_LABEL_FONT_SIZE,
                vertical_pos: "middle".to_string(),
                horizontal_pos: "right".to_string(),
            });
        }
        if !lines.is_empty() {
            drawables.push(DrawableElem::Path {
                group_texts: vec!["grid".to_string()],
                data: lines,
            });
            drawables.push(DrawableElem::Text {
                group_texts: vec!["grid".to_string(), "labels".to_string()],
                data: labels,
            });
        }
    } else {
        tracing::debug!("cluster chart: no samples, rendering empty plot");
    }

    let nodes = cluster_nodes(conflicts, width, height, config);

    let mut cursor = 0usize;
    for conflict in conflicts {
        let count = conflict.pages.len();
        if cursor + count > nodes.len() {
            break;
        }
        let conflict_nodes = &nodes[cursor..cursor + count];
        cursor += count;

        let is_active = active == Some(conflict.id);
        let group = vec!["clusters".to_string(), format!("cluster-{}", conflict.id)];
        let severity_color = theme.severity_color(conflict.severity);

        // All pairwise edges, emitted before the conflict's nodes.
        if count >= 2 {
            let mut edges: Vec<PathData> = Vec::new();
            for i in 0..count {
                for j in (i + 1)..count {
                    let (a, b) = (&conflict_nodes[i], &conflict_nodes[j]);
                    edges.push(PathData {
                        path: format!("M {},{} L {},{}", a.x, a.y, b.x, b.y),
                        fill: None,
                        stroke_fill: severity_color.to_string(),
                        stroke_width: if is_active { 1.6 } else { 1.0 },
                        stroke_dash: Some(EDGE_DASH.to_string()),
                        opacity: Some(if is_active { 0.6 } else { 0.35 }),
                    });
                }
            }
            let mut group_texts = group.clone();
            group_texts.push("edges".to_string());
            drawables.push(DrawableElem::Path {
                group_texts,
                data: edges,
            });
        }

        // Pulse halo behind the active conflict's nodes. The halo radius is
        // the volatility-driven pulse size; the SVG style block animates its
        // opacity.
        if is_active {
            let extra = pulse_radius(conflict.volatility);
            let halo_color = pulse_color(theme, conflict.volatility).to_string();
            let halos: Vec<CircleData> = conflict_nodes
                .iter()
                .map(|n| CircleData {
                    cx: n.x,
                    cy: n.y,
                    r: n.radius + extra,
                    fill: halo_color.clone(),
                    stroke_fill: "none".to_string(),
                    stroke_width: 0.0,
                    fill_opacity: Some(0.18),
                })
                .collect();
            let mut group_texts = group.clone();
            group_texts.push("pulse".to_string());
            drawables.push(DrawableElem::Circle {
                group_texts,
                data: halos,
            });
        }

        let circles: Vec<CircleData> = conflict_nodes
            .iter()
            .map(|n| {
                let base = theme.page_color(n.color_index);
                CircleData {
                    cx: n.x,
                    cy: n.y,
                    r: n.radius,
                    fill: if is_active {
                        lighten_hex(base, 0.25)
                    } else {
                        base.to_string()
                    },
                    stroke_fill: theme.core_color.clone(),
                    stroke_width: if is_active { 2.4 } else { 1.0 },
                    fill_opacity: None,
                }
            })
            .collect();
        let mut group_texts = group.clone();
        group_texts.push("nodes".to_string());
        drawables.push(DrawableElem::Circle {
            group_texts,
            data: circles,
        });

        // Fixed-size core dots keep small nodes visible.
        let cores: Vec<CircleData> = conflict_nodes
            .iter()
            .map(|n| CircleData {
                cx: n.x,
                cy: n.y,
                r: config.cluster.core_radius,
                fill: theme.core_color.clone(),
                stroke_fill: "none".to_string(),
                stroke_width: 0.0,
                fill_opacity: None,
            })
            .collect();
        let mut group_texts = group;
        group_texts.push("cores".to_string());
        drawables.push(DrawableElem::Circle {
            group_texts,
            data: cores,
        });
    }

    // Severity legend in tier order, independent of dataset order.
    let mut swatches: Vec<RectData> = Vec::new();
    let mut legend_labels: Vec<TextData> = Vec::new();
    let mut row = 0usize;
    for severity in Severity::ALL {
        if !conflicts.iter().any(|c| c.severity == severity) {
            continue;
        }
        let y = 14.0 + row as f64 * 16.0;
        swatches.push(RectData {
            x: width - 78.0,
            y: y - 4.5,
            width: 9.0,
            height: 9.0,
            fill: theme.severity_color(severity).to_string(),
            stroke_fill: "none".to_string(),
            stroke_width: 0.0,
        });
        legend_labels.push(TextData {
            text: severity.label().to_string(),
            x: width - 64.0,
            y,
            fill: theme.legend_color.clone(),
            font_size: LEGEND_FONT_SIZE,
            vertical_pos: "middle".to_string(),
            horizontal_pos: "left".to_string(),
        });
        row += 1;
    }
    if !swatches.is_empty() {
        drawables.push(DrawableElem::Rect {
            group_texts: vec!["legend".to_string(), "swatches".to_string()],
            data: swatches,
        });
        drawables.push(DrawableElem::Text {
            group_texts: vec!["legend".to_string(), "labels".to_string()],
            data: legend_labels,
        });
    }

    ClusterChartLayout {
        width,
        height,
        background_color: theme.background_color.clone(),
        nodes,
        drawables,
    }
}
