#![forbid(unsafe_code)]

//! `cannimap` is a headless cluster-visualization engine for keyword
//! cannibalization dashboards.
//!
//! The engine consumes read-only conflict snapshots, owns exactly one piece
//! of mutable state (the active-cluster selection) and renders a cluster
//! scatter chart, a per-page trend chart and a click-share bar to SVG. Hosts
//! wire [`Dashboard::on_pointer_down`] to their input system, give every
//! render call the current surface dimensions, and read the selection back to
//! drive a detail panel.
//!
//! # Features
//!
//! - `raster`: PNG/JPG export of rendered charts via pure-Rust SVG
//!   rasterization (`cannimap::render::raster`)

pub use cannimap_core::*;

pub mod render {
    pub use cannimap_render::geom;
    pub use cannimap_render::model::{
        ClusterChartLayout, ClusterNode, DrawableElem, ShareBarLayout, TrendChartLayout,
    };
    pub use cannimap_render::svg::{
        SvgRenderOptions, render_cluster_svg, render_share_bar_svg, render_trend_svg,
    };
    pub use cannimap_render::{
        LinearScale, ScaleDirection, cluster_nodes, layout_cluster_chart, layout_share_bar,
        layout_trend_chart, nearest_conflict, select_nearest,
    };

    #[cfg(feature = "raster")]
    pub mod raster;
}

use crate::render::SvgRenderOptions;
use cannimap_render::geom::point;

/// Converts an arbitrary string into a conservative SVG `id` token.
///
/// The chart writers use the root `<svg id="…">` value to scope their CSS
/// (pulse keyframes in particular). Hosts inlining several charts into one
/// page should run each id through this first so those internal names never
/// collide.
pub fn sanitize_svg_id(raw: &str) -> String {
    let mut out: String = raw
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') {
                ch
            } else {
                '-'
            }
        })
        .collect();
    while out.contains("--") {
        out = out.replace("--", "-");
    }
    let out = out.trim_matches('-');
    if out.is_empty() {
        return "chart".to_string();
    }
    if out.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        out.to_string()
    } else {
        format!("c-{out}")
    }
}

/// The engine: one snapshot, one selection, render entry points.
///
/// All geometry is recomputed per call from the snapshot and the dimensions
/// the host passes in, so a resize can never observe stale coordinates.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    conflicts: Vec<Conflict>,
    selection: Selection,
    config: DashboardConfig,
    theme: Theme,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DashboardConfig, theme: Theme) -> Self {
        Self {
            conflicts: Vec::new(),
            selection: Selection::new(),
            config,
            theme,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Atomically replaces the dataset. The previous selection is cleared so
    /// a stale id can never outlive its snapshot.
    pub fn load_snapshot(&mut self, conflicts: Vec<Conflict>) {
        tracing::debug!(conflicts = conflicts.len(), "snapshot swap");
        self.conflicts = conflicts;
        self.selection.reset();
    }

    pub fn load_snapshot_value(&mut self, value: &serde_json::Value) -> Result<()> {
        let conflicts = decode_snapshot(value)?;
        self.load_snapshot(conflicts);
        Ok(())
    }

    pub fn load_snapshot_json(&mut self, text: &str) -> Result<()> {
        let conflicts = decode_snapshot_str(text)?;
        self.load_snapshot(conflicts);
        Ok(())
    }

    pub fn active_conflict_id(&self) -> Option<ConflictId> {
        self.selection.active()
    }

    pub fn active_conflict(&self) -> Option<&Conflict> {
        let id = self.selection.active()?;
        self.conflicts.iter().find(|c| c.id == id)
    }

    pub fn conflict(&self, id: ConflictId) -> Option<&Conflict> {
        self.conflicts.iter().find(|c| c.id == id)
    }

    /// Resolves a pointer-down against the cluster chart rendered at
    /// `width` × `height` and applies the selection toggle. Returns the new
    /// active conflict id.
    pub fn on_pointer_down(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Option<ConflictId> {
        let next = cannimap_render::select_nearest(
            &self.conflicts,
            &self.config,
            width,
            height,
            point(x, y),
            self.selection.active(),
        );
        self.selection.set(next);
        next
    }

    pub fn cluster_layout(&self, width: f64, height: f64) -> render::ClusterChartLayout {
        cannimap_render::layout_cluster_chart(
            &self.conflicts,
            self.selection.active(),
            width,
            height,
            &self.config,
            &self.theme,
        )
    }

    pub fn cluster_svg(&self, width: f64, height: f64) -> String {
        cannimap_render::svg::render_cluster_svg(
            &self.cluster_layout(width, height),
            &SvgRenderOptions::default(),
        )
    }

    /// Trend chart for the active conflict, or `None` when nothing is
    /// selected.
    pub fn trend_layout(&self, width: f64, height: f64) -> Option<render::TrendChartLayout> {
        let conflict = self.active_conflict()?;
        Some(cannimap_render::layout_trend_chart(
            conflict,
            width,
            height,
            &self.config,
            &self.theme,
        ))
    }

    pub fn trend_svg(&self, width: f64, height: f64) -> Option<String> {
        Some(cannimap_render::svg::render_trend_svg(
            &self.trend_layout(width, height)?,
            &SvgRenderOptions::default(),
        ))
    }

    /// Click-share bar for one conflict, or `None` for an unknown id.
    pub fn share_bar_svg(&self, id: ConflictId, width: f64, height: f64) -> Option<String> {
        let conflict = self.conflict(id)?;
        let layout = cannimap_render::layout_share_bar(conflict, width, height, &self.theme);
        Some(cannimap_render::svg::render_share_bar_svg(
            &layout,
            &SvgRenderOptions::default(),
        ))
    }
}
