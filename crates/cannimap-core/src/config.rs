//! Typed dashboard configuration with JSON overrides.
//!
//! Hosts pass overrides as a JSON document (`{"cluster": {"padding": 24}}`).
//! Absent or mistyped keys keep their defaults; overrides never panic.

use serde_json::Value;

fn json_f64(v: &Value) -> Option<f64> {
    v.as_f64()
        .or_else(|| v.as_i64().map(|n| n as f64))
        .or_else(|| v.as_u64().map(|n| n as f64))
}

fn config_f64(cfg: &Value, path: &[&str]) -> Option<f64> {
    let mut cur = cfg;
    for key in path {
        cur = cur.get(*key)?;
    }
    json_f64(cur).filter(|v| v.is_finite())
}

fn config_u32(cfg: &Value, path: &[&str]) -> Option<u32> {
    config_f64(cfg, path)
        .filter(|v| *v >= 0.0)
        .map(|v| v as u32)
}

/// Cluster plot geometry.
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Pixel inset applied to every plot edge before scale construction.
    pub padding: f64,
    /// Grid lines are placed at `i / grid_divisions` fractions of each axis.
    pub grid_divisions: u32,
    /// `radius = clamp(clicks / radius_divisor, min_radius, max_radius)`.
    pub radius_divisor: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Fixed inner core dot, kept visible at small node radii.
    pub core_radius: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            padding: 20.0,
            grid_divisions: 4,
            radius_divisor: 12.0,
            min_radius: 6.0,
            max_radius: 26.0,
            core_radius: 2.5,
        }
    }
}

/// Trend plot geometry.
#[derive(Debug, Clone)]
pub struct TrendConfig {
    pub padding: f64,
    pub line_width: f64,
    /// Width of the soft glow stroke drawn beneath each polyline.
    pub glow_width: f64,
    /// Marker dot at the most recent sample of each series.
    pub marker_radius: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            padding: 16.0,
            line_width: 2.0,
            glow_width: 6.0,
            marker_radius: 3.5,
        }
    }
}

/// Pointer hit-testing.
#[derive(Debug, Clone)]
pub struct HitConfig {
    /// Maximum distance, in pixels, between the pointer and a node center for
    /// the node to count as hit.
    pub threshold_px: f64,
}

impl Default for HitConfig {
    fn default() -> Self {
        Self { threshold_px: 14.0 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardConfig {
    pub cluster: ClusterConfig,
    pub trend: TrendConfig,
    pub hit: HitConfig,
}

impl DashboardConfig {
    /// Builds a config from a host-supplied JSON override document layered
    /// over the defaults.
    pub fn from_value(cfg: &Value) -> Self {
        let base = Self::default();
        Self {
            cluster: ClusterConfig {
                padding: config_f64(cfg, &["cluster", "padding"]).unwrap_or(base.cluster.padding),
                grid_divisions: config_u32(cfg, &["cluster", "gridDivisions"])
                    .unwrap_or(base.cluster.grid_divisions),
                radius_divisor: config_f64(cfg, &["cluster", "radiusDivisor"])
                    .filter(|v| *v > 0.0)
                    .unwrap_or(base.cluster.radius_divisor),
                min_radius: config_f64(cfg, &["cluster", "minRadius"])
                    .unwrap_or(base.cluster.min_radius),
                max_radius: config_f64(cfg, &["cluster", "maxRadius"])
                    .unwrap_or(base.cluster.max_radius),
                core_radius: config_f64(cfg, &["cluster", "coreRadius"])
                    .unwrap_or(base.cluster.core_radius),
            },
            trend: TrendConfig {
                padding: config_f64(cfg, &["trend", "padding"]).unwrap_or(base.trend.padding),
                line_width: config_f64(cfg, &["trend", "lineWidth"])
                    .unwrap_or(base.trend.line_width),
                glow_width: config_f64(cfg, &["trend", "glowWidth"])
                    .unwrap_or(base.trend.glow_width),
                marker_radius: config_f64(cfg, &["trend", "markerRadius"])
                    .unwrap_or(base.trend.marker_radius),
            },
            hit: HitConfig {
                threshold_px: config_f64(cfg, &["hit", "thresholdPx"])
                    .unwrap_or(base.hit.threshold_px),
            },
        }
    }
}
