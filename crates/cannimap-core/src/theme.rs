//! Chart theme: page palette, severity colors and surface colors.
//!
//! Overrides follow the `themeVariables` convention: a flat JSON object with
//! the palette as a comma-separated list and individual color keys.

use crate::model::Severity;
use serde_json::Value;

fn theme_string(cfg: &Value, key: &str) -> Option<String> {
    cfg.get("themeVariables")?
        .get(key)?
        .as_str()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn default_palette() -> Vec<String> {
    "#4E79A7,#F28E2B,#59A14F,#E15759,#B07AA1,#76B7B2,#EDC948,#9C755F"
        .split(',')
        .map(|s| s.trim().to_string())
        .collect()
}

/// Parses `#rrggbb` into components. Shorthand and named colors pass through
/// untouched wherever this is used for derivation.
fn parse_hex_rgb(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Moves a hex color toward white by `amount` in `[0, 1]`. Non-hex inputs are
/// returned unchanged so themes may use named CSS colors.
pub fn lighten_hex(color: &str, amount: f64) -> String {
    let Some((r, g, b)) = parse_hex_rgb(color) else {
        return color.to_string();
    };
    let t = amount.clamp(0.0, 1.0);
    let lift = |c: u8| -> u8 { (c as f64 + (255.0 - c as f64) * t).round() as u8 };
    format!("#{:02x}{:02x}{:02x}", lift(r), lift(g), lift(b))
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub background_color: String,
    pub grid_color: String,
    pub label_color: String,
    pub legend_color: String,
    /// Ordinal page colors, cycled by a node's index within its conflict.
    pub palette: Vec<String>,
    pub severity_critical: String,
    pub severity_high: String,
    pub severity_medium: String,
    pub severity_low: String,
    /// Inner core dot of each cluster node.
    pub core_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_color: "white".to_string(),
            grid_color: "#E3E6EB".to_string(),
            label_color: "#6B7280".to_string(),
            legend_color: "#374151".to_string(),
            palette: default_palette(),
            severity_critical: "#DC2626".to_string(),
            severity_high: "#EA580C".to_string(),
            severity_medium: "#D97706".to_string(),
            severity_low: "#16A34A".to_string(),
            core_color: "#1F2937".to_string(),
        }
    }
}

impl Theme {
    pub fn from_value(cfg: &Value) -> Self {
        let base = Self::default();
        let palette = theme_string(cfg, "palette")
            .map(|s| {
                s.split(',')
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|p| !p.is_empty())
            .unwrap_or(base.palette);

        Self {
            background_color: theme_string(cfg, "background").unwrap_or(base.background_color),
            grid_color: theme_string(cfg, "gridColor").unwrap_or(base.grid_color),
            label_color: theme_string(cfg, "labelColor").unwrap_or(base.label_color),
            legend_color: theme_string(cfg, "legendColor").unwrap_or(base.legend_color),
            palette,
            severity_critical: theme_string(cfg, "severityCritical")
                .unwrap_or(base.severity_critical),
            severity_high: theme_string(cfg, "severityHigh").unwrap_or(base.severity_high),
            severity_medium: theme_string(cfg, "severityMedium").unwrap_or(base.severity_medium),
            severity_low: theme_string(cfg, "severityLow").unwrap_or(base.severity_low),
            core_color: theme_string(cfg, "coreColor").unwrap_or(base.core_color),
        }
    }

    pub fn severity_color(&self, severity: Severity) -> &str {
        match severity {
            Severity::Critical => &self.severity_critical,
            Severity::High => &self.severity_high,
            Severity::Medium => &self.severity_medium,
            Severity::Low => &self.severity_low,
        }
    }

    /// Color for the page at `color_index` within its conflict, cycling the
    /// palette so the same ordinal role reads consistently across clusters.
    pub fn page_color(&self, color_index: usize) -> &str {
        if self.palette.is_empty() {
            return &self.core_color;
        }
        &self.palette[color_index % self.palette.len()]
    }
}
