//! Derived visual metrics.
//!
//! Three independent calculators, each total over well-typed numeric input:
//! the severity bucket, click-share bar segments, and the pulse-size mapping.
//! None of them touch selection or layout state.

use crate::model::{Conflict, Severity};
use crate::theme::Theme;

/// Volatility thresholds for the severity bucket, highest tier first.
const BUCKET_CRITICAL: f64 = 7.5;
const BUCKET_HIGH: f64 = 5.0;
const BUCKET_MEDIUM: f64 = 2.5;

/// Buckets a volatility score into a severity tier.
///
/// Unmapped input (negative, NaN, infinite) falls back to the lowest tier.
pub fn severity_bucket(volatility: f64) -> Severity {
    if !volatility.is_finite() || volatility < 0.0 {
        return Severity::Low;
    }
    if volatility >= BUCKET_CRITICAL {
        Severity::Critical
    } else if volatility >= BUCKET_HIGH {
        Severity::High
    } else if volatility >= BUCKET_MEDIUM {
        Severity::Medium
    } else {
        Severity::Low
    }
}

impl Severity {
    /// Display weight: badges and legend entries scale their emphasis by this.
    pub fn weight(self) -> u8 {
        match self {
            Severity::Critical => 4,
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }
}

/// One segment of a click-share bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShareSegment {
    /// Width as a percentage of the whole bar, taken from the page's
    /// `click_share` as-is. Segments are NOT renormalized when a conflict's
    /// shares don't sum to 100; the renderer clips instead.
    pub width_percent: f64,
    /// Palette slot, equal to the page's index within the conflict.
    pub color_index: usize,
}

/// Emits one bar segment per page, flooring negative or non-finite shares to
/// zero. Input order is preserved.
pub fn share_segments(conflict: &Conflict) -> Vec<ShareSegment> {
    conflict
        .pages
        .iter()
        .enumerate()
        .map(|(i, page)| ShareSegment {
            width_percent: if page.click_share.is_finite() {
                page.click_share.max(0.0)
            } else {
                0.0
            },
            color_index: i,
        })
        .collect()
}

const PULSE_MIN_RADIUS: f64 = 4.0;
const PULSE_MAX_RADIUS: f64 = 18.0;
const PULSE_RADIUS_PER_UNIT: f64 = 1.4;

/// Maps a volatility scalar to a bounded halo radius. Used purely for
/// animation sizing.
pub fn pulse_radius(volatility: f64) -> f64 {
    if !volatility.is_finite() {
        return PULSE_MIN_RADIUS;
    }
    (PULSE_MIN_RADIUS + volatility.max(0.0) * PULSE_RADIUS_PER_UNIT)
        .clamp(PULSE_MIN_RADIUS, PULSE_MAX_RADIUS)
}

/// Pulse halo color, mirroring the severity bucket's thresholds.
pub fn pulse_color(theme: &Theme, volatility: f64) -> &str {
    theme.severity_color(severity_bucket(volatility))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    fn page(click_share: f64) -> Page {
        Page {
            url: "https://example.com".to_string(),
            title: String::new(),
            position: 1.0,
            clicks: 0,
            impressions: 0,
            ctr: 0.0,
            click_share,
            trend: Vec::new(),
        }
    }

    fn conflict(shares: &[f64]) -> Conflict {
        Conflict {
            id: 1,
            query: "q".to_string(),
            severity: Severity::Low,
            volatility: 0.0,
            pages: shares.iter().copied().map(page).collect(),
        }
    }

    #[test]
    fn severity_bucket_thresholds() {
        assert_eq!(severity_bucket(9.0), Severity::Critical);
        assert_eq!(severity_bucket(7.5), Severity::Critical);
        assert_eq!(severity_bucket(5.0), Severity::High);
        assert_eq!(severity_bucket(2.5), Severity::Medium);
        assert_eq!(severity_bucket(2.4), Severity::Low);
        assert_eq!(severity_bucket(0.0), Severity::Low);
    }

    #[test]
    fn severity_bucket_falls_back_to_lowest_tier() {
        assert_eq!(severity_bucket(-1.0), Severity::Low);
        assert_eq!(severity_bucket(f64::NAN), Severity::Low);
        assert_eq!(severity_bucket(f64::INFINITY), Severity::Low);
    }

    #[test]
    fn share_segments_do_not_renormalize() {
        // Sums of 97 and 103 pass through untouched.
        for shares in [[60.0, 37.0], [60.0, 43.0]] {
            let segments = share_segments(&conflict(&shares));
            let widths: Vec<f64> = segments.iter().map(|s| s.width_percent).collect();
            assert_eq!(widths, shares);
        }
    }

    #[test]
    fn share_segments_floor_negative_and_nan_to_zero() {
        let segments = share_segments(&conflict(&[-5.0, f64::NAN, 40.0]));
        let widths: Vec<f64> = segments.iter().map(|s| s.width_percent).collect();
        assert_eq!(widths, vec![0.0, 0.0, 40.0]);
        assert_eq!(segments[2].color_index, 2);
    }

    #[test]
    fn pulse_radius_is_clamped_linear() {
        assert_eq!(pulse_radius(0.0), PULSE_MIN_RADIUS);
        assert_eq!(pulse_radius(5.0), PULSE_MIN_RADIUS + 5.0 * PULSE_RADIUS_PER_UNIT);
        assert_eq!(pulse_radius(1000.0), PULSE_MAX_RADIUS);
        assert_eq!(pulse_radius(f64::NAN), PULSE_MIN_RADIUS);
    }

    #[test]
    fn pulse_color_mirrors_severity_bucket() {
        let theme = Theme::default();
        assert_eq!(pulse_color(&theme, 9.0), theme.severity_critical);
        assert_eq!(pulse_color(&theme, 1.0), theme.severity_low);
    }
}
