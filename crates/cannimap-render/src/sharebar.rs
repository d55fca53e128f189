//! Click-share bar: one horizontal segment per page of a conflict.

use crate::model::{DrawableElem, RectData, ShareBarLayout};
use cannimap_core::metrics::share_segments;
use cannimap_core::{Conflict, Theme};

/// Lays out the conflict's click-share split in a `width` × `height` box.
///
/// Segment widths come straight from each page's `click_share` percentage.
/// Totals that don't sum to 100 are tolerated, never renormalized: overflow
/// is clipped at the right edge and underflow leaves the bar short.
pub fn layout_share_bar(
    conflict: &Conflict,
    width: f64,
    height: f64,
    theme: &Theme,
) -> ShareBarLayout {
    let mut rects: Vec<RectData> = Vec::new();
    let mut x = 0.0_f64;
    for segment in share_segments(conflict) {
        if x >= width {
            break;
        }
        let w = (width * segment.width_percent / 100.0).min(width - x);
        if w <= 0.0 {
            continue;
        }
        rects.push(RectData {
            x,
            y: 0.0,
            width: w,
            height,
            fill: theme.page_color(segment.color_index).to_string(),
            stroke_fill: "none".to_string(),
            stroke_width: 0.0,
        });
        x += w;
    }

    let drawables = if rects.is_empty() {
        Vec::new()
    } else {
        vec![DrawableElem::Rect {
            group_texts: vec!["share".to_string()],
            data: rects,
        }]
    };

    ShareBarLayout {
        width,
        height,
        drawables,
    }
}
