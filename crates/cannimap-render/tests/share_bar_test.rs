use cannimap_core::{Conflict, Page, Severity, Theme};
use cannimap_render::layout_share_bar;
use cannimap_render::model::DrawableElem;

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
        query: "query".to_string(),
        severity: Severity::Low,
        volatility: 0.0,
        pages: shares.iter().copied().map(page).collect(),
    }
}

fn rects(layout: &cannimap_render::model::ShareBarLayout) -> Vec<(f64, f64)> {
    match layout.drawables.first() {
        Some(DrawableElem::Rect { data, .. }) => data.iter().map(|r| (r.x, r.width)).collect(),
        _ => Vec::new(),
    }
}

#[test]
fn widths_come_straight_from_click_share_percentages() {
    let layout = layout_share_bar(&conflict(&[60.0, 40.0]), 200.0, 8.0, &Theme::default());
    assert_eq!(rects(&layout), vec![(0.0, 120.0), (120.0, 80.0)]);
}

#[test]
fn underflowing_totals_leave_the_bar_short_instead_of_renormalizing() {
    // shares sum to 97: the bar ends at 97% of the box, untouched
    let layout = layout_share_bar(&conflict(&[60.0, 37.0]), 100.0, 8.0, &Theme::default());
    assert_eq!(rects(&layout), vec![(0.0, 60.0), (60.0, 37.0)]);
}

#[test]
fn overflowing_totals_are_clipped_at_the_box_edge() {
    // shares sum to 103: the second segment is clipped to the remaining 40px
    let layout = layout_share_bar(&conflict(&[60.0, 43.0]), 100.0, 8.0, &Theme::default());
    assert_eq!(rects(&layout), vec![(0.0, 60.0), (60.0, 40.0)]);
}

#[test]
fn negative_shares_are_floored_and_emit_no_rect() {
    let layout = layout_share_bar(&conflict(&[-20.0, 50.0]), 100.0, 8.0, &Theme::default());
    let r = rects(&layout);
    assert_eq!(r, vec![(0.0, 50.0)]);
}

#[test]
fn segment_colors_follow_page_order() {
    let theme = Theme::default();
    let layout = layout_share_bar(&conflict(&[30.0, 30.0, 40.0]), 100.0, 8.0, &theme);
    let Some(DrawableElem::Rect { data, .. }) = layout.drawables.first() else {
        panic!("expected rect drawable");
    };
    assert_eq!(data[0].fill, theme.page_color(0));
    assert_eq!(data[1].fill, theme.page_color(1));
    assert_eq!(data[2].fill, theme.page_color(2));
}
