use cannimap_core::{Conflict, DashboardConfig, Page, Severity, Theme};
use cannimap_render::model::DrawableElem;
use cannimap_render::svg::{SvgRenderOptions, render_cluster_svg};
use cannimap_render::{cluster_nodes, layout_cluster_chart};

fn page(position: f64, impressions: u64, clicks: u64, click_share: f64) -> Page {
    Page {
        url: format!("https://example.com/p{impressions}"),
        title: String::new(),
        position,
        clicks,
        impressions,
        ctr: 0.0,
        click_share,
        trend: Vec::new(),
    }
}

fn conflict(id: i64, pages: Vec<Page>) -> Conflict {
    Conflict {
        id,
        query: format!("query {id}"),
        severity: Severity::High,
        volatility: 3.0,
        pages,
    }
}

#[test]
fn layout_is_deterministic() {
    let conflicts = vec![
        conflict(1, vec![page(3.2, 4000, 200, 60.0), page(7.8, 1200, 80, 40.0)]),
        conflict(2, vec![page(5.0, 900, 30, 100.0)]),
    ];
    let config = DashboardConfig::default();
    let a = cluster_nodes(&conflicts, 640.0, 360.0, &config);
    let b = cluster_nodes(&conflicts, 640.0, 360.0, &config);
    assert_eq!(a, b);
}

#[test]
fn two_page_conflict_lands_inside_padded_plot_with_better_rank_higher() {
    let conflicts = vec![conflict(
        1,
        vec![page(3.2, 4000, 200, 60.0), page(7.8, 1200, 80, 40.0)],
    )];
    let config = DashboardConfig::default();
    let nodes = cluster_nodes(&conflicts, 600.0, 300.0, &config);
    assert_eq!(nodes.len(), 2);
    for n in &nodes {
        assert!(n.x >= 20.0 && n.x <= 580.0, "x out of bounds: {}", n.x);
        assert!(n.y >= 20.0 && n.y <= 280.0, "y out of bounds: {}", n.y);
    }
    // position 3.2 is the better rank and must render strictly higher on
    // screen (smaller y) than position 7.8
    assert!(nodes[0].y < nodes[1].y);
    // more impressions land further right
    assert!(nodes[0].x > nodes[1].x);
}

#[test]
fn identical_metric_values_still_produce_finite_centered_coordinates() {
    let conflicts = vec![conflict(
        1,
        vec![page(4.0, 1000, 50, 50.0), page(4.0, 1000, 50, 50.0)],
    )];
    let nodes = cluster_nodes(&conflicts, 400.0, 200.0, &DashboardConfig::default());
    assert_eq!(nodes.len(), 2);
    for n in &nodes {
        assert!(n.x.is_finite() && n.y.is_finite());
        assert_eq!(n.x, 200.0);
        assert_eq!(n.y, 100.0);
    }
}

#[test]
fn node_radius_is_clamped_by_click_volume() {
    let conflicts = vec![conflict(
        1,
        vec![
            page(1.0, 100, 0, 0.0),
            page(2.0, 200, 120, 50.0),
            page(3.0, 300, 100_000, 50.0),
        ],
    )];
    let config = DashboardConfig::default();
    let nodes = cluster_nodes(&conflicts, 600.0, 300.0, &config);
    assert_eq!(nodes[0].radius, config.cluster.min_radius);
    assert_eq!(nodes[1].radius, 10.0);
    assert_eq!(nodes[2].radius, config.cluster.max_radius);
}

#[test]
fn empty_dataset_renders_an_empty_but_valid_plot() {
    let config = DashboardConfig::default();
    let theme = Theme::default();
    let layout = layout_cluster_chart(&[], None, 600.0, 300.0, &config, &theme);
    assert!(layout.nodes.is_empty());
    assert!(layout.drawables.is_empty());
    let svg = render_cluster_svg(&layout, &SvgRenderOptions::default());
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn pairwise_edges_are_emitted_before_the_conflicts_nodes() {
    let conflicts = vec![conflict(
        1,
        vec![
            page(1.0, 100, 10, 30.0),
            page(2.0, 200, 10, 30.0),
            page(3.0, 300, 10, 40.0),
        ],
    )];
    let config = DashboardConfig::default();
    let theme = Theme::default();
    let layout = layout_cluster_chart(&conflicts, None, 600.0, 300.0, &config, &theme);

    let mut edge_at = None;
    let mut nodes_at = None;
    for (i, elem) in layout.drawables.iter().enumerate() {
        match elem {
            DrawableElem::Path { group_texts, data }
                if group_texts.contains(&"edges".to_string()) =>
            {
                // 3 pages -> all 3 pairwise edges, not a 2-segment path
                assert_eq!(data.len(), 3);
                edge_at = Some(i);
            }
            DrawableElem::Circle { group_texts, .. }
                if group_texts.contains(&"nodes".to_string()) =>
            {
                nodes_at = Some(i);
            }
            _ => {}
        }
    }
    assert!(edge_at.unwrap() < nodes_at.unwrap());
}

#[test]
fn active_conflict_gets_pulse_halos_and_inactive_does_not() {
    let conflicts = vec![
        conflict(1, vec![page(3.2, 4000, 200, 60.0), page(7.8, 1200, 80, 40.0)]),
        conflict(2, vec![page(5.0, 900, 30, 100.0)]),
    ];
    let config = DashboardConfig::default();
    let theme = Theme::default();

    let layout = layout_cluster_chart(&conflicts, Some(1), 600.0, 300.0, &config, &theme);
    let pulse_groups: Vec<&Vec<String>> = layout
        .drawables
        .iter()
        .filter_map(|e| match e {
            DrawableElem::Circle { group_texts, .. }
                if group_texts.contains(&"pulse".to_string()) =>
            {
                Some(group_texts)
            }
            _ => None,
        })
        .collect();
    assert_eq!(pulse_groups.len(), 1);
    assert!(pulse_groups[0].contains(&"cluster-1".to_string()));

    let svg = render_cluster_svg(&layout, &SvgRenderOptions::default());
    assert!(svg.contains(r#"<g class="pulse">"#));

    let inactive = layout_cluster_chart(&conflicts, None, 600.0, 300.0, &config, &theme);
    assert!(!inactive.drawables.iter().any(|e| matches!(
        e,
        DrawableElem::Circle { group_texts, .. } if group_texts.contains(&"pulse".to_string())
    )));
}

#[test]
fn severity_legend_lists_present_tiers_in_tier_order() {
    let mut a = conflict(1, vec![page(1.0, 100, 10, 100.0)]);
    a.severity = Severity::Low;
    let mut b = conflict(2, vec![page(2.0, 200, 10, 100.0)]);
    b.severity = Severity::Critical;

    // dataset order low-before-critical; legend must still lead with critical
    let layout = layout_cluster_chart(
        &[a, b],
        None,
        600.0,
        300.0,
        &DashboardConfig::default(),
        &Theme::default(),
    );
    let labels: Vec<String> = layout
        .drawables
        .iter()
        .filter_map(|e| match e {
            DrawableElem::Text { group_texts, data }
                if group_texts.first().is_some_and(|g| g == "legend") =>
            {
                Some(data.iter().map(|t| t.text.clone()).collect::<Vec<_>>())
            }
            _ => None,
        })
        .flatten()
        .collect();
    assert_eq!(labels, vec!["critical".to_string(), "low".to_string()]);
}
