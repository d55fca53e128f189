use cannimap_core::{Conflict, DashboardConfig, Page, Severity};
use cannimap_render::geom::point;
use cannimap_render::{cluster_nodes, nearest_conflict, select_nearest};

fn page(position: f64, impressions: u64) -> Page {
    Page {
        url: "https://example.com".to_string(),
        title: String::new(),
        position,
        clicks: 50,
        impressions,
        ctr: 0.0,
        click_share: 100.0,
        trend: Vec::new(),
    }
}

fn conflict(id: i64, pages: Vec<Page>) -> Conflict {
    Conflict {
        id,
        query: format!("query {id}"),
        severity: Severity::Medium,
        volatility: 1.0,
        pages,
    }
}

fn sample_conflicts() -> Vec<Conflict> {
    vec![
        conflict(1, vec![page(3.2, 4000), page(7.8, 1200)]),
        conflict(2, vec![page(5.0, 2500)]),
    ]
}

#[test]
fn clicking_exactly_on_a_node_selects_its_conflict() {
    let conflicts = sample_conflicts();
    let config = DashboardConfig::default();
    for node in cluster_nodes(&conflicts, 600.0, 300.0, &config) {
        let resolved = nearest_conflict(&conflicts, &config, 600.0, 300.0, point(node.x, node.y));
        assert_eq!(resolved, Some(node.conflict_id));
    }
}

#[test]
fn selecting_the_active_conflict_toggles_it_off_and_back_on() {
    let conflicts = sample_conflicts();
    let config = DashboardConfig::default();
    let node = cluster_nodes(&conflicts, 600.0, 300.0, &config)[0];
    let at = point(node.x, node.y);

    let first = select_nearest(&conflicts, &config, 600.0, 300.0, at, Some(node.conflict_id));
    assert_eq!(first, None);
    let second = select_nearest(&conflicts, &config, 600.0, 300.0, at, first);
    assert_eq!(second, Some(node.conflict_id));
}

#[test]
fn a_missed_click_resolves_to_none_and_keeps_the_prior_selection() {
    let conflicts = sample_conflicts();
    let config = DashboardConfig::default();
    // corner of the plot, well past the threshold from every padded node
    let far = point(0.0, 0.0);
    assert_eq!(nearest_conflict(&conflicts, &config, 600.0, 300.0, far), None);
    assert_eq!(
        select_nearest(&conflicts, &config, 600.0, 300.0, far, Some(2)),
        Some(2)
    );
    assert_eq!(select_nearest(&conflicts, &config, 600.0, 300.0, far, None), None);
}

#[test]
fn empty_dataset_never_resolves() {
    let config = DashboardConfig::default();
    assert_eq!(nearest_conflict(&[], &config, 600.0, 300.0, point(300.0, 150.0)), None);
    assert_eq!(
        select_nearest(&[], &config, 600.0, 300.0, point(300.0, 150.0), None),
        None
    );
}

#[test]
fn equidistant_nodes_resolve_to_the_first_in_dataset_order() {
    // Two single-page conflicts at the padded plot edges of a narrow plot:
    // x = 20 and x = 40, identical y. A click at x = 30 is 10px from both.
    let conflicts = vec![
        conflict(1, vec![page(5.0, 100)]),
        conflict(2, vec![page(5.0, 200)]),
    ];
    let config = DashboardConfig::default();
    let nodes = cluster_nodes(&conflicts, 60.0, 100.0, &config);
    assert_eq!(nodes[0].x, 20.0);
    assert_eq!(nodes[1].x, 40.0);
    assert_eq!(nodes[0].y, nodes[1].y);

    let resolved = nearest_conflict(&conflicts, &config, 60.0, 100.0, point(30.0, nodes[0].y));
    assert_eq!(resolved, Some(1));
}

#[test]
fn selection_does_not_survive_a_dimension_change_implicitly() {
    // Same dataset, different dimensions: geometry is recomputed from
    // scratch, so a point that hit at one size can miss at another.
    let conflicts = sample_conflicts();
    let config = DashboardConfig::default();
    let node = cluster_nodes(&conflicts, 600.0, 300.0, &config)[0];
    let at = point(node.x, node.y);
    let resolved_small = nearest_conflict(&conflicts, &config, 3000.0, 1500.0, at);
    let resolved_same = nearest_conflict(&conflicts, &config, 600.0, 300.0, at);
    assert_eq!(resolved_same, Some(node.conflict_id));
    assert_ne!(resolved_small, resolved_same);
}
