//! Pointer hit-testing and the selection transition.

use crate::cluster::cluster_nodes;
use crate::geom::{Point, point};
use cannimap_core::{Conflict, ConflictId, DashboardConfig, selection};

/// Resolves a pointer coordinate to the conflict owning the nearest node, or
/// `None` when every node is farther than the configured threshold (a valid
/// output, not a failure).
///
/// Nodes are recomputed with the same pure layout function the renderer uses,
/// so the tested geometry always matches the painted geometry. The minimum is
/// tracked with a strict `<`, so two equidistant nodes resolve to whichever
/// comes first in dataset order.
pub fn nearest_conflict(
    conflicts: &[Conflict],
    config: &DashboardConfig,
    width: f64,
    height: f64,
    pointer: Point,
) -> Option<ConflictId> {
    let mut best: Option<(f64, ConflictId)> = None;
    for node in cluster_nodes(conflicts, width, height, config) {
        let distance = (pointer - point(node.x, node.y)).length();
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, node.conflict_id));
        }
    }
    match best {
        Some((distance, id)) if distance <= config.hit.threshold_px => Some(id),
        _ => None,
    }
}

/// `on_pointer_down` semantics: resolve the nearest node, then toggle against
/// the current selection. Pure function of the current frame's layout and the
/// pointer coordinate; performs no drawing.
pub fn select_nearest(
    conflicts: &[Conflict],
    config: &DashboardConfig,
    width: f64,
    height: f64,
    pointer: Point,
    current: Option<ConflictId>,
) -> Option<ConflictId> {
    selection::toggle(
        current,
        nearest_conflict(conflicts, config, width, height, pointer),
    )
}
