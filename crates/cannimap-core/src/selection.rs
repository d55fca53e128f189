//! Active-cluster selection state.
//!
//! The only mutable state the engine owns. One writer (the pointer handler),
//! any number of readers (renderers, the host's detail panel).

use crate::model::ConflictId;

/// Pure toggle transition applied to a hit-test resolution.
///
/// Resolving the currently active conflict deselects it; resolving another
/// conflict selects it; a miss (`None`) leaves the selection unchanged.
pub fn toggle(current: Option<ConflictId>, resolved: Option<ConflictId>) -> Option<ConflictId> {
    match resolved {
        Some(id) if current == Some(id) => None,
        Some(id) => Some(id),
        None => current,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    active: Option<ConflictId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<ConflictId> {
        self.active
    }

    /// Stores a new selection value. All writes go through here.
    pub fn set(&mut self, next: Option<ConflictId>) {
        if next != self.active {
            tracing::debug!(from = ?self.active, to = ?next, "selection changed");
        }
        self.active = next;
    }

    /// Clears the selection. Called on every snapshot swap so a stale id can
    /// never outlive its dataset.
    pub fn reset(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_selects_and_deselects() {
        assert_eq!(toggle(None, Some(3)), Some(3));
        assert_eq!(toggle(Some(3), Some(3)), None);
        assert_eq!(toggle(Some(3), Some(4)), Some(4));
    }

    #[test]
    fn toggle_miss_leaves_selection_unchanged() {
        assert_eq!(toggle(Some(3), None), Some(3));
        assert_eq!(toggle(None, None), None);
    }

    #[test]
    fn reset_clears_active() {
        let mut selection = Selection::new();
        selection.set(Some(9));
        assert_eq!(selection.active(), Some(9));
        selection.reset();
        assert_eq!(selection.active(), None);
    }
}
