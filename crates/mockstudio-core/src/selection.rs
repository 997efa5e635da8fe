//! Selection and grouping engine.

use crate::element::{ElementId, GroupKey, new_group_key};
use crate::scene::Scene;

/// The set of currently selected element ids.
///
/// Transient view state: never persisted, pruned whenever elements are
/// deleted. Insertion-ordered and duplicate-free.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: Vec<ElementId>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected ids, in selection order.
    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    /// Whether an element is selected.
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of selected elements.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replace the selection with a single element.
    pub fn select_only(&mut self, id: ElementId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Handle a click on an element.
    ///
    /// The effective target is the whole group when the clicked element
    /// carries a `parent_id` (clicking any member selects the group).
    /// Without `additive` the selection is replaced by the target set.
    /// With `additive` (shift-click) the target toggles all-or-nothing:
    /// if every target id is already selected they all leave the
    /// selection, otherwise they all join it.
    pub fn toggle(&mut self, scene: &Scene, id: ElementId, additive: bool) {
        let target = Self::effective_target(scene, id);
        if target.is_empty() {
            return;
        }

        if additive {
            let all_selected = target.iter().all(|tid| self.ids.contains(tid));
            if all_selected {
                self.ids.retain(|sid| !target.contains(sid));
            } else {
                for tid in target {
                    if !self.ids.contains(&tid) {
                        self.ids.push(tid);
                    }
                }
            }
        } else {
            self.ids = target;
        }
    }

    /// Replace the selection with the union of the effective targets of
    /// the given ids. An empty list deselects everything.
    pub fn replace(&mut self, scene: &Scene, ids: &[ElementId]) {
        self.ids.clear();
        for id in ids {
            for tid in Self::effective_target(scene, *id) {
                if !self.ids.contains(&tid) {
                    self.ids.push(tid);
                }
            }
        }
    }

    /// Resolve a clicked id to its effective selection target.
    fn effective_target(scene: &Scene, id: ElementId) -> Vec<ElementId> {
        match scene.get(id) {
            Some(element) => match &element.parent_id {
                Some(key) => scene.group_members(key),
                None => vec![id],
            },
            None => Vec::new(),
        }
    }

    /// Stamp one fresh group key on every selected element.
    ///
    /// Requires at least two selected elements; returns the new key, or
    /// `None` if the selection is too small. Groups are a flat tag, so
    /// regrouping already-grouped members simply moves them to the new
    /// key.
    pub fn group(&self, scene: &mut Scene) -> Option<GroupKey> {
        if self.ids.len() < 2 {
            return None;
        }
        let key = new_group_key();
        for element in scene.iter_mut() {
            if self.ids.contains(&element.id) {
                element.parent_id = Some(key.clone());
            }
        }
        Some(key)
    }

    /// Dissolve every group touched by the selection.
    ///
    /// Clears `parent_id` on *all* members of each touched group, not
    /// just the selected subset.
    pub fn ungroup(&self, scene: &mut Scene) {
        let mut keys: Vec<GroupKey> = Vec::new();
        for id in &self.ids {
            if let Some(key) = scene.get(*id).and_then(|el| el.parent_id.clone()) {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        if keys.is_empty() {
            return;
        }
        for element in scene.iter_mut() {
            if let Some(ref key) = element.parent_id {
                if keys.contains(key) {
                    element.parent_id = None;
                }
            }
        }
    }

    /// Drop ids that no longer reference a live element.
    ///
    /// Must run in the same synchronous step as any scene deletion.
    pub fn prune(&mut self, scene: &Scene) {
        self.ids.retain(|id| scene.contains(*id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    fn scene_with(n: usize) -> (Scene, Vec<ElementId>) {
        let mut scene = Scene::new();
        let ids = (0..n).map(|_| scene.add_element(ElementKind::Text)).collect();
        (scene, ids)
    }

    #[test]
    fn test_plain_click_replaces() {
        let (scene, ids) = scene_with(2);
        let mut sel = Selection::new();

        sel.toggle(&scene, ids[0], false);
        assert_eq!(sel.ids(), &[ids[0]]);

        sel.toggle(&scene, ids[1], false);
        assert_eq!(sel.ids(), &[ids[1]]);
    }

    #[test]
    fn test_shift_click_accumulates_and_toggles_off() {
        let (scene, ids) = scene_with(2);
        let mut sel = Selection::new();

        sel.toggle(&scene, ids[0], true);
        sel.toggle(&scene, ids[1], true);
        assert_eq!(sel.len(), 2);

        // Second shift-click on a fully selected target removes it.
        sel.toggle(&scene, ids[1], true);
        assert_eq!(sel.ids(), &[ids[0]]);
    }

    #[test]
    fn test_group_click_through() {
        let (mut scene, ids) = scene_with(3);
        let mut sel = Selection::new();
        sel.toggle(&scene, ids[0], false);
        sel.toggle(&scene, ids[1], true);
        sel.group(&mut scene).unwrap();

        // Clicking one member selects the whole group.
        let mut fresh = Selection::new();
        fresh.toggle(&scene, ids[1], false);
        assert_eq!(fresh.len(), 2);
        assert!(fresh.is_selected(ids[0]));
        assert!(fresh.is_selected(ids[1]));
        assert!(!fresh.is_selected(ids[2]));
    }

    #[test]
    fn test_shift_click_partial_group_adds_all() {
        // Scenario: 2 of 3 group siblings selected, shift-click a member.
        let (mut scene, ids) = scene_with(3);
        let mut sel = Selection::new();
        for id in &ids {
            sel.toggle(&scene, *id, true);
        }
        sel.group(&mut scene).unwrap();

        let mut partial = Selection::new();
        partial.ids = vec![ids[0], ids[1]];
        partial.toggle(&scene, ids[0], true);

        // Not-all-selected => add-all branch: all 3 selected.
        assert_eq!(partial.len(), 3);
    }

    #[test]
    fn test_shift_click_full_group_removes_all() {
        let (mut scene, ids) = scene_with(2);
        let mut sel = Selection::new();
        for id in &ids {
            sel.toggle(&scene, *id, true);
        }
        sel.group(&mut scene).unwrap();

        sel.toggle(&scene, ids[0], true);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_group_requires_two() {
        let (mut scene, ids) = scene_with(1);
        let mut sel = Selection::new();
        sel.select_only(ids[0]);

        assert!(sel.group(&mut scene).is_none());
        assert!(scene.get(ids[0]).unwrap().parent_id.is_none());
    }

    #[test]
    fn test_ungroup_releases_whole_group() {
        let (mut scene, ids) = scene_with(3);
        let mut sel = Selection::new();
        for id in &ids {
            sel.toggle(&scene, *id, true);
        }
        sel.group(&mut scene).unwrap();

        // Ungroup with only one member selected.
        let mut partial = Selection::new();
        partial.select_only(ids[1]);
        partial.ungroup(&mut scene);

        for id in &ids {
            assert!(scene.get(*id).unwrap().parent_id.is_none());
        }
    }

    #[test]
    fn test_prune_drops_dead_ids() {
        let (mut scene, ids) = scene_with(2);
        let mut sel = Selection::new();
        sel.toggle(&scene, ids[0], true);
        sel.toggle(&scene, ids[1], true);

        scene.remove_element(ids[0]);
        sel.prune(&scene);

        assert_eq!(sel.ids(), &[ids[1]]);
    }
}
