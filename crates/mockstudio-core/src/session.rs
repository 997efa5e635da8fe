//! Editing session: the explicit context object owning scene, selection,
//! background and the active template reference.

use crate::command::{Command, SelectMode};
use crate::element::{ElementId, ElementKind, ElementUpdate};
use crate::scene::Scene;
use crate::selection::Selection;
use crate::template::TemplateId;
use serde::{Deserialize, Serialize};

/// Background rendering mode for the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Solid,
    Gradient,
    Grid,
    Pattern,
}

/// Canvas background configuration.
///
/// `value` depends on the kind: a hex color for solid/grid, a
/// comma-separated color pair for gradients, a theme name for patterns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundConfig {
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Grid,
            value: "#16181d".to_string(),
            opacity: Some(0.1),
        }
    }
}

/// A full, independent copy of the editable state.
///
/// Stored inside project versions and the session blob; never a diff.
/// Snapshots own their element sequence, so mutating the live scene after
/// capture cannot retroactively alter a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "activeTemplate")]
    pub active_template: Option<TemplateId>,
    pub elements: Scene,
    #[serde(rename = "backgroundConfig")]
    pub background: BackgroundConfig,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            active_template: None,
            elements: Scene::new(),
            background: BackgroundConfig::default(),
        }
    }
}

/// The editing session: one active document plus its transient selection.
///
/// All mutation is synchronous; commands dispatched here are applied
/// immediately against the single mutable store.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Currently active template screen, if any.
    pub active_template: Option<TemplateId>,
    /// The scene being edited.
    pub scene: Scene,
    /// Canvas background configuration.
    pub background: BackgroundConfig,
    /// Transient selection state (not persisted).
    pub selection: Selection,
}

impl Session {
    /// Create an empty session with the default background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from a previously captured snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut session = Self::new();
        session.restore(snapshot);
        session
    }

    /// Add an element of `kind` and make it the sole selection.
    pub fn add_element(&mut self, kind: ElementKind) -> ElementId {
        let id = self.scene.add_element(kind);
        self.selection.select_only(id);
        id
    }

    /// Merge an update into one element, fanning out to the whole
    /// selection when the target is part of a multi-selection.
    pub fn update_element(&mut self, id: ElementId, update: &ElementUpdate) {
        if self.selection.is_selected(id) && self.selection.len() > 1 {
            self.scene.update_many(self.selection.ids(), update);
        } else {
            self.scene.update_element(id, update);
        }
    }

    /// Delete the listed elements and prune the selection in one step.
    pub fn delete_elements(&mut self, ids: &[ElementId]) {
        self.scene.remove_many(ids);
        self.selection.prune(&self.scene);
    }

    /// Delete everything currently selected.
    pub fn delete_selected(&mut self) {
        let ids = self.selection.ids().to_vec();
        self.delete_elements(&ids);
    }

    /// Apply one editing command synchronously.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Move { ids, dx, dy } => {
                self.scene.translate(&ids, dx, dy);
            }
            Command::Resize { id, scale } => {
                self.scene.update_element(id, &ElementUpdate::scale(scale));
            }
            Command::Select { ids, mode } => match mode {
                SelectMode::Replace => self.selection.replace(&self.scene, &ids),
                SelectMode::Toggle => {
                    for id in ids {
                        self.selection.toggle(&self.scene, id, true);
                    }
                }
            },
            Command::Group => {
                if let Some(key) = self.selection.group(&mut self.scene) {
                    log::debug!("grouped {} elements under {key}", self.selection.len());
                }
            }
            Command::Ungroup => {
                self.selection.ungroup(&mut self.scene);
            }
            Command::Delete { ids } => {
                self.delete_elements(&ids);
            }
        }
    }

    /// Capture a deep, independent copy of the editable state.
    pub fn capture(&self) -> Snapshot {
        Snapshot {
            active_template: self.active_template,
            elements: self.scene.clone(),
            background: self.background.clone(),
        }
    }

    /// Destructively replace the editable state with a snapshot.
    ///
    /// Unsaved live edits are discarded; the selection is pruned against
    /// the restored scene.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.active_template = snapshot.active_template;
        self.scene = snapshot.elements;
        self.background = snapshot.background;
        self.selection.prune(&self.scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementContent, StylePatch};

    #[test]
    fn test_add_element_selects_it() {
        let mut session = Session::new();
        let id = session.add_element(ElementKind::Bubble);

        assert_eq!(session.selection.ids(), &[id]);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut session = Session::new();
        session.add_element(ElementKind::Phone);
        session.add_element(ElementKind::Stat);
        session.active_template = Some(TemplateId::Hero);

        let snapshot = session.capture();
        let mut restored = Session::from_snapshot(snapshot.clone());

        assert_eq!(restored.scene, session.scene);
        assert_eq!(restored.active_template, Some(TemplateId::Hero));

        // Mutating the restored scene must not alter the snapshot.
        let id = restored.scene.ids()[0];
        restored.dispatch(Command::Move {
            ids: vec![id],
            dx: 99.0,
            dy: 99.0,
        });
        assert_eq!(snapshot.elements, session.scene);
    }

    #[test]
    fn test_delete_prunes_selection() {
        let mut session = Session::new();
        let a = session.add_element(ElementKind::Text);
        let b = session.add_element(ElementKind::Text);
        session.dispatch(Command::Select {
            ids: vec![a],
            mode: SelectMode::Toggle,
        });
        assert_eq!(session.selection.len(), 2);

        session.dispatch(Command::Delete { ids: vec![a] });

        assert!(!session.scene.contains(a));
        assert_eq!(session.selection.ids(), &[b]);
    }

    #[test]
    fn test_delete_selected_clears_group() {
        let mut session = Session::new();
        let a = session.add_element(ElementKind::Text);
        let b = session.add_element(ElementKind::Icon);
        let c = session.add_element(ElementKind::Stat);
        session.dispatch(Command::Select {
            ids: vec![a, b],
            mode: SelectMode::Replace,
        });

        session.delete_selected();

        assert_eq!(session.scene.ids(), vec![c]);
        assert!(session.selection.is_empty());
    }

    #[test]
    fn test_dispatch_move_only_targets() {
        let mut session = Session::new();
        let a = session.add_element(ElementKind::Text);
        let b = session.add_element(ElementKind::Text);

        let before_b = session.scene.get(b).unwrap().transform;
        session.dispatch(Command::Move {
            ids: vec![a],
            dx: 10.0,
            dy: -5.0,
        });

        assert_eq!(session.scene.get(b).unwrap().transform, before_b);
    }

    #[test]
    fn test_dispatch_resize_clamps() {
        let mut session = Session::new();
        let id = session.add_element(ElementKind::Icon);

        session.dispatch(Command::Resize { id, scale: 42.0 });
        assert!((session.scene.get(id).unwrap().transform.scale - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_select_empty_replace_deselects_all() {
        let mut session = Session::new();
        session.add_element(ElementKind::Text);
        assert!(!session.selection.is_empty());

        session.dispatch(Command::Select {
            ids: vec![],
            mode: SelectMode::Replace,
        });
        assert!(session.selection.is_empty());
    }

    #[test]
    fn test_update_element_fans_out_to_selection() {
        let mut session = Session::new();
        let a = session.add_element(ElementKind::Bubble);
        let b = session.add_element(ElementKind::Stat);
        session.dispatch(Command::Select {
            ids: vec![a],
            mode: SelectMode::Toggle,
        });

        let update = ElementUpdate {
            style: StylePatch {
                text_color: Some("#000000".to_string()),
                ..StylePatch::default()
            },
            ..ElementUpdate::default()
        };
        session.update_element(a, &update);

        assert_eq!(session.scene.get(a).unwrap().style.text_color, "#000000");
        assert_eq!(session.scene.get(b).unwrap().style.text_color, "#000000");
    }

    #[test]
    fn test_group_and_ungroup_via_commands() {
        let mut session = Session::new();
        let a = session.add_element(ElementKind::Text);
        let b = session.add_element(ElementKind::Icon);
        session.dispatch(Command::Select {
            ids: vec![a, b],
            mode: SelectMode::Replace,
        });

        session.dispatch(Command::Group);
        let key = session.scene.get(a).unwrap().parent_id.clone();
        assert!(key.is_some());
        assert_eq!(session.scene.get(b).unwrap().parent_id, key);

        session.dispatch(Command::Ungroup);
        assert!(session.scene.get(a).unwrap().parent_id.is_none());
        assert!(session.scene.get(b).unwrap().parent_id.is_none());
    }

    #[test]
    fn test_restore_discards_live_edits() {
        let mut session = Session::new();
        session.add_element(ElementKind::Chart);
        let snapshot = session.capture();

        session.add_element(ElementKind::Sticker);
        assert_eq!(session.scene.len(), 2);

        session.restore(snapshot);
        assert_eq!(session.scene.len(), 1);
        assert!(matches!(
            session.scene.iter().next().unwrap().content,
            ElementContent::Chart
        ));
    }
}
