//! Editing commands: the seam between gestures and the scene store.
//!
//! The pointer controller only ever produces [`Command`] values; the
//! session dispatches them synchronously. Gesture code never touches
//! store internals directly.

use crate::element::ElementId;
use serde::{Deserialize, Serialize};

/// How a select command combines with the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectMode {
    /// Replace the selection with the target set.
    Replace,
    /// Shift-click semantics: all-or-nothing group toggle.
    Toggle,
}

/// A synchronous editing command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Translate every listed element by the same delta.
    Move {
        ids: Vec<ElementId>,
        dx: f64,
        dy: f64,
    },
    /// Set one element's uniform scale (clamped by the store).
    Resize { id: ElementId, scale: f64 },
    /// Update the selection from clicked ids; an empty list with
    /// `Replace` deselects everything.
    Select {
        ids: Vec<ElementId>,
        mode: SelectMode,
    },
    /// Group the current selection under one fresh key.
    Group,
    /// Dissolve every group the current selection touches.
    Ungroup,
    /// Delete the listed elements and prune the selection.
    Delete { ids: Vec<ElementId> },
}
