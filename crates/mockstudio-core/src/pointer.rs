//! Pointer interaction controller.
//!
//! Translates raw pointer gestures into [`Command`]s. Two gesture state
//! machines exist per session, mutually exclusive: drag-move and resize.
//! The controller never mutates the scene; it only reads it to anchor
//! resize deltas.

use crate::command::{Command, SelectMode};
use crate::element::ElementId;
use crate::scene::Scene;
use crate::selection::Selection;
use crate::transform::{RESIZE_SENSITIVITY, clamp_scale};
use kurbo::Point;

/// What the pointer landed on, as resolved by the view layer.
///
/// Each target maps to exactly one behavior; the view stops event
/// propagation so a single pointer-down reaches a single target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Empty canvas: deselect everything.
    Canvas,
    /// An element body: select and begin drag tracking.
    Element(ElementId),
    /// The dedicated resize handle of a selected element.
    ResizeHandle(ElementId),
    /// The delete button of a selected element.
    DeleteButton(ElementId),
}

/// Active gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Gesture {
    #[default]
    Idle,
    /// Dragging the selection; `anchor` is the last pointer position, so
    /// every move emits a delta since the previous move, not since drag
    /// start.
    Dragging { anchor: Point },
    /// Resizing one element; `last_x` advances every move so the scale
    /// mapping is incremental, not absolute.
    Resizing { id: ElementId, last_x: f64 },
}

/// Gesture state machine turning pointer events into commands.
#[derive(Debug, Clone, Default)]
pub struct PointerController {
    gesture: Gesture,
}

impl PointerController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag-move gesture is active.
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    /// Whether a resize gesture is active.
    pub fn is_resizing(&self) -> bool {
        matches!(self.gesture, Gesture::Resizing { .. })
    }

    /// Handle pointer-down on a hit target.
    ///
    /// Returns the commands to dispatch. At most one gesture starts per
    /// pointer-down; a resize-handle press suppresses drag and selection
    /// for the same press.
    pub fn pointer_down(&mut self, target: HitTarget, position: Point, shift: bool) -> Vec<Command> {
        // A stray down while a gesture is active terminates it first.
        self.gesture = Gesture::Idle;

        match target {
            HitTarget::Canvas => vec![Command::Select {
                ids: Vec::new(),
                mode: SelectMode::Replace,
            }],
            HitTarget::Element(id) => {
                self.gesture = Gesture::Dragging { anchor: position };
                let mode = if shift {
                    SelectMode::Toggle
                } else {
                    SelectMode::Replace
                };
                vec![Command::Select {
                    ids: vec![id],
                    mode,
                }]
            }
            HitTarget::ResizeHandle(id) => {
                self.gesture = Gesture::Resizing {
                    id,
                    last_x: position.x,
                };
                Vec::new()
            }
            HitTarget::DeleteButton(id) => vec![Command::Delete { ids: vec![id] }],
        }
    }

    /// Handle pointer-move.
    ///
    /// While dragging, emits a move of the whole selection by the delta
    /// since the last move tick. While resizing, emits a clamped scale
    /// derived from the horizontal delta since the last tick.
    pub fn pointer_move(
        &mut self,
        position: Point,
        scene: &Scene,
        selection: &Selection,
    ) -> Option<Command> {
        match self.gesture {
            Gesture::Idle => None,
            Gesture::Dragging { anchor } => {
                let dx = position.x - anchor.x;
                let dy = position.y - anchor.y;
                self.gesture = Gesture::Dragging { anchor: position };
                if selection.is_empty() || (dx == 0.0 && dy == 0.0) {
                    return None;
                }
                Some(Command::Move {
                    ids: selection.ids().to_vec(),
                    dx,
                    dy,
                })
            }
            Gesture::Resizing { id, last_x } => {
                let delta = position.x - last_x;
                self.gesture = Gesture::Resizing {
                    id,
                    last_x: position.x,
                };
                let current = match scene.get(id) {
                    Some(element) => element.transform.scale,
                    // Element deleted mid-gesture: end the gesture.
                    None => {
                        self.gesture = Gesture::Idle;
                        return None;
                    }
                };
                Some(Command::Resize {
                    id,
                    scale: clamp_scale(current + delta * RESIZE_SENSITIVITY),
                })
            }
        }
    }

    /// Handle pointer-up: the only gesture termination signal.
    ///
    /// All tracking state is released; deltas stop exactly at the last
    /// pointer position, with no momentum.
    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }
}
