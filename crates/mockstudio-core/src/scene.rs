//! Scene element store: the ordered collection of canvas elements.

use crate::element::{Element, ElementId, ElementKind, ElementUpdate, GroupKey};
use serde::{Deserialize, Serialize};

/// Base position for the first element added to a scene.
const SPAWN_X: f64 = 500.0;
const SPAWN_Y: f64 = 350.0;
/// Diagonal cascade step between sequential insertions.
const SPAWN_CASCADE: f64 = 20.0;

/// The ordered set of elements being edited.
///
/// Order is significant: index 0 is back-most and the sequence is the
/// render z-order. All operations are total; a missing id is a no-op, so
/// rapid pointer-driven calls stay resilient to deletes racing in-flight
/// updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scene {
    elements: Vec<Element>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new element of `kind` with its per-kind defaults.
    ///
    /// Sequential insertions cascade diagonally by 20px per existing
    /// element so they never stack exactly. The element is appended
    /// front-most; the new id is returned.
    pub fn add_element(&mut self, kind: ElementKind) -> ElementId {
        let offset = self.elements.len() as f64 * SPAWN_CASCADE;
        let element = Element::new(kind, SPAWN_X + offset, SPAWN_Y + offset);
        let id = element.id;
        self.elements.push(element);
        id
    }

    /// Merge a partial update into one element.
    pub fn update_element(&mut self, id: ElementId, update: &ElementUpdate) {
        if let Some(element) = self.get_mut(id) {
            element.apply_update(update);
        }
    }

    /// Merge the same partial update into every listed element.
    ///
    /// Used when a multi-selection is edited so style/content changes fan
    /// out uniformly.
    pub fn update_many(&mut self, ids: &[ElementId], update: &ElementUpdate) {
        for element in &mut self.elements {
            if ids.contains(&element.id) {
                element.apply_update(update);
            }
        }
    }

    /// Translate every listed element by the same delta.
    ///
    /// This is the batched drag primitive, applied once per pointer-move
    /// tick; relative offsets between the elements are preserved.
    pub fn translate(&mut self, ids: &[ElementId], dx: f64, dy: f64) {
        for element in &mut self.elements {
            if ids.contains(&element.id) {
                element.transform = element.transform.translated(dx, dy);
            }
        }
    }

    /// Move an element to the front (top of the z-order).
    pub fn move_to_front(&mut self, id: ElementId) {
        if let Some(index) = self.position(id) {
            let element = self.elements.remove(index);
            self.elements.push(element);
        }
    }

    /// Move an element to the back (bottom of the z-order).
    pub fn move_to_back(&mut self, id: ElementId) {
        if let Some(index) = self.position(id) {
            let element = self.elements.remove(index);
            self.elements.insert(0, element);
        }
    }

    /// Remove one element.
    pub fn remove_element(&mut self, id: ElementId) {
        self.elements.retain(|el| el.id != id);
    }

    /// Remove every listed element.
    pub fn remove_many(&mut self, ids: &[ElementId]) {
        self.elements.retain(|el| !ids.contains(&el.id));
    }

    /// Get an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    /// Get a mutable element by id.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    /// Whether an element with this id exists.
    pub fn contains(&self, id: ElementId) -> bool {
        self.position(id).is_some()
    }

    /// Ids of every element sharing a group key, in z-order.
    pub fn group_members(&self, key: &GroupKey) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|el| el.parent_id.as_ref() == Some(key))
            .map(|el| el.id)
            .collect()
    }

    /// Elements in z-order (back to front).
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Mutable iteration in z-order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.iter_mut()
    }

    /// Element ids in z-order.
    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|el| el.id).collect()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the scene has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn position(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|el| el.id == id)
    }
}
