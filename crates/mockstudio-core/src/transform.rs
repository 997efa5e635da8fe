//! Element transform primitive: position, uniform scale and rotation.

use serde::{Deserialize, Serialize};

/// Minimum uniform scale for any element.
pub const MIN_SCALE: f64 = 0.2;
/// Maximum uniform scale for any element.
pub const MAX_SCALE: f64 = 3.0;

/// How many scale units one horizontal pixel of resize drag is worth.
pub const RESIZE_SENSITIVITY: f64 = 0.005;

/// Clamp a scale value into the allowed `[MIN_SCALE, MAX_SCALE]` range.
pub fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Position, uniform scale and rotation of a canvas element.
///
/// Rotation is in degrees, conventionally kept in `[-180, 180]` but not
/// enforced. Scale is clamped on every mutation path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotation: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl Transform {
    /// Create a transform at a position with identity scale and rotation.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            scale: 1.0,
            rotation: 0.0,
        }
    }

    /// Return this transform moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Return this transform with the scale replaced (clamped).
    pub fn with_scale(&self, scale: f64) -> Self {
        Self {
            scale: clamp_scale(scale),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_scale_bounds() {
        assert!((clamp_scale(0.0) - MIN_SCALE).abs() < f64::EPSILON);
        assert!((clamp_scale(10.0) - MAX_SCALE).abs() < f64::EPSILON);
        assert!((clamp_scale(1.5) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_translated_is_pure() {
        let t = Transform::at(100.0, 50.0);
        let moved = t.translated(10.0, -5.0);

        assert!((moved.x - 110.0).abs() < f64::EPSILON);
        assert!((moved.y - 45.0).abs() < f64::EPSILON);
        // Original untouched.
        assert!((t.x - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_with_scale_clamps() {
        let t = Transform::at(0.0, 0.0).with_scale(99.0);
        assert!((t.scale - MAX_SCALE).abs() < f64::EPSILON);

        let t = t.with_scale(-1.0);
        assert!((t.scale - MIN_SCALE).abs() < f64::EPSILON);
    }
}
