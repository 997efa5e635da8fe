//! Template and device-frame collaborator keys.
//!
//! The core treats template screens and device chrome as opaque renderers
//! keyed by strings; this module only resolves those keys, with a stable
//! fallback for anything unrecognized.

use serde::{Deserialize, Serialize};

/// The decorative template screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateId {
    Hero,
    Global,
    Savings,
    Analytics,
    Cta,
    Blank,
}

/// Device models rendered by the modern frame collaborator.
pub const MODERN_MODELS: &[&str] = &[
    "iPhone 16 Pro",
    "iPhone 15 Pro",
    "Galaxy S24 Ultra",
    "Pixel 9 Pro",
];

/// Device keys understood by the legacy frameset collaborator.
pub const LEGACY_FRAMESET_KEYS: &[&str] = &[
    "iPhone X",
    "iPhone 8",
    "iPhone 8 Plus",
    "iPhone 5s",
    "iPhone 5c",
    "iPhone 4s",
    "Galaxy Note 8",
    "Nexus 5",
    "Lumia 920",
    "Samsung Galaxy S5",
    "HTC One",
    "iPad Mini",
    "MacBook Pro",
];

/// Fallback key when a model string is unrecognized.
pub const DEFAULT_FRAMESET_KEY: &str = "iPhone X";

/// Whether a model is rendered by the modern frame collaborator.
pub fn is_modern_model(model: &str) -> bool {
    MODERN_MODELS.contains(&model)
}

/// Resolve a stored model string to a legacy frameset key.
///
/// Known keys pass through; a couple of shorthand spellings are mapped;
/// everything else falls back to the default.
pub fn resolve_frameset_key(model: &str) -> &'static str {
    if let Some(key) = LEGACY_FRAMESET_KEYS.iter().find(|k| **k == model) {
        return key;
    }
    match model {
        "Note 8" => "Galaxy Note 8",
        _ => DEFAULT_FRAMESET_KEY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modern_model_lookup() {
        assert!(is_modern_model("iPhone 16 Pro"));
        assert!(!is_modern_model("iPhone X"));
        assert!(!is_modern_model("Toaster 3000"));
    }

    #[test]
    fn test_frameset_resolution() {
        assert_eq!(resolve_frameset_key("Nexus 5"), "Nexus 5");
        assert_eq!(resolve_frameset_key("Note 8"), "Galaxy Note 8");
        // Unrecognized keys fall back.
        assert_eq!(resolve_frameset_key("Toaster 3000"), DEFAULT_FRAMESET_KEY);
    }
}
