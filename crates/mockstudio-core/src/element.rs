//! Element definitions for the mockup canvas.

use crate::transform::{Transform, clamp_scale};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Flat group partition key shared by grouped elements.
///
/// This is a tag, not an entity: clearing it on every member is all it
/// takes to dissolve a group. Nested groups are not representable.
pub type GroupKey = String;

/// Generate a fresh group key.
pub fn new_group_key() -> GroupKey {
    format!("group-{}", Uuid::new_v4())
}

/// Icon names offered by the icon picker (Material Symbols).
pub const COMMON_ICONS: &[&str] = &[
    "home", "person", "settings", "favorite", "notifications", "search", "mail", "send",
    "check_circle", "cancel", "info", "help", "arrow_back", "arrow_forward", "menu", "more_vert",
    "star", "cloud", "bolt", "local_fire_department", "rocket_launch", "auto_awesome", "palette",
    "image", "add", "remove", "close", "edit", "delete", "share", "download", "upload",
    "play_arrow", "pause", "stop", "volume_up", "mic", "videocam", "camera_alt", "explore",
    "shopping_cart", "credit_card", "payments", "account_balance", "trending_up", "analytics",
    "dashboard", "public", "wallet", "receipt_long", "savings", "account_balance_wallet",
    "monetization_on", "paid", "euro", "attach_money", "qr_code_2", "contactless", "shield",
    "lock", "key", "fingerprint", "face", "visibility", "light_mode", "dark_mode", "contrast",
    "water_drop", "eco", "pet_supplies", "restaurant", "directions_car",
];

/// The placeable element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Phone,
    Bubble,
    Stat,
    Text,
    Sticker,
    Icon,
    Graphics,
    MessageStack,
    AvatarGroup,
    GridMenu,
    Chart,
    ProgressCircle,
}

/// Font choices offered by the text controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontChoice {
    #[default]
    Inter,
    Serif,
    Mono,
    Grotesk,
    Syne,
    Outfit,
    Montserrat,
}

impl FontChoice {
    /// CSS font stack used by the view layer.
    pub fn css_stack(&self) -> &'static str {
        match self {
            FontChoice::Inter => "Inter, sans-serif",
            FontChoice::Serif => "\"Playfair Display\", serif",
            FontChoice::Mono => "\"Roboto Mono\", monospace",
            FontChoice::Grotesk => "\"Space Grotesk\", sans-serif",
            FontChoice::Syne => "\"Syne\", sans-serif",
            FontChoice::Outfit => "\"Outfit\", sans-serif",
            FontChoice::Montserrat => "\"Montserrat\", sans-serif",
        }
    }
}

/// Surface treatment for card-like elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Glass,
    Solid,
}

/// Style properties shared by every element kind.
///
/// Colors are CSS hex strings; the core never interprets them beyond
/// carrying them to the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    /// Accent color.
    pub color: String,
    /// Background color.
    pub bg_color: String,
    /// Background opacity in `[0, 1]`.
    pub bg_opacity: f64,
    /// Text color.
    pub text_color: String,
    /// Icon color.
    pub icon_color: String,
    /// Whether the leading icon is shown.
    pub show_icon: bool,
    /// Whether a drop shadow is applied.
    pub shadow: bool,
    /// Font choice for textual content.
    pub font: FontChoice,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            color: "#0bc9da".to_string(),
            bg_color: "#0bc9da".to_string(),
            bg_opacity: 1.0,
            text_color: "#ffffff".to_string(),
            icon_color: "#ffffff".to_string(),
            show_icon: true,
            shadow: false,
            font: FontChoice::default(),
        }
    }
}

impl ElementStyle {
    /// Default style table, per element kind.
    pub fn defaults_for(kind: ElementKind) -> Self {
        let mut style = Self::default();
        match kind {
            ElementKind::Bubble | ElementKind::MessageStack => {
                style.bg_opacity = 0.2;
            }
            ElementKind::Stat | ElementKind::GridMenu | ElementKind::Chart => {
                style.bg_color = "#161920".to_string();
                style.bg_opacity = 0.8;
            }
            _ => {}
        }
        style
    }
}

/// Per-kind content payload.
///
/// One variant per element kind, each carrying only its relevant fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ElementContent {
    Phone {
        /// Device frame model key (resolved by the template collaborator).
        model: String,
        /// Uploaded screen image as a data URL, if any.
        image: Option<String>,
    },
    Bubble {
        text: String,
        label: String,
        icon: String,
        variant: Variant,
    },
    Stat {
        text: String,
        label: String,
    },
    Text {
        text: String,
        label: String,
        variant: Variant,
    },
    Sticker {
        text: String,
    },
    Icon {
        icon: String,
    },
    Graphics {
        text: String,
    },
    MessageStack {
        text: String,
        variant: Variant,
    },
    AvatarGroup,
    GridMenu,
    Chart,
    ProgressCircle {
        text: String,
        label: String,
    },
}

impl ElementContent {
    /// Default content table, per element kind.
    pub fn defaults_for(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Phone => ElementContent::Phone {
                model: "iPhone 16 Pro".to_string(),
                image: None,
            },
            ElementKind::Bubble => ElementContent::Bubble {
                text: "New Alert".to_string(),
                label: "Touch to modify".to_string(),
                icon: "notifications".to_string(),
                variant: Variant::Glass,
            },
            ElementKind::Stat => ElementContent::Stat {
                text: "$500".to_string(),
                label: "Revenue".to_string(),
            },
            ElementKind::Text => ElementContent::Text {
                text: "Headline".to_string(),
                label: "Design Studio".to_string(),
                variant: Variant::Solid,
            },
            ElementKind::Sticker => ElementContent::Sticker {
                text: "NEW".to_string(),
            },
            ElementKind::Icon => ElementContent::Icon {
                icon: "star".to_string(),
            },
            ElementKind::Graphics => ElementContent::Graphics {
                text: String::new(),
            },
            ElementKind::MessageStack => ElementContent::MessageStack {
                text: "You have new messages".to_string(),
                variant: Variant::Glass,
            },
            ElementKind::AvatarGroup => ElementContent::AvatarGroup,
            ElementKind::GridMenu => ElementContent::GridMenu,
            ElementKind::Chart => ElementContent::Chart,
            ElementKind::ProgressCircle => ElementContent::ProgressCircle {
                text: "85%".to_string(),
                label: "Savings Goal".to_string(),
            },
        }
    }

    /// The kind tag of this content.
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementContent::Phone { .. } => ElementKind::Phone,
            ElementContent::Bubble { .. } => ElementKind::Bubble,
            ElementContent::Stat { .. } => ElementKind::Stat,
            ElementContent::Text { .. } => ElementKind::Text,
            ElementContent::Sticker { .. } => ElementKind::Sticker,
            ElementContent::Icon { .. } => ElementKind::Icon,
            ElementContent::Graphics { .. } => ElementKind::Graphics,
            ElementContent::MessageStack { .. } => ElementKind::MessageStack,
            ElementContent::AvatarGroup => ElementKind::AvatarGroup,
            ElementContent::GridMenu => ElementKind::GridMenu,
            ElementContent::Chart => ElementKind::Chart,
            ElementContent::ProgressCircle { .. } => ElementKind::ProgressCircle,
        }
    }
}

/// One placeable, styleable element on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique, immutable identifier.
    pub id: ElementId,
    /// Position, uniform scale and rotation.
    pub transform: Transform,
    /// Group membership tag. Non-owning; `None` means ungrouped.
    #[serde(default)]
    pub parent_id: Option<GroupKey>,
    /// Shared style properties.
    pub style: ElementStyle,
    /// Kind-specific content payload.
    pub content: ElementContent,
}

impl Element {
    /// Create an element of the given kind with its default style and
    /// content, positioned at `(x, y)`.
    pub fn new(kind: ElementKind, x: f64, y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            transform: Transform::at(x, y),
            parent_id: None,
            style: ElementStyle::defaults_for(kind),
            content: ElementContent::defaults_for(kind),
        }
    }

    /// The kind tag of this element.
    pub fn kind(&self) -> ElementKind {
        self.content.kind()
    }

    /// Merge a partial update into this element.
    ///
    /// Transform fields overwrite individually (scale clamped); style and
    /// content fields overwrite key-wise. Content fields the kind does not
    /// carry are ignored.
    pub fn apply_update(&mut self, update: &ElementUpdate) {
        if let Some(x) = update.x {
            self.transform.x = x;
        }
        if let Some(y) = update.y {
            self.transform.y = y;
        }
        if let Some(scale) = update.scale {
            self.transform.scale = clamp_scale(scale);
        }
        if let Some(rotation) = update.rotation {
            self.transform.rotation = rotation;
        }
        update.style.apply(&mut self.style);
        update.content.apply(&mut self.content);
    }
}

/// Partial style overwrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StylePatch {
    pub color: Option<String>,
    pub bg_color: Option<String>,
    pub bg_opacity: Option<f64>,
    pub text_color: Option<String>,
    pub icon_color: Option<String>,
    pub show_icon: Option<bool>,
    pub shadow: Option<bool>,
    pub font: Option<FontChoice>,
}

impl StylePatch {
    fn apply(&self, style: &mut ElementStyle) {
        if let Some(ref color) = self.color {
            style.color = color.clone();
        }
        if let Some(ref bg_color) = self.bg_color {
            style.bg_color = bg_color.clone();
        }
        if let Some(bg_opacity) = self.bg_opacity {
            style.bg_opacity = bg_opacity;
        }
        if let Some(ref text_color) = self.text_color {
            style.text_color = text_color.clone();
        }
        if let Some(ref icon_color) = self.icon_color {
            style.icon_color = icon_color.clone();
        }
        if let Some(show_icon) = self.show_icon {
            style.show_icon = show_icon;
        }
        if let Some(shadow) = self.shadow {
            style.shadow = shadow;
        }
        if let Some(font) = self.font {
            style.font = font;
        }
    }
}

/// Partial content overwrite.
///
/// Fields apply only where the target variant carries them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentPatch {
    pub text: Option<String>,
    pub label: Option<String>,
    pub icon: Option<String>,
    pub model: Option<String>,
    /// Screen image data URL; an empty string clears the image.
    pub image: Option<String>,
    pub variant: Option<Variant>,
}

impl ContentPatch {
    fn apply(&self, content: &mut ElementContent) {
        match content {
            ElementContent::Phone { model, image } => {
                if let Some(ref m) = self.model {
                    *model = m.clone();
                }
                if let Some(ref img) = self.image {
                    // An empty string clears the uploaded screen image.
                    *image = if img.is_empty() {
                        None
                    } else {
                        Some(img.clone())
                    };
                }
            }
            ElementContent::Bubble {
                text,
                label,
                icon,
                variant,
            } => {
                if let Some(ref t) = self.text {
                    *text = t.clone();
                }
                if let Some(ref l) = self.label {
                    *label = l.clone();
                }
                if let Some(ref i) = self.icon {
                    *icon = i.clone();
                }
                if let Some(v) = self.variant {
                    *variant = v;
                }
            }
            ElementContent::Stat { text, label }
            | ElementContent::ProgressCircle { text, label } => {
                if let Some(ref t) = self.text {
                    *text = t.clone();
                }
                if let Some(ref l) = self.label {
                    *label = l.clone();
                }
            }
            ElementContent::Text {
                text,
                label,
                variant,
            } => {
                if let Some(ref t) = self.text {
                    *text = t.clone();
                }
                if let Some(ref l) = self.label {
                    *label = l.clone();
                }
                if let Some(v) = self.variant {
                    *variant = v;
                }
            }
            ElementContent::Sticker { text } | ElementContent::Graphics { text } => {
                if let Some(ref t) = self.text {
                    *text = t.clone();
                }
            }
            ElementContent::Icon { icon } => {
                if let Some(ref i) = self.icon {
                    *icon = i.clone();
                }
            }
            ElementContent::MessageStack { text, variant } => {
                if let Some(ref t) = self.text {
                    *text = t.clone();
                }
                if let Some(v) = self.variant {
                    *variant = v;
                }
            }
            ElementContent::AvatarGroup | ElementContent::GridMenu | ElementContent::Chart => {}
        }
    }
}

/// Partial element overwrite: transform fields plus style/content patches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub scale: Option<f64>,
    pub rotation: Option<f64>,
    #[serde(default)]
    pub style: StylePatch,
    #[serde(default)]
    pub content: ContentPatch,
}

impl ElementUpdate {
    /// An update that only replaces the scale.
    pub fn scale(scale: f64) -> Self {
        Self {
            scale: Some(scale),
            ..Self::default()
        }
    }
}
