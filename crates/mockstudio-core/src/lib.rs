//! MockStudio Core Library
//!
//! Platform-agnostic scene model, editing commands and persistence for
//! the MockStudio mockup editor.

pub mod command;
pub mod element;
pub mod export;
pub mod pointer;
pub mod project;
pub mod scene;
pub mod selection;
pub mod session;
pub mod storage;
pub mod template;
pub mod transform;

pub use command::{Command, SelectMode};
pub use element::{Element, ElementContent, ElementId, ElementKind, ElementStyle, ElementUpdate};
pub use export::{export_image, export_project, import_project, CaptureTarget, ExportPayload};
pub use pointer::{HitTarget, PointerController};
pub use project::{ProjectId, ProjectLibrary, ProjectVersion, SavedProject, VersionId};
pub use scene::Scene;
pub use selection::Selection;
pub use session::{BackgroundConfig, BackgroundKind, Session, Snapshot};
pub use template::TemplateId;
pub use transform::{clamp_scale, Transform, MAX_SCALE, MIN_SCALE};
