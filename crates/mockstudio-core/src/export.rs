//! Project file export/import and image capture.
//!
//! The project file is a plain JSON document carrying a full snapshot
//! plus a format version tag. Import is strict enough to reject blobs
//! that are not project files, and never touches live state: the caller
//! only applies the returned snapshot on success.

use crate::session::{BackgroundConfig, Session, Snapshot};
use crate::storage::BoxFuture;
use crate::template::TemplateId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;

/// Format version written into exported project files.
pub const PROJECT_FILE_VERSION: &str = "2.0";

/// How long a capture target lets the canvas settle before rasterizing,
/// in milliseconds. Selection chrome is hidden first and needs a frame
/// or two to disappear.
pub const EXPORT_SETTLE_MS: u64 = 500;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Capture failed: {0}")]
    Capture(String),
}

/// Import errors. Any of these leaves the caller's state untouched.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Not a project file: {0}")]
    Invalid(String),
}

/// On-disk shape of an exported project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    pub version: String,
    /// RFC 3339 export time.
    pub timestamp: String,
    #[serde(rename = "activeTemplate")]
    pub active_template: Option<TemplateId>,
    pub elements: Value,
    #[serde(rename = "backgroundConfig", default)]
    pub background: BackgroundConfig,
}

/// A rendered export: suggested filename plus payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPayload<T> {
    pub filename: String,
    pub data: T,
}

fn date_stamp() -> String {
    // Date's Display is the ISO calendar date, e.g. 2026-08-31.
    OffsetDateTime::now_utc().date().to_string()
}

fn timestamp_now() -> String {
    OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}

/// Serialize a snapshot to a pretty-printed project file.
pub fn export_project(snapshot: &Snapshot) -> Result<ExportPayload<String>, ExportError> {
    let file = ProjectFile {
        version: PROJECT_FILE_VERSION.to_string(),
        timestamp: timestamp_now(),
        active_template: snapshot.active_template,
        elements: serde_json::to_value(&snapshot.elements)?,
        background: snapshot.background.clone(),
    };
    Ok(ExportPayload {
        filename: format!("design-project-{}.json", date_stamp()),
        data: serde_json::to_string_pretty(&file)?,
    })
}

/// Parse a project file back into a snapshot.
///
/// Validation is structural: the blob must be a JSON object whose
/// `elements` field is an array. Unknown extra fields are ignored, so
/// files written by newer minor versions still load.
pub fn import_project(json: &str) -> Result<Snapshot, ImportError> {
    let value: Value = serde_json::from_str(json)?;

    let Some(object) = value.as_object() else {
        return Err(ImportError::Invalid("expected a JSON object".to_string()));
    };
    if !object.get("elements").is_some_and(Value::is_array) {
        return Err(ImportError::Invalid(
            "missing or non-array \"elements\" field".to_string(),
        ));
    }

    let file: ProjectFile = serde_json::from_value(value)?;
    let elements = serde_json::from_value(file.elements)?;
    log::info!("imported project file (format {})", file.version);

    Ok(Snapshot {
        active_template: file.active_template,
        elements,
        background: file.background,
    })
}

/// Something that can rasterize the canvas to a PNG.
///
/// Implemented by the view layer; the core only sequences the capture.
pub trait CaptureTarget {
    /// Wait for the canvas to settle after selection chrome is hidden.
    ///
    /// Awaited between the deselect and the capture, so the
    /// "deselect, settle, capture" order holds for every implementation.
    /// Real surfaces wait [`EXPORT_SETTLE_MS`] here; the default resolves
    /// immediately.
    fn settle(&self) -> BoxFuture<'_, ()> {
        Box::pin(async {})
    }

    /// Rasterize the current canvas contents as encoded PNG bytes.
    fn capture_png(&self) -> BoxFuture<'_, Result<Vec<u8>, ExportError>>;
}

/// Capture the canvas as a PNG, with selection chrome hidden.
///
/// Deselects everything, awaits the target's settle window, then
/// captures, so handles and outlines never end up in the image. The
/// selection is intentionally not restored afterwards.
pub async fn export_image<T: CaptureTarget>(
    session: &mut Session,
    target: &T,
) -> Result<ExportPayload<Vec<u8>>, ExportError> {
    session.selection.clear();
    target.settle().await;
    let png = target.capture_png().await?;
    Ok(ExportPayload {
        filename: format!("design-export-{}.png", date_stamp()),
        data: png,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, SelectMode};
    use crate::element::ElementKind;

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker { dummy_raw_waker() }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {}
            }
        }
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut session = Session::new();
        session.add_element(ElementKind::Phone);
        session.add_element(ElementKind::Bubble);
        session.active_template = Some(TemplateId::Analytics);
        let snapshot = session.capture();

        let payload = export_project(&snapshot).unwrap();
        assert!(payload.filename.starts_with("design-project-"));
        assert!(payload.filename.ends_with(".json"));

        let imported = import_project(&payload.data).unwrap();
        assert_eq!(imported, snapshot);
    }

    #[test]
    fn test_export_carries_version_tag() {
        let payload = export_project(&Snapshot::default()).unwrap();
        let value: Value = serde_json::from_str(&payload.data).unwrap();
        assert_eq!(value["version"], PROJECT_FILE_VERSION);
        assert!(value["elements"].is_array());
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(matches!(import_project("{{{"), Err(ImportError::Parse(_))));
        assert!(matches!(
            import_project("[1, 2, 3]"),
            Err(ImportError::Invalid(_))
        ));
    }

    #[test]
    fn test_import_requires_element_array() {
        let json = r#"{"version": "2.0", "elements": {"not": "an array"}}"#;
        assert!(matches!(import_project(json), Err(ImportError::Invalid(_))));

        let json = r#"{"version": "2.0"}"#;
        assert!(matches!(import_project(json), Err(ImportError::Invalid(_))));
    }

    #[test]
    fn test_failed_import_leaves_session_untouched() {
        let mut session = Session::new();
        session.add_element(ElementKind::Stat);
        let before = session.capture();

        let result = import_project("not a project file");
        assert!(result.is_err());
        // The session is only replaced on success; nothing changed here.
        assert_eq!(session.capture(), before);
    }

    #[test]
    fn test_import_tolerates_missing_background() {
        let json = r#"{"version": "2.0", "timestamp": "2026-08-31T00:00:00Z", "elements": []}"#;
        let snapshot = import_project(json).unwrap();
        assert_eq!(snapshot.background, BackgroundConfig::default());
        assert!(snapshot.elements.is_empty());
    }

    struct StubCapture;

    impl CaptureTarget for StubCapture {
        fn capture_png(&self) -> BoxFuture<'_, Result<Vec<u8>, ExportError>> {
            Box::pin(async { Ok(vec![0x89, b'P', b'N', b'G']) })
        }
    }

    struct FailingCapture;

    impl CaptureTarget for FailingCapture {
        fn capture_png(&self) -> BoxFuture<'_, Result<Vec<u8>, ExportError>> {
            Box::pin(async { Err(ExportError::Capture("no surface".to_string())) })
        }
    }

    #[test]
    fn test_image_export_clears_selection() {
        let mut session = Session::new();
        let id = session.add_element(ElementKind::Text);
        session.dispatch(Command::Select {
            ids: vec![id],
            mode: SelectMode::Replace,
        });
        assert!(!session.selection.is_empty());

        let payload = block_on(export_image(&mut session, &StubCapture)).unwrap();
        assert!(session.selection.is_empty());
        assert!(payload.filename.ends_with(".png"));
        assert_eq!(&payload.data[1..4], b"PNG");
    }

    struct OrderedCapture {
        calls: std::cell::RefCell<Vec<&'static str>>,
    }

    impl CaptureTarget for OrderedCapture {
        fn settle(&self) -> BoxFuture<'_, ()> {
            self.calls.borrow_mut().push("settle");
            Box::pin(async {})
        }

        fn capture_png(&self) -> BoxFuture<'_, Result<Vec<u8>, ExportError>> {
            self.calls.borrow_mut().push("capture");
            Box::pin(async { Ok(Vec::new()) })
        }
    }

    #[test]
    fn test_image_export_settles_before_capturing() {
        let mut session = Session::new();
        let target = OrderedCapture {
            calls: std::cell::RefCell::new(Vec::new()),
        };

        block_on(export_image(&mut session, &target)).unwrap();
        assert_eq!(*target.calls.borrow(), ["settle", "capture"]);
    }

    #[test]
    fn test_image_export_surfaces_capture_failure() {
        let mut session = Session::new();
        let result = block_on(export_image(&mut session, &FailingCapture));
        assert!(matches!(result, Err(ExportError::Capture(_))));
    }
}
