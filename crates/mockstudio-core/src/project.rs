//! Versioned project library.
//!
//! Projects collect immutable versions the way a linear commit log does:
//! the newest version sits at index 0 and is the head. Versions carry a
//! full [`Snapshot`], never a diff, so loading any of them is a plain
//! clone.

use crate::session::Snapshot;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

/// Unique id for a project.
pub type ProjectId = Uuid;

/// Unique id for a version within a project.
pub type VersionId = Uuid;

/// Version name used for the automatic first commit of a project.
pub const INITIAL_COMMIT_NAME: &str = "Initial Commit";

fn timestamp_now() -> String {
    // Rfc3339 formatting of a UTC timestamp does not fail in practice.
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

/// One immutable saved version of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectVersion {
    pub id: VersionId,
    /// The commit message the user typed.
    pub name: String,
    /// RFC 3339 creation time.
    pub timestamp: String,
    /// Full state at commit time.
    pub data: Snapshot,
}

impl ProjectVersion {
    fn new(name: impl Into<String>, data: Snapshot) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            timestamp: timestamp_now(),
            data,
        }
    }
}

/// A named project with its version history, head first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProject {
    pub id: ProjectId,
    pub name: String,
    /// RFC 3339 creation time of the project itself.
    pub created_at: String,
    /// Version log, newest first. Every project starts with an initial
    /// commit, but a hand-edited or damaged blob can present an empty
    /// log, so readers must not assume one exists.
    pub versions: Vec<ProjectVersion>,
}

impl SavedProject {
    /// The newest version, or `None` for an empty version log.
    pub fn head(&self) -> Option<&ProjectVersion> {
        self.versions.first()
    }

    /// Find a version by id.
    pub fn find_version(&self, version_id: VersionId) -> Option<&ProjectVersion> {
        self.versions.iter().find(|v| v.id == version_id)
    }
}

/// All saved projects plus the active-project marker.
///
/// Persisted as one blob; the library is the single owner of project
/// state, so every mutation below is a complete, synchronous step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectLibrary {
    /// Saved projects, newest first.
    pub projects: Vec<SavedProject>,
    /// The project subsequent commits land in.
    pub active_project: Option<ProjectId>,
}

impl ProjectLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved projects.
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    /// Find a project by id.
    pub fn find_project(&self, id: ProjectId) -> Option<&SavedProject> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// The currently active project, if any.
    pub fn active(&self) -> Option<&SavedProject> {
        self.active_project.and_then(|id| self.find_project(id))
    }

    /// Create a project seeded with an initial commit of `snapshot`.
    ///
    /// The project lands at the front of the list and becomes active.
    /// A blank name aborts and returns `None`.
    pub fn create_project(&mut self, name: &str, snapshot: Snapshot) -> Option<ProjectId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let project = SavedProject {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: timestamp_now(),
            versions: vec![ProjectVersion::new(INITIAL_COMMIT_NAME, snapshot)],
        };
        let id = project.id;
        self.projects.insert(0, project);
        self.active_project = Some(id);
        log::info!("created project {name:?} ({id})");
        Some(id)
    }

    /// Commit `snapshot` to the active project as its new head.
    ///
    /// `message` is what the user entered at the prompt: `None` means the
    /// prompt was cancelled, and a blank message is treated the same way.
    /// Either aborts the commit and leaves the log untouched. Returns the
    /// new head's version id.
    pub fn commit(&mut self, message: Option<&str>, snapshot: Snapshot) -> Option<VersionId> {
        let message = message.map(str::trim).filter(|m| !m.is_empty())?;
        let active = self.active_project?;
        let project = self.projects.iter_mut().find(|p| p.id == active)?;

        let version = ProjectVersion::new(message, snapshot);
        let version_id = version.id;
        project.versions.insert(0, version);
        log::info!("committed {message:?} to project {active}");
        Some(version_id)
    }

    /// Load a stored version, making its project active.
    ///
    /// Returns an owned copy of the version's snapshot; the stored
    /// version itself stays immutable.
    pub fn load_version(&mut self, project_id: ProjectId, version_id: VersionId) -> Option<Snapshot> {
        let snapshot = self
            .find_project(project_id)?
            .find_version(version_id)?
            .data
            .clone();
        self.active_project = Some(project_id);
        Some(snapshot)
    }

    /// Load the head version of a project, making it active.
    pub fn load_head(&mut self, project_id: ProjectId) -> Option<Snapshot> {
        let head_id = self.find_project(project_id)?.head()?.id;
        self.load_version(project_id, head_id)
    }

    /// Delete a project and its whole version log.
    ///
    /// If it was the active project the marker is cleared.
    pub fn delete_project(&mut self, id: ProjectId) {
        self.projects.retain(|p| p.id != id);
        if self.active_project == Some(id) {
            self.active_project = None;
        }
    }
}
