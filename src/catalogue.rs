//! The project store.
//!
//! A [`Catalogue`] owns the ordered list of [`Project`] records. It is loaded
//! once from the static JSON resource and afterwards only mutated through the
//! admin dashboard, which replaces or removes whole records. Every other
//! component reads it through `&[Project]` snapshots.
//!
//! ## Loading
//!
//! Loading is permissive: a missing file, an unreadable file, or JSON that
//! does not parse as an array of projects all produce an empty catalogue and
//! a warning. The portfolio renders with no projects rather than failing.
//! [`parse_catalogue`] is the strict variant used by `folio check`.
//!
//! ## Cache busting
//!
//! The catalogue is referenced as `projects.json?v=<hash>` where the hash is
//! taken over the file content, so a browser never serves a stale catalogue
//! after an edit and never refetches an unchanged one.

use crate::types::Project;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// File name of the exported catalogue.
pub const EXPORT_FILENAME: &str = "projects.json";

/// Hex digits of the content hash kept in the cache-busting parameter.
const VERSION_HASH_LEN: usize = 12;

#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate project id: {0}")]
    DuplicateId(String),
    #[error("No project with id: {0}")]
    NotFound(String),
    #[error("Position {index} out of range for {len} projects")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogue {
    projects: Vec<Project>,
}

impl Catalogue {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    /// Append a new record. Rejects an id already in the store.
    pub fn insert(&mut self, project: Project) -> Result<(), CatalogueError> {
        if self.get(&project.id).is_some() {
            return Err(CatalogueError::DuplicateId(project.id));
        }
        debug!(id = %project.id, "project added");
        self.projects.push(project);
        Ok(())
    }

    /// Replace the record with the same id wholesale, keeping its position.
    pub fn replace(&mut self, project: Project) -> Result<(), CatalogueError> {
        let idx = self
            .position(&project.id)
            .ok_or_else(|| CatalogueError::NotFound(project.id.clone()))?;
        debug!(id = %project.id, "project replaced");
        self.projects[idx] = project;
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<Project, CatalogueError> {
        let idx = self
            .position(id)
            .ok_or_else(|| CatalogueError::NotFound(id.to_string()))?;
        debug!(id, "project removed");
        Ok(self.projects.remove(idx))
    }

    /// Move the record at `from` so it ends up at index `to`, shifting the
    /// records in between. This is the drag-and-drop reorder.
    pub fn move_project(&mut self, from: usize, to: usize) -> Result<(), CatalogueError> {
        let len = self.projects.len();
        for index in [from, to] {
            if index >= len {
                return Err(CatalogueError::OutOfRange { index, len });
            }
        }
        if from != to {
            let project = self.projects.remove(from);
            self.projects.insert(to, project);
            debug!(from, to, "project moved");
        }
        Ok(())
    }

    /// A fresh id: the current time in milliseconds, bumped past any id
    /// already taken.
    pub fn next_id(&self) -> String {
        let mut candidate = chrono::Utc::now().timestamp_millis();
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }

    /// Ids that appear more than once, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut dupes = Vec::new();
        for p in &self.projects {
            if !seen.insert(p.id.as_str()) && !dupes.contains(&p.id.as_str()) {
                dupes.push(p.id.as_str());
            }
        }
        dupes
    }

    /// The catalogue as formatted JSON, the same shape it was loaded from.
    pub fn to_json_pretty(&self) -> Result<String, CatalogueError> {
        Ok(serde_json::to_string_pretty(&self.projects)?)
    }

    /// Write `projects.json` into `dir` and return its path.
    pub fn export_to(&self, dir: &Path) -> Result<PathBuf, CatalogueError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(EXPORT_FILENAME);
        fs::write(&path, self.to_json_pretty()?)?;
        Ok(path)
    }

    /// Persist the catalogue back to the file it was loaded from.
    pub fn save(&self, path: &Path) -> Result<(), CatalogueError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

/// Strict parse of a catalogue document.
pub fn parse_catalogue(json: &str) -> Result<Catalogue, CatalogueError> {
    let projects: Vec<Project> = serde_json::from_str(json)?;
    Ok(Catalogue::new(projects))
}

/// Load the catalogue at `path`, degrading to an empty catalogue on any
/// read or parse failure.
pub fn load_catalogue(path: &Path) -> Catalogue {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "catalogue unavailable, starting empty");
            return Catalogue::default();
        }
    };
    match parse_catalogue(&content) {
        Ok(catalogue) => {
            debug!(path = %path.display(), count = catalogue.len(), "catalogue loaded");
            catalogue
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "catalogue unparsable, starting empty");
            Catalogue::default()
        }
    }
}

/// Findings of `folio check` for one catalogue file.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub projects: usize,
    /// Problems that break the store's invariants.
    pub errors: Vec<String>,
    /// Records that load but will render or sort oddly.
    pub warnings: Vec<String>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate the catalogue at `path` without degrading.
pub fn check_catalogue(path: &Path) -> CheckReport {
    let mut report = CheckReport::default();
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            report.errors.push(format!("cannot read {}: {e}", path.display()));
            return report;
        }
    };
    let catalogue = match parse_catalogue(&content) {
        Ok(c) => c,
        Err(e) => {
            report.errors.push(e.to_string());
            return report;
        }
    };
    report.projects = catalogue.len();

    for id in catalogue.duplicate_ids() {
        report.errors.push(format!("duplicate id '{id}'"));
    }
    for (i, p) in catalogue.projects().iter().enumerate() {
        if p.id.trim().is_empty() {
            report.errors.push(format!("project #{} has an empty id", i + 1));
        }
        if p.title.trim().is_empty() {
            report.errors.push(format!("project '{}' has an empty title", p.id));
        }
        if crate::filter::try_parse_date(&p.date).is_none() {
            report.warnings.push(format!(
                "project '{}' has date '{}', sorted as 1970-01-01",
                p.id, p.date
            ));
        }
    }
    report
}

/// Short content hash used as the cache-busting version.
pub fn content_version(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    hex[..VERSION_HASH_LEN].to_string()
}

/// URL of the catalogue resource with a cache-busting query parameter.
///
/// ```text
/// catalogue_url("/projects.json", content) → "/projects.json?v=3f2a9c0b1d4e"
/// ```
pub fn catalogue_url(base: &str, content: &str) -> String {
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{base}{sep}v={}", content_version(content))
}
