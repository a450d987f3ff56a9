//! Admin dashboard: the only component allowed to mutate the catalogue.
//!
//! A [`Dashboard`] can only be opened with an authenticated
//! [`AdminSession`], and holds the catalogue mutably for its lifetime.
//! Edits go through [`ProjectForm`], the text the edit form captures; a
//! submitted form becomes a whole new [`Project`] that replaces the old one.
//!
//! Cover images picked from disk are inlined as `data:` URIs with
//! [`inline_image`]; nothing is uploaded anywhere.

use crate::catalogue::{Catalogue, CatalogueError};
use crate::session::AdminSession;
use crate::types::{Difficulty, Project, ProjectType};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Admin login required")]
    NotAuthenticated,
    #[error("{0}")]
    Validation(String),
    #[error("Not a recognised image: {0}")]
    UnsupportedImage(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
}

/// The edit form's fields as entered.
///
/// List fields are free text: `stack` and `tags` are comma separated,
/// `process` and `gallery` take one entry per line. Blank entries are
/// dropped and surrounding whitespace trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectForm {
    pub title: String,
    pub project_type: ProjectType,
    pub image_url: String,
    pub duration: String,
    pub difficulty: Difficulty,
    pub outcome: String,
    pub stack: String,
    pub tags: String,
    pub date: String,
    pub description: String,
    pub role: String,
    pub process: String,
    pub challenges: String,
    pub gallery: String,
}

impl ProjectForm {
    /// An empty form for a new project.
    pub fn blank(project_type: ProjectType) -> Self {
        Self::from_project(&Project::new("", "", project_type))
    }

    /// Pre-fill the form from an existing record.
    pub fn from_project(p: &Project) -> Self {
        Self {
            title: p.title.clone(),
            project_type: p.project_type,
            image_url: p.image_url.clone(),
            duration: p.duration.clone(),
            difficulty: p.difficulty,
            outcome: p.outcome.clone(),
            stack: p.stack.join(", "),
            tags: p.tags.join(", "),
            date: p.date.clone(),
            description: p.description.clone(),
            role: p.role.clone(),
            process: p.process.join("\n"),
            challenges: p.challenges.clone(),
            gallery: p.gallery.join("\n"),
        }
    }

    /// Build the record this form describes under `id`.
    pub fn to_project(&self, id: &str) -> Result<Project, AdminError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AdminError::Validation("Title is required".into()));
        }
        Ok(Project {
            id: id.to_string(),
            title: title.to_string(),
            project_type: self.project_type,
            image_url: self.image_url.trim().to_string(),
            duration: self.duration.trim().to_string(),
            difficulty: self.difficulty,
            outcome: self.outcome.trim().to_string(),
            stack: split_list(&self.stack, ','),
            tags: split_list(&self.tags, ','),
            date: self.date.trim().to_string(),
            description: self.description.trim().to_string(),
            role: self.role.trim().to_string(),
            process: split_list(&self.process, '\n'),
            challenges: self.challenges.trim().to_string(),
            gallery: split_list(&self.gallery, '\n'),
        })
    }
}

fn split_list(raw: &str, sep: char) -> Vec<String> {
    raw.split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read an image file and return it as a `data:` URI.
pub fn inline_image(path: &Path) -> Result<String, AdminError> {
    let bytes = fs::read(path)?;
    let format =
        image::guess_format(&bytes).map_err(|_| AdminError::UnsupportedImage(path.to_path_buf()))?;
    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        B64.encode(&bytes)
    ))
}

pub struct Dashboard<'a> {
    catalogue: &'a mut Catalogue,
}

impl<'a> Dashboard<'a> {
    pub fn open(session: &AdminSession, catalogue: &'a mut Catalogue) -> Result<Self, AdminError> {
        if !session.is_authenticated() {
            return Err(AdminError::NotAuthenticated);
        }
        Ok(Self { catalogue })
    }

    pub fn projects(&self) -> &[Project] {
        self.catalogue.projects()
    }

    /// Add a project from a form and return its new id.
    pub fn create(&mut self, form: &ProjectForm) -> Result<String, AdminError> {
        let id = self.catalogue.next_id();
        let project = form.to_project(&id)?;
        self.catalogue.insert(project)?;
        info!(id = %id, title = %form.title.trim(), "project created");
        Ok(id)
    }

    /// Replace project `id` with the form's contents.
    pub fn edit(&mut self, id: &str, form: &ProjectForm) -> Result<(), AdminError> {
        let project = form.to_project(id)?;
        self.catalogue.replace(project)?;
        info!(id, "project updated");
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<Project, AdminError> {
        let removed = self.catalogue.remove(id)?;
        info!(id, title = %removed.title, "project deleted");
        Ok(removed)
    }

    /// Drag-and-drop: move the project at `from` to position `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), AdminError> {
        self.catalogue.move_project(from, to)?;
        Ok(())
    }

    /// Write the current catalogue as `projects.json` into `dir`.
    pub fn export(&self, dir: &Path) -> Result<PathBuf, AdminError> {
        Ok(self.catalogue.export_to(dir)?)
    }
}
