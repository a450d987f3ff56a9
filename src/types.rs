//! The project record and its enumerations.
//!
//! These types are the JSON shape of the catalogue (`projects.json`). Field
//! names are camelCase on the wire (`imageUrl`) and the enums serialize to
//! their display labels (`"UX Design"`, `"Hard"`), so a catalogue written by
//! hand or exported from the dashboard reads the same.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discipline a project belongs to. Each list page shows exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProjectType {
    #[serde(rename = "Frontend")]
    Frontend,
    #[serde(rename = "UX Design")]
    UxDesign,
}

impl ProjectType {
    pub const ALL: [ProjectType; 2] = [ProjectType::Frontend, ProjectType::UxDesign];

    pub fn label(self) -> &'static str {
        match self {
            ProjectType::Frontend => "Frontend",
            ProjectType::UxDesign => "UX Design",
        }
    }

    /// URL slug used for the list page directory.
    pub fn slug(self) -> &'static str {
        match self {
            ProjectType::Frontend => "frontend",
            ProjectType::UxDesign => "ux-design",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProjectType {
    type Err = String;

    /// Accepts the label, the slug, or the common short forms (`ux`, `fe`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "frontend" | "fe" => Ok(ProjectType::Frontend),
            "ux design" | "ux-design" | "ux" => Ok(ProjectType::UxDesign),
            other => Err(format!(
                "unknown project type '{other}' (expected 'frontend' or 'ux-design')"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown difficulty '{s}' (expected Easy, Medium, Hard or Expert)"))
    }
}

/// A catalogued portfolio work item.
///
/// Optional fields default to empty when missing from the JSON or given as
/// `null`, so a sparse hand-written record still loads. `date` is kept as the raw ISO string; the
/// filter engine parses it when sorting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Opaque identifier, unique within the catalogue.
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    /// Cover image: a remote URL or an inlined `data:` URI.
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub difficulty: Difficulty,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outcome: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stack: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// ISO calendar date (`YYYY-MM-DD`), the sort key for newest/oldest.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub process: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub challenges: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gallery: Vec<String>,
}

/// `null` reads as the type's default, like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Project {
    /// Minimal record with every optional field empty.
    pub fn new(id: impl Into<String>, title: impl Into<String>, project_type: ProjectType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            project_type,
            image_url: String::new(),
            duration: String::new(),
            difficulty: Difficulty::default(),
            outcome: String::new(),
            stack: Vec::new(),
            tags: Vec::new(),
            date: String::new(),
            description: String::new(),
            role: String::new(),
            process: Vec::new(),
            challenges: String::new(),
            gallery: Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
