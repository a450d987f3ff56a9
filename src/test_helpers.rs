//! Shared test utilities for the folio test suite.
//!
//! Provides record builders, the two-project sample catalogue used across
//! modules, and extractors that make ordering assertions read as lists.
//!
//! ```text
//! use crate::filter::{filter_projects, FilterQuery};
//! use crate::test_helpers::*;
//! use crate::types::ProjectType;
//!
//! let catalogue = sample_catalogue();
//! let out = filter_projects(catalogue.projects(), &FilterQuery::new(ProjectType::Frontend));
//! assert_eq!(ids_of(&out), vec!["2", "1"]);
//! ```

use crate::catalogue::Catalogue;
use crate::types::{Project, ProjectType};

// =========================================================================
// Builders
// =========================================================================

/// A project with the fields the filter engine looks at; everything else empty.
pub fn project(id: &str, title: &str, project_type: ProjectType, date: &str, tags: &[&str]) -> Project {
    let mut p = Project::new(id, title, project_type);
    p.date = date.to_string();
    p.tags = tags.iter().map(|t| t.to_string()).collect();
    p
}

/// A project with a gallery of `n` images.
pub fn project_with_gallery(id: &str, n: usize) -> Project {
    let mut p = project(id, "Gallery", ProjectType::UxDesign, "2024-03-01", &[]);
    p.gallery = (1..=n).map(|i| format!("https://img.example/{id}/{i}.png")).collect();
    p
}

/// Alpha (2024-01-01, tag `a`) and Beta (2024-06-01, tag `b`), both Frontend.
pub fn sample_catalogue() -> Catalogue {
    Catalogue::new(vec![
        project("1", "Alpha", ProjectType::Frontend, "2024-01-01", &["a"]),
        project("2", "Beta", ProjectType::Frontend, "2024-06-01", &["b"]),
    ])
}

/// A mixed catalogue spanning both types, shared tags, and a malformed date.
pub fn mixed_catalogue() -> Catalogue {
    Catalogue::new(vec![
        project("fe-1", "Dashboard", ProjectType::Frontend, "2023-05-10", &["react", "charts"]),
        project("ux-1", "Onboarding", ProjectType::UxDesign, "2024-02-01", &["research", "mobile"]),
        project("fe-2", "checkout", ProjectType::Frontend, "2024-08-20", &["react", "payments"]),
        project("ux-2", "Banking App", ProjectType::UxDesign, "not a date", &["mobile", "fintech"]),
        project("fe-3", "Landing Page", ProjectType::Frontend, "2022-11-30", &["css"]),
    ])
}

// =========================================================================
// Extractors
// =========================================================================

/// Ids of an owned slice, in order.
pub fn ids(projects: &[Project]) -> Vec<&str> {
    projects.iter().map(|p| p.id.as_str()).collect()
}

/// Ids of a derived view, in order.
pub fn ids_of<'a>(projects: &[&'a Project]) -> Vec<&'a str> {
    projects.iter().map(|p| p.id.as_str()).collect()
}

/// Titles of a derived view, in order.
pub fn titles_of<'a>(projects: &[&'a Project]) -> Vec<&'a str> {
    projects.iter().map(|p| p.title.as_str()).collect()
}
