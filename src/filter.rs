//! Filter/sort engine for project list views.
//!
//! [`filter_projects`] is a pure function from the catalogue and a
//! [`FilterQuery`] to an ordered view of matching projects. It never fails:
//! missing tags behave as an empty list and unparsable dates sort as the
//! Unix epoch.
//!
//! ## Matching
//!
//! A project is kept when all of these hold:
//!
//! | Criterion | Rule |
//! |---|---|
//! | Type | `project.project_type == query.project_type` |
//! | Search | title or any tag contains the term, case-insensitively; empty matches all |
//! | Tags | project tags ⊇ selected tags (AND); empty selection matches all |
//!
//! ## Ordering
//!
//! Sorting uses the standard library's stable sort, so records with equal
//! keys keep their catalogue order. Title order goes through [`collate`].
//!
//! ```text
//! newest      date descending
//! oldest      date ascending
//! title-asc   collate(a, b)
//! title-desc  collate(b, a)
//! ```

use crate::types::{Project, ProjectType};
use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
    TitleAsc,
    TitleDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::NewestFirst,
        SortOrder::OldestFirst,
        SortOrder::TitleAsc,
        SortOrder::TitleDesc,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SortOrder::NewestFirst => "newest",
            SortOrder::OldestFirst => "oldest",
            SortOrder::TitleAsc => "title-asc",
            SortOrder::TitleDesc => "title-desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::NewestFirst => "Newest first",
            SortOrder::OldestFirst => "Oldest first",
            SortOrder::TitleAsc => "Title A–Z",
            SortOrder::TitleDesc => "Title Z–A",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|o| o.key() == s.trim())
            .ok_or_else(|| {
                format!("unknown sort order '{s}' (expected newest, oldest, title-asc or title-desc)")
            })
    }
}

/// Everything a list view filters and sorts by.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    pub project_type: ProjectType,
    pub search: String,
    pub tags: BTreeSet<String>,
    pub sort: SortOrder,
}

impl FilterQuery {
    /// All projects of one type, newest first.
    pub fn new(project_type: ProjectType) -> Self {
        Self {
            project_type,
            search: String::new(),
            tags: BTreeSet::new(),
            sort: SortOrder::default(),
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn sort(mut self, order: SortOrder) -> Self {
        self.sort = order;
        self
    }

    /// Flip a tag chip on or off.
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.tags.remove(tag) {
            self.tags.insert(tag.to_string());
        }
    }

    /// Drop search term and tag selection, keeping type and sort.
    pub fn clear(&mut self) {
        self.search.clear();
        self.tags.clear();
    }

    pub fn matches(&self, project: &Project) -> bool {
        project.project_type == self.project_type
            && matches_search(project, &self.search)
            && self.tags.iter().all(|t| project.has_tag(t))
    }
}

fn matches_search(project: &Project, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    project.title.to_lowercase().contains(&needle)
        || project.tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

/// The ordered view of `projects` matching `query`.
pub fn filter_projects<'a>(projects: &'a [Project], query: &FilterQuery) -> Vec<&'a Project> {
    let mut out: Vec<&Project> = projects.iter().filter(|p| query.matches(p)).collect();
    match query.sort {
        SortOrder::NewestFirst => out.sort_by(|a, b| parse_date(&b.date).cmp(&parse_date(&a.date))),
        SortOrder::OldestFirst => out.sort_by(|a, b| parse_date(&a.date).cmp(&parse_date(&b.date))),
        SortOrder::TitleAsc => out.sort_by(|a, b| collate(&a.title, &b.title)),
        SortOrder::TitleDesc => out.sort_by(|a, b| collate(&b.title, &a.title)),
    }
    out
}

/// Deduplicated, alphabetically ordered tags across projects of one type.
pub fn available_tags(projects: &[Project], project_type: ProjectType) -> Vec<String> {
    projects
        .iter()
        .filter(|p| p.project_type == project_type)
        .flat_map(|p| p.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Parse a project date for sorting.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps (the date part is used).
/// Anything else, including an empty string, is the Unix epoch, so
/// malformed dates sort as the oldest records.
pub fn parse_date(raw: &str) -> NaiveDate {
    try_parse_date(raw).unwrap_or(DateTime::<Utc>::UNIX_EPOCH.date_naive())
}

/// Strict form of [`parse_date`]: `None` for anything unrecognised.
pub fn try_parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Locale-style string comparison for titles.
///
/// Case is ignored at the primary level (`"apple" < "Banana"`). Strings that
/// differ only in case put lowercase first, and any remaining difference
/// falls back to code point order, so only identical strings compare equal.
pub fn collate(a: &str, b: &str) -> Ordering {
    let fold = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<String>();
    fold(a)
        .cmp(&fold(b))
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .map(|(x, y)| x.is_uppercase().cmp(&y.is_uppercase()))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.cmp(b))
}
