//! CLI output formatting for every `folio` command.
//!
//! # Information-First Display
//!
//! Projects are shown by what they are, not where they live: the header
//! line is a positional index plus the title, and identifying details (id,
//! date, tags) follow as indented context lines. The index is the position
//! in the current view, so `folio list --sort title-asc` numbers the
//! alphabetical order.
//!
//! # Output Format
//!
//! ## List
//!
//! ```text
//! Frontend (2 projects)
//! 001 Checkout
//!     Id: 1712345678901
//!     Date: 2024-08-20
//!     Tags: payments, react
//! 002 Dashboard
//!     Id: fe-1
//!     Date: 2023-05-10
//! ```
//!
//! ## Check
//!
//! ```text
//! Catalogue projects.json (5 projects)
//!     error: duplicate id '1'
//!     warning: project 'ux-2' has date 'tbd', sorted as 1970-01-01
//! ```
//!
//! ## Render
//!
//! ```text
//! Home → index.html
//! Frontend → frontend/index.html
//! ...
//! Rendered 6 pages, 3 assets into dist
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and, where the CLI prints it directly, a `print_*` wrapper
//! that writes to stdout. Format functions are pure: no I/O, no side effects.

use crate::catalogue::CheckReport;
use crate::lightbox::LightboxState;
use crate::render::RenderSummary;
use crate::types::{Project, ProjectType};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

// ============================================================================
// Projects
// ============================================================================

/// A list view: header with count, then one entry per project.
pub fn format_project_list(project_type: ProjectType, projects: &[&Project]) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({})",
        project_type.label(),
        plural(projects.len(), "project", "projects")
    )];
    if projects.is_empty() {
        lines.push(format!("{}No projects match the current filters.", indent(1)));
        return lines;
    }
    for (i, p) in projects.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), p.title));
        lines.push(format!("{}Id: {}", indent(1), p.id));
        if !p.date.is_empty() {
            lines.push(format!("{}Date: {}", indent(1), p.date));
        }
        if !p.tags.is_empty() {
            lines.push(format!("{}Tags: {}", indent(1), p.tags.join(", ")));
        }
    }
    lines
}

pub fn print_project_list(project_type: ProjectType, projects: &[&Project]) {
    for line in format_project_list(project_type, projects) {
        println!("{}", line);
    }
}

/// Tag chips for one project type.
pub fn format_tags(project_type: ProjectType, tags: &[String]) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({})",
        project_type.label(),
        plural(tags.len(), "tag", "tags")
    )];
    lines.extend(tags.iter().map(|t| format!("{}{}", indent(1), t)));
    lines
}

/// Everything the detail page shows, as text.
pub fn format_project_detail(p: &Project) -> Vec<String> {
    let mut lines = vec![p.title.clone()];
    let mut field = |label: &str, value: &str| {
        if !value.is_empty() {
            lines.push(format!("{}{}: {}", indent(1), label, value));
        }
    };
    field("Id", &p.id);
    field("Type", p.project_type.label());
    field("Difficulty", p.difficulty.label());
    field("Date", &p.date);
    field("Duration", &p.duration);
    field("Role", &p.role);
    field("Outcome", &p.outcome);
    field("Cover", &truncate_desc(&p.image_url, 60));
    field("Stack", &p.stack.join(", "));
    field("Tags", &p.tags.join(", "));
    field("Description", &truncate_desc(&p.description, 80));
    field("Challenges", &truncate_desc(&p.challenges, 80));

    if !p.process.is_empty() {
        lines.push(format!("{}Process", indent(1)));
        for (i, step) in p.process.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(2), format_index(i + 1), step));
        }
    }
    if !p.gallery.is_empty() {
        lines.push(format!(
            "{}Gallery ({})",
            indent(1),
            plural(p.gallery.len(), "image", "images")
        ));
        for (i, src) in p.gallery.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(2), format_index(i + 1), truncate_desc(src, 60)));
        }
    }
    lines
}

pub fn print_project_detail(p: &Project) {
    for line in format_project_detail(p) {
        println!("{}", line);
    }
}

// ============================================================================
// Check / Render / Export
// ============================================================================

pub fn format_check_report(path: &Path, report: &CheckReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Catalogue {} ({})",
        path.display(),
        plural(report.projects, "project", "projects")
    )];
    for e in &report.errors {
        lines.push(format!("{}error: {}", indent(1), e));
    }
    for w in &report.warnings {
        lines.push(format!("{}warning: {}", indent(1), w));
    }
    lines
}

pub fn print_check_report(path: &Path, report: &CheckReport) {
    for line in format_check_report(path, report) {
        println!("{}", line);
    }
}

/// Human label for a rendered page path.
fn page_label(rel: &str) -> String {
    match rel {
        "index.html" => "Home".to_string(),
        "about.html" => "About".to_string(),
        _ => ProjectType::ALL
            .iter()
            .find(|ty| rel == format!("{}/index.html", ty.slug()))
            .map(|ty| ty.label().to_string())
            .unwrap_or_else(|| {
                rel.strip_prefix("projects/")
                    .and_then(|r| r.strip_suffix(".html"))
                    .map(|id| format!("Project {id}"))
                    .unwrap_or_else(|| rel.to_string())
            }),
    }
}

pub fn format_render_summary(summary: &RenderSummary, output_dir: &Path) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .pages
        .iter()
        .map(|rel| format!("{} → {}", page_label(rel), rel))
        .collect();
    lines.push(format!("Catalogue → {}", summary.catalogue_url));
    lines.push(format!(
        "Rendered {}, {} into {}",
        plural(summary.pages.len(), "page", "pages"),
        plural(summary.assets_copied, "asset", "assets"),
        output_dir.display()
    ));
    lines
}

pub fn print_render_summary(summary: &RenderSummary, output_dir: &Path) {
    for line in format_render_summary(summary, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Gallery
// ============================================================================

/// One line describing the lightbox after an interaction.
///
/// ```text
/// open 2/5 https://img.example/2.png
/// closing (leaving fullscreen)
/// closed
/// ```
pub fn format_lightbox_state(state: LightboxState, closing: bool, gallery: &[String]) -> String {
    match state {
        LightboxState::Open { .. } if closing => "closing (leaving fullscreen)".to_string(),
        LightboxState::Open { index } => format!(
            "open {}/{} {}",
            index + 1,
            gallery.len(),
            gallery.get(index).map(String::as_str).unwrap_or("")
        ),
        LightboxState::Closed => "closed".to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::path::PathBuf;

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn truncate_desc_short() {
        assert_eq!(truncate_desc("Short text", 40), "Short text");
    }

    #[test]
    fn truncate_desc_long() {
        let text = "a".repeat(50);
        assert_eq!(truncate_desc(&text, 40), format!("{}...", "a".repeat(40)));
    }

    #[test]
    fn truncate_desc_multibyte() {
        assert_eq!(truncate_desc("ééé", 2), "éé...");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "page", "pages"), "1 page");
        assert_eq!(plural(0, "page", "pages"), "0 pages");
    }

    // =========================================================================
    // Project output tests
    // =========================================================================

    #[test]
    fn project_list_numbers_view_order() {
        let c = sample_catalogue();
        let view: Vec<&Project> = c.projects().iter().rev().collect();
        let lines = format_project_list(ProjectType::Frontend, &view);
        assert_eq!(lines[0], "Frontend (2 projects)");
        assert_eq!(lines[1], "001 Beta");
        assert_eq!(lines[2], "    Id: 2");
        assert_eq!(lines[3], "    Date: 2024-06-01");
        assert_eq!(lines[4], "    Tags: b");
        assert_eq!(lines[5], "002 Alpha");
    }

    #[test]
    fn project_list_empty_state() {
        let lines = format_project_list(ProjectType::UxDesign, &[]);
        assert_eq!(lines[0], "UX Design (0 projects)");
        assert!(lines[1].contains("No projects match"));
    }

    #[test]
    fn tags_listing() {
        let lines = format_tags(ProjectType::Frontend, &["css".into(), "react".into()]);
        assert_eq!(lines, vec!["Frontend (2 tags)", "    css", "    react"]);
    }

    #[test]
    fn detail_skips_empty_fields() {
        let mut p = project_with_gallery("g", 2);
        p.process = vec!["Sketch".into()];
        let lines = format_project_detail(&p);
        assert_eq!(lines[0], "Gallery");
        assert!(lines.contains(&"    Type: UX Design".to_string()));
        assert!(lines.contains(&"    Difficulty: Medium".to_string()));
        assert!(lines.contains(&"        001 Sketch".to_string()));
        assert!(lines.contains(&"    Gallery (2 images)".to_string()));
        assert!(!lines.iter().any(|l| l.contains("Role:")));
    }

    // =========================================================================
    // Check / render tests
    // =========================================================================

    #[test]
    fn check_report_lists_errors_then_warnings() {
        let report = CheckReport {
            projects: 3,
            errors: vec!["duplicate id '1'".into()],
            warnings: vec!["bad date".into()],
        };
        let lines = format_check_report(Path::new("projects.json"), &report);
        assert_eq!(
            lines,
            vec![
                "Catalogue projects.json (3 projects)",
                "    error: duplicate id '1'",
                "    warning: bad date",
            ]
        );
    }

    #[test]
    fn render_summary_labels_pages() {
        let summary = RenderSummary {
            pages: vec![
                "index.html".into(),
                "about.html".into(),
                "ux-design/index.html".into(),
                "projects/42.html".into(),
            ],
            assets_copied: 1,
            catalogue_url: "/projects.json?v=abc".into(),
        };
        let lines = format_render_summary(&summary, &PathBuf::from("dist"));
        assert_eq!(lines[0], "Home → index.html");
        assert_eq!(lines[1], "About → about.html");
        assert_eq!(lines[2], "UX Design → ux-design/index.html");
        assert_eq!(lines[3], "Project 42 → projects/42.html");
        assert_eq!(lines[4], "Catalogue → /projects.json?v=abc");
        assert_eq!(lines[5], "Rendered 4 pages, 1 asset into dist");
    }

    // =========================================================================
    // Gallery tests
    // =========================================================================

    #[test]
    fn lightbox_state_lines() {
        let gallery = vec!["a.png".to_string(), "b.png".to_string()];
        assert_eq!(
            format_lightbox_state(LightboxState::Open { index: 1 }, false, &gallery),
            "open 2/2 b.png"
        );
        assert_eq!(
            format_lightbox_state(LightboxState::Open { index: 1 }, true, &gallery),
            "closing (leaving fullscreen)"
        );
        assert_eq!(format_lightbox_state(LightboxState::Closed, false, &gallery), "closed");
    }
}
