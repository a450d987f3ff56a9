//! Static HTML rendering of the portfolio.
//!
//! Every public view is written as a plain HTML file. List pages use the
//! app's current filter query for their type; a freshly started app renders
//! each list unfiltered and newest first.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Home: hero + latest projects
//! ├── about.html                 # From about.md in the site dir (optional)
//! ├── frontend/index.html        # List view, Frontend projects
//! ├── ux-design/index.html       # List view, UX Design projects
//! ├── projects/
//! │   └── <page_slug(id)>.html   # Detail view with gallery + lightbox markup
//! ├── projects.json              # Exported catalogue
//! └── assets/                    # Copied from the site dir, if present
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/): templates are Rust expressions and
//! every interpolated value is escaped. Only markdown output from
//! `pulldown-cmark` is inserted pre-escaped.

use crate::app::App;
use crate::catalogue::{self, CatalogueError};
use crate::config::{self, SiteConfig};
use crate::filter::{self, FilterQuery, SortOrder};
use crate::router::Page;
use crate::types::{Project, ProjectType};
use crate::visibility::{ImmediateSource, VisibilityAnimator};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Event, Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),
    #[error("Asset copy failed: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Number of projects featured on the home page.
const FEATURED_COUNT: usize = 3;

/// What a render produced, for CLI reporting.
#[derive(Debug, Default)]
pub struct RenderSummary {
    /// Written pages, relative to the output directory.
    pub pages: Vec<String>,
    pub assets_copied: usize,
    pub catalogue_url: String,
}

/// Render every public view of `app` into `output_dir`.
pub fn render_site(app: &App, output_dir: &Path) -> Result<RenderSummary, RenderError> {
    let site = &app.config().site;
    let css = format!("{}\n\n{}", config::generate_color_css(&site.colors), CSS_STATIC);
    let mut summary = RenderSummary::default();

    fs::create_dir_all(output_dir)?;

    let json = app.catalogue().to_json_pretty()?;
    let catalogue_url =
        catalogue::catalogue_url(&format!("/{}", catalogue::EXPORT_FILENAME), &json);
    app.catalogue().export_to(output_dir)?;
    summary.catalogue_url = catalogue_url.clone();

    let about = load_about(&app.config().site_dir)?;

    let mut write = |rel: String, markup: Markup| -> Result<(), RenderError> {
        let path = output_dir.join(&rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, markup.into_string())?;
        debug!(page = %rel, "rendered");
        summary.pages.push(rel);
        Ok(())
    };

    write(
        "index.html".to_string(),
        render_home(app, about.is_some(), &catalogue_url, &css),
    )?;

    if let Some(body) = &about {
        write("about.html".to_string(), render_about(site, body, &css))?;
    }

    for ty in ProjectType::ALL {
        write(
            format!("{}/index.html", ty.slug()),
            render_list_page(app, app.query(ty), about.is_some(), &css),
        )?;
    }

    for project in app.catalogue().projects() {
        write(
            format!("projects/{}.html", page_slug(&project.id)),
            render_detail_page(site, project, about.is_some(), &css),
        )?;
    }

    summary.assets_copied = copy_assets(&app.config().site_dir.join("assets"), &output_dir.join("assets"))?;
    Ok(summary)
}

/// `about.md` from the site directory, if there is one.
fn load_about(site_dir: &Path) -> Result<Option<String>, RenderError> {
    let path = site_dir.join("about.md");
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(fs::read_to_string(path)?))
}

fn copy_assets(src: &Path, dst: &Path) -> Result<usize, RenderError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// File-name-safe form of a project id.
///
/// Lowercase ASCII letters, digits and `-` are kept; every other byte is
/// written as `_xx` (lowercase hex), `_` and capitals included, so distinct
/// ids never share a file, even on a case-insensitive filesystem.
///
/// ```text
/// "fe-2"  → "fe-2"
/// "a b"   → "a_20b"
/// "a_b"   → "a_5fb"
/// "A"     → "_41"
/// ```
pub fn page_slug(id: &str) -> String {
    let mut slug = String::with_capacity(id.len());
    for b in id.bytes() {
        if b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' {
            slug.push(b as char);
        } else {
            slug.push_str(&format!("_{b:02x}"));
        }
    }
    slug
}

/// Markdown to HTML. Raw HTML in the source is shown as text.
fn markdown(source: &str) -> Markup {
    let events = Parser::new(source).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    md_html::push_html(&mut out, events);
    PreEscaped(out)
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, css: &str, catalogue_url: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @if let Some(url) = catalogue_url {
                    link rel="alternate" type="application/json" href=(url);
                }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

fn site_header(site: &SiteConfig, current: &Page, has_about: bool) -> Markup {
    let title = if site.site.owner.is_empty() {
        site.site.title.clone()
    } else {
        site.site.owner.clone()
    };
    html! {
        header.site-header {
            a.site-title href="/" { (title) }
            nav.site-nav {
                (render_nav(current, has_about))
            }
        }
    }
}

/// Top-level navigation; the entry for `current` is marked.
pub fn render_nav(current: &Page, has_about: bool) -> Markup {
    let is_current = |page: &Page| current == page;
    html! {
        ul {
            li class=[is_current(&Page::Home).then_some("current")] {
                a href="/" { "Home" }
            }
            @for ty in ProjectType::ALL {
                li class=[is_current(&Page::Projects(ty)).then_some("current")] {
                    a href={ "/" (ty.slug()) "/" } { (ty.label()) }
                }
            }
            @if has_about {
                li class=[is_current(&Page::About).then_some("current")] {
                    a href="/about.html" { "About" }
                }
            }
        }
    }
}

fn project_card(project: &Project, visible: bool) -> Markup {
    let class = if visible { "project-card reveal is-visible" } else { "project-card reveal" };
    html! {
        a class=(class) id={ "card-" (page_slug(&project.id)) } href={ "/projects/" (page_slug(&project.id)) ".html" } data-reveal {
            @if !project.image_url.is_empty() {
                img src=(project.image_url) alt=(project.title) loading="lazy";
            }
            div.card-body {
                h3 { (project.title) }
                p.meta {
                    (project.difficulty.label())
                    @if !project.duration.is_empty() { " · " (project.duration) }
                }
                @if !project.outcome.is_empty() {
                    p { (project.outcome) }
                }
            }
        }
    }
}

/// Cards for `projects`, each flagged by the visibility animator.
fn card_grid(projects: &[&Project], threshold: f64) -> Markup {
    let mut animator = VisibilityAnimator::new(ImmediateSource::new(), threshold);
    for p in projects {
        animator.watch(&p.id);
    }
    animator.pump();
    html! {
        div.project-grid {
            @for p in projects {
                (project_card(p, animator.is_visible(&p.id)))
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home(app: &App, has_about: bool, catalogue_url: &str, css: &str) -> Markup {
    let site = &app.config().site;
    let mut latest: Vec<&Project> = app.catalogue().projects().iter().collect();
    latest.sort_by(|a, b| filter::parse_date(&b.date).cmp(&filter::parse_date(&a.date)));
    latest.truncate(FEATURED_COUNT);

    let content = html! {
        (site_header(site, &Page::Home, has_about))
        main.home-page {
            section.hero {
                h1 { (site.site.title) }
                p { (site.site.tagline) }
            }
            @if latest.is_empty() {
                p.empty-state { "No projects yet." }
            } @else {
                h2 { "Latest work" }
                (card_grid(&latest, site.visibility.threshold))
            }
        }
    };
    base_document(&site.site.title, css, Some(catalogue_url), content)
}

/// A list page for the query's project type.
pub fn render_list_page(app: &App, query: &FilterQuery, has_about: bool, css: &str) -> Markup {
    let site = &app.config().site;
    let ty = query.project_type;
    let projects = filter::filter_projects(app.catalogue().projects(), query);
    let chips = app.tag_chips(ty);

    let content = html! {
        (site_header(site, &Page::Projects(ty), has_about))
        main.list-page data-type=(ty.slug()) {
            h1 { (ty.label()) " projects" }
            form.controls {
                input type="search" name="q" placeholder="Search title or tag" value=(query.search);
                select name="sort" {
                    @for order in SortOrder::ALL {
                        option value=(order.key()) selected[order == query.sort] { (order.label()) }
                    }
                }
            }
            @if !chips.is_empty() {
                div.tag-chips {
                    @for tag in &chips {
                        span.chip.active[query.tags.contains(tag)] data-tag=(tag) { (tag) }
                    }
                }
            }
            @if projects.is_empty() {
                p.empty-state { "No projects match the current filters." }
            } @else {
                (card_grid(&projects, site.visibility.threshold))
            }
        }
    };
    base_document(&format!("{} · {}", ty.label(), site.site.title), css, None, content)
}

/// The detail page of one project, including its gallery and the lightbox
/// overlay (hidden until a gallery image is selected).
pub fn render_detail_page(site: &SiteConfig, project: &Project, has_about: bool, css: &str) -> Markup {
    let content = html! {
        // The detail page sits under its type's list in the nav.
        (site_header(site, &Page::Projects(project.project_type), has_about))
        main.project-detail {
            a.back href={ "/" (project.project_type.slug()) "/" } { "← " (project.project_type.label()) }
            h1 { (project.title) }
            @if !project.image_url.is_empty() {
                img.cover src=(project.image_url) alt=(project.title);
            }
            dl {
                dt { "Type" } dd { (project.project_type.label()) }
                @if !project.role.is_empty() { dt { "Role" } dd { (project.role) } }
                @if !project.duration.is_empty() { dt { "Duration" } dd { (project.duration) } }
                dt { "Difficulty" } dd { (project.difficulty.label()) }
                @if !project.date.is_empty() { dt { "Date" } dd { time datetime=(project.date) { (project.date) } } }
            }
            @if !project.outcome.is_empty() {
                p.outcome { strong { "Outcome: " } (project.outcome) }
            }
            @if !project.description.is_empty() {
                section.description { (markdown(&project.description)) }
            }
            @if !project.process.is_empty() {
                section.process {
                    h2 { "Process" }
                    ol { @for step in &project.process { li { (step) } } }
                }
            }
            @if !project.challenges.is_empty() {
                section.challenges {
                    h2 { "Challenges" }
                    (markdown(&project.challenges))
                }
            }
            @if !project.stack.is_empty() {
                section.stack {
                    h2 { "Stack" }
                    ul { @for item in &project.stack { li { (item) } } }
                }
            }
            @if !project.tags.is_empty() {
                div.tag-chips { @for tag in &project.tags { span.chip { (tag) } } }
            }
            @if !project.gallery.is_empty() {
                section.gallery-section {
                    h2 { "Gallery" }
                    div.gallery {
                        @for (i, src) in project.gallery.iter().enumerate() {
                            a href=(src) data-index=(i) {
                                img src=(src) alt={ (project.title) " – image " (i + 1) } loading="lazy";
                            }
                        }
                    }
                }
                div.lightbox hidden data-count=(project.gallery.len()) data-swipe-threshold=(site.lightbox.swipe_threshold.to_string()) {
                    button.lightbox-close type="button" aria-label="Close" { "×" }
                    button.lightbox-prev type="button" aria-label="Previous image" { "‹" }
                    img.lightbox-image alt="";
                    button.lightbox-next type="button" aria-label="Next image" { "›" }
                }
            }
        }
    };
    base_document(&format!("{} · {}", project.title, site.site.title), css, None, content)
}

fn render_about(site: &SiteConfig, body: &str, css: &str) -> Markup {
    let content = html! {
        (site_header(site, &Page::About, true))
        main.about-page {
            article.about-content { (markdown(body)) }
        }
    };
    base_document(&format!("About · {}", site.site.title), css, None, content)
}

// ============================================================================
// Tests
// ============================================================================
