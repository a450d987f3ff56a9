//! Root composition.
//!
//! [`App`] wires the components together from an explicit [`AppConfig`]
//! and two storage scopes handed in by the caller. Nothing is global: the
//! CLI builds one `App` per invocation, tests build as many as they like,
//! and [`App::reset`] returns one to its just-started state.
//!
//! ```text
//! AppConfig ──▶ App ─┬─ Catalogue      (owned, mutated only via Dashboard)
//!                    ├─ AdminSession   (local + session storage)
//!                    ├─ Router         (active page, selected project)
//!                    └─ FilterQuery×2  (one per project type, kept across pages)
//! ```

use crate::admin::{AdminError, Dashboard};
use crate::catalogue::{self, Catalogue, CatalogueError};
use crate::config::{self, ConfigError, SiteConfig};
use crate::filter::{self, FilterQuery};
use crate::lightbox::{Lightbox, Platform};
use crate::router::{AdminView, Page, Router};
use crate::session::AdminSession;
use crate::storage::Storage;
use crate::types::{Project, ProjectType};
use std::path::{Path, PathBuf};

/// Process-wide settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding `config.toml`, the catalogue and `assets/`.
    pub site_dir: PathBuf,
    pub site: SiteConfig,
}

impl AppConfig {
    pub fn load(site_dir: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            site_dir: site_dir.to_path_buf(),
            site: config::load_config(site_dir)?,
        })
    }

    pub fn catalogue_path(&self) -> PathBuf {
        self.site_dir.join(&self.site.catalogue.path)
    }
}

pub struct App {
    config: AppConfig,
    catalogue: Catalogue,
    session: AdminSession,
    router: Router,
    queries: [FilterQuery; 2],
}

fn default_queries() -> [FilterQuery; 2] {
    ProjectType::ALL.map(FilterQuery::new)
}

fn query_slot(project_type: ProjectType) -> usize {
    match project_type {
        ProjectType::Frontend => 0,
        ProjectType::UxDesign => 1,
    }
}

impl App {
    /// Start up: load the catalogue (empty on failure) and restore the
    /// admin session from storage.
    pub fn new(config: AppConfig, local: Box<dyn Storage>, session: Box<dyn Storage>) -> Self {
        let catalogue = catalogue::load_catalogue(&config.catalogue_path());
        Self::with_catalogue(config, catalogue, local, session)
    }

    pub fn with_catalogue(
        config: AppConfig,
        catalogue: Catalogue,
        local: Box<dyn Storage>,
        session: Box<dyn Storage>,
    ) -> Self {
        let session = AdminSession::restore(config.site.admin.clone(), local, session);
        Self {
            config,
            catalogue,
            session,
            router: Router::new(),
            queries: default_queries(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut AdminSession {
        &mut self.session
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    pub fn query(&self, project_type: ProjectType) -> &FilterQuery {
        &self.queries[query_slot(project_type)]
    }

    pub fn query_mut(&mut self, project_type: ProjectType) -> &mut FilterQuery {
        &mut self.queries[query_slot(project_type)]
    }

    /// Projects of one type as its list page currently shows them.
    pub fn visible_projects(&self, project_type: ProjectType) -> Vec<&Project> {
        filter::filter_projects(self.catalogue.projects(), self.query(project_type))
    }

    /// Tag chips offered on a list page.
    pub fn tag_chips(&self, project_type: ProjectType) -> Vec<String> {
        filter::available_tags(self.catalogue.projects(), project_type)
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.router
            .selected_project()
            .and_then(|id| self.catalogue.get(id))
    }

    /// Lightbox over the selected project's gallery.
    pub fn open_gallery<P: Platform>(&self, platform: P) -> Option<Lightbox<P>> {
        let project = self.selected_project()?;
        Some(Lightbox::new(
            platform,
            project.gallery.len(),
            self.config.site.lightbox.swipe_threshold,
        ))
    }

    pub fn admin_view(&self) -> AdminView {
        Router::admin_view(self.session.is_authenticated())
    }

    pub fn dashboard(&mut self) -> Result<Dashboard<'_>, AdminError> {
        Dashboard::open(&self.session, &mut self.catalogue)
    }

    /// Write the catalogue back to its source file.
    pub fn save_catalogue(&self) -> Result<(), CatalogueError> {
        self.catalogue.save(&self.config.catalogue_path())
    }

    /// Back to the just-started state: logged out, default password, home
    /// page, empty filters. The catalogue is kept.
    pub fn reset(&mut self) {
        self.session.reset();
        self.router.reset();
        self.queries = default_queries();
    }
}
