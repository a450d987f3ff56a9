//! In-memory page router.
//!
//! There is no URL routing: the router is the single place that knows which
//! top-level view is active and which project is selected. Opening a
//! project remembers the page it was opened from so "back" returns to the
//! same list rather than to the home page.

use crate::types::ProjectType;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Projects(ProjectType),
    Detail(String),
    About,
    Admin,
}

/// What the admin page shows for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminView {
    Login,
    Dashboard,
}

#[derive(Debug, Clone)]
pub struct Router {
    page: Page,
    /// Page a detail view was opened from.
    return_to: Option<Page>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            page: Page::Home,
            return_to: None,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn selected_project(&self) -> Option<&str> {
        match &self.page {
            Page::Detail(id) => Some(id),
            _ => None,
        }
    }

    /// Switch to a top-level page, dropping any selection.
    pub fn navigate(&mut self, page: Page) {
        debug!(?page, "navigate");
        if !matches!(page, Page::Detail(_)) {
            self.return_to = None;
        }
        self.page = page;
    }

    /// Open the detail view of a project from the current page.
    pub fn select_project(&mut self, id: impl Into<String>) {
        if !matches!(self.page, Page::Detail(_)) {
            self.return_to = Some(self.page.clone());
        }
        self.page = Page::Detail(id.into());
        debug!(page = ?self.page, "project selected");
    }

    /// Leave a detail view for the page it was opened from (home if none).
    pub fn back(&mut self) {
        if matches!(self.page, Page::Detail(_)) {
            self.page = self.return_to.take().unwrap_or(Page::Home);
        }
    }

    pub fn admin_view(authenticated: bool) -> AdminView {
        if authenticated {
            AdminView::Dashboard
        } else {
            AdminView::Login
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_home() {
        let r = Router::new();
        assert_eq!(r.page(), &Page::Home);
        assert_eq!(r.selected_project(), None);
    }

    #[test]
    fn back_returns_to_originating_list() {
        let mut r = Router::new();
        r.navigate(Page::Projects(ProjectType::UxDesign));
        r.select_project("42");
        assert_eq!(r.selected_project(), Some("42"));
        r.back();
        assert_eq!(r.page(), &Page::Projects(ProjectType::UxDesign));
    }

    #[test]
    fn selecting_from_detail_keeps_original_return_page() {
        let mut r = Router::new();
        r.navigate(Page::Projects(ProjectType::Frontend));
        r.select_project("1");
        r.select_project("2");
        r.back();
        assert_eq!(r.page(), &Page::Projects(ProjectType::Frontend));
    }

    #[test]
    fn back_without_origin_goes_home() {
        let mut r = Router::new();
        r.navigate(Page::Detail("9".into()));
        r.back();
        assert_eq!(r.page(), &Page::Home);
    }

    #[test]
    fn back_outside_detail_is_noop() {
        let mut r = Router::new();
        r.navigate(Page::About);
        r.back();
        assert_eq!(r.page(), &Page::About);
    }

    #[test]
    fn admin_view_depends_on_session() {
        assert_eq!(Router::admin_view(false), AdminView::Login);
        assert_eq!(Router::admin_view(true), AdminView::Dashboard);
    }

    #[test]
    fn reset_returns_home() {
        let mut r = Router::new();
        r.navigate(Page::Admin);
        r.reset();
        assert_eq!(r.page(), &Page::Home);
    }
}
