//! Admin session: the credential check in front of the dashboard.
//!
//! The password lives in local storage under `admin.password_key` (the
//! configured default applies until one is stored) and the logged-in flag
//! lives in session storage under `admin.session_key`. Both are read once
//! in [`AdminSession::restore`]; afterwards the in-memory values are
//! authoritative and storage is written through on every change.
//!
//! Storage failures never lock the admin out or in: a failed read falls
//! back to the default, a failed write is logged and the in-memory state
//! still changes.

use crate::config::AdminConfig;
use crate::storage::Storage;
use thiserror::Error;
use tracing::{debug, warn};

const SESSION_FLAG: &str = "true";

/// Form validation failures, shown inline on the dashboard. None of them
/// mutate state.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Not logged in")]
    NotAuthenticated,
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },
    #[error("Passwords do not match")]
    Mismatch,
}

pub struct AdminSession {
    config: AdminConfig,
    local: Box<dyn Storage>,
    session: Box<dyn Storage>,
    password: String,
    authenticated: bool,
}

impl AdminSession {
    /// Read the stored password and session flag.
    pub fn restore(config: AdminConfig, local: Box<dyn Storage>, session: Box<dyn Storage>) -> Self {
        let password = match local.get(&config.password_key) {
            Ok(Some(p)) => p,
            Ok(None) => config.default_password.clone(),
            Err(e) => {
                warn!(error = %e, "could not read stored password, using default");
                config.default_password.clone()
            }
        };
        let authenticated = match session.get(&config.session_key) {
            Ok(flag) => flag.as_deref() == Some(SESSION_FLAG),
            Err(e) => {
                warn!(error = %e, "could not read session flag");
                false
            }
        };
        debug!(authenticated, "admin session restored");
        Self {
            config,
            local,
            session,
            password,
            authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Check `password`; on success mark the session authenticated.
    pub fn login(&mut self, password: &str) -> bool {
        if password != self.password {
            debug!("admin login rejected");
            return false;
        }
        self.authenticated = true;
        if let Err(e) = self.session.set(&self.config.session_key, SESSION_FLAG) {
            warn!(error = %e, "could not persist session flag");
        }
        debug!("admin logged in");
        true
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
        if let Err(e) = self.session.remove(&self.config.session_key) {
            warn!(error = %e, "could not clear session flag");
        }
        debug!("admin logged out");
    }

    /// Replace the password after checking length and confirmation.
    pub fn change_password(&mut self, new: &str, confirm: &str) -> Result<(), SessionError> {
        if !self.authenticated {
            return Err(SessionError::NotAuthenticated);
        }
        let min = self.config.min_password_length;
        if new.chars().count() < min {
            return Err(SessionError::TooShort { min });
        }
        if new != confirm {
            return Err(SessionError::Mismatch);
        }
        self.password = new.to_string();
        if let Err(e) = self.local.set(&self.config.password_key, new) {
            warn!(error = %e, "could not persist new password");
        }
        debug!("admin password changed");
        Ok(())
    }

    /// Log out and forget any stored password, back to the configured default.
    pub fn reset(&mut self) {
        self.logout();
        self.password = self.config.default_password.clone();
        if let Err(e) = self.local.remove(&self.config.password_key) {
            warn!(error = %e, "could not clear stored password");
        }
    }
}
