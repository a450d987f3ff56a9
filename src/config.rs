//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; the site's `config.toml` is merged on top key-by-key, so a
//! user file only needs the values it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Portfolio"
//! owner = ""
//! tagline = "Frontend & UX Design"
//!
//! [catalogue]
//! path = "projects.json"      # Relative to the site directory
//!
//! [admin]
//! default_password = "admin"  # Used until a password is set
//! password_key = "adminPassword"
//! session_key = "isAdminLoggedIn"
//! min_password_length = 6
//!
//! [lightbox]
//! swipe_threshold = 50.0      # Minimum horizontal swipe, in CSS pixels
//!
//! [visibility]
//! threshold = 0.1             # Fraction of an element that must be visible
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"
//! border = "#e0e0e0"
//! accent = "#2f6fed"
//!
//! [colors.dark]
//! background = "#0b0d12"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! border = "#2a2f3a"
//! accent = "#7aa2ff"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity shown in the header and page titles.
    pub site: SiteInfo,
    /// Where the project catalogue lives.
    pub catalogue: CatalogueConfig,
    /// Admin credential and storage key settings.
    pub admin: AdminConfig,
    /// Lightbox gesture settings.
    pub lightbox: LightboxConfig,
    /// Enter-animation visibility settings.
    pub visibility: VisibilityConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalogue.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "catalogue.path must not be empty".into(),
            ));
        }
        if self.admin.min_password_length == 0 {
            return Err(ConfigError::Validation(
                "admin.min_password_length must be at least 1".into(),
            ));
        }
        if self.admin.password_key.is_empty() || self.admin.session_key.is_empty() {
            return Err(ConfigError::Validation(
                "admin storage keys must not be empty".into(),
            ));
        }
        if !(self.lightbox.swipe_threshold > 0.0) {
            return Err(ConfigError::Validation(
                "lightbox.swipe_threshold must be positive".into(),
            ));
        }
        let t = self.visibility.threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(ConfigError::Validation(
                "visibility.threshold must be in (0, 1]".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub title: String,
    /// Portfolio owner's name; omitted from the header when empty.
    pub owner: String,
    pub tagline: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            owner: String::new(),
            tagline: "Frontend & UX Design".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogueConfig {
    /// Path to the JSON catalogue, relative to the site directory.
    pub path: String,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            path: "projects.json".to_string(),
        }
    }
}

/// Admin credential settings.
///
/// The password is plaintext in local storage; this gates a client-only
/// dashboard and is not an authentication system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdminConfig {
    /// Password accepted until one has been stored.
    pub default_password: String,
    /// Local storage key holding the password.
    pub password_key: String,
    /// Session storage key holding the logged-in flag.
    pub session_key: String,
    /// Minimum accepted length for a new password.
    pub min_password_length: usize,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            default_password: "admin".to_string(),
            password_key: "adminPassword".to_string(),
            session_key: "isAdminLoggedIn".to_string(),
            min_password_length: 6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    /// Minimum horizontal travel, in device-independent pixels, for a swipe
    /// to count as navigation.
    pub swipe_threshold: f64,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisibilityConfig {
    /// Intersection ratio at which an element counts as visible.
    pub threshold: f64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self { threshold: 0.1 }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary text (metadata, captions, chip labels).
    pub text_muted: String,
    pub border: String,
    /// Links, active chips, focus rings.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            accent: "#2f6fed".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0b0d12".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#2a2f3a".to_string(),
            accent: "#7aa2ff".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from the site directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(site_dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = site_dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config for a site directory: stock defaults with the site's
/// `config.toml` merged on top, then validated.
pub fn load_config(site_dir: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(site_dir)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`. Used by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys are an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
title = "Portfolio"
# Your name, shown in the header. Empty hides it.
owner = ""
tagline = "Frontend & UX Design"

# ---------------------------------------------------------------------------
# Catalogue
# ---------------------------------------------------------------------------
[catalogue]
# JSON array of projects, relative to the site directory.
path = "projects.json"

# ---------------------------------------------------------------------------
# Admin dashboard
# ---------------------------------------------------------------------------
[admin]
# Accepted until a password has been stored with `folio passwd`.
default_password = "admin"
password_key = "adminPassword"
session_key = "isAdminLoggedIn"
min_password_length = 6

# ---------------------------------------------------------------------------
# Lightbox
# ---------------------------------------------------------------------------
[lightbox]
# Minimum horizontal swipe distance (CSS pixels) to change image.
swipe_threshold = 50.0

# ---------------------------------------------------------------------------
# Enter animations
# ---------------------------------------------------------------------------
[visibility]
# Fraction of an element that must be on screen before it animates in.
threshold = 0.1

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"
border = "#e0e0e0"
accent = "#2f6fed"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0b0d12"
text = "#eeeeee"
text_muted = "#999999"
border = "#2a2f3a"
accent = "#7aa2ff"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let vars = |scheme: &ColorScheme, indent: &str| {
        format!(
            "{indent}--color-bg: {};\n{indent}--color-text: {};\n{indent}--color-text-muted: {};\n{indent}--color-border: {};\n{indent}--color-accent: {};",
            scheme.background, scheme.text, scheme.text_muted, scheme.border, scheme.accent,
        )
    };
    format!(
        ":root {{\n{}\n}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{}\n    }}\n}}",
        vars(&colors.light, "    "),
        vars(&colors.dark, "        "),
    )
}
