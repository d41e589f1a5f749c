//! Site configuration module.
//!
//! Handles loading, validating, and merging the site's `config.toml`. Stock
//! defaults are the base layer; the optional file in the site directory is
//! merged on top, and CLI flags (`--host`, `--port`) win over both.
//!
//! The resolved [`SiteConfig`] is built once at startup and never mutated
//! afterwards. Handlers receive it through the shared application state.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_name = "Thai Card Store"  # Shown in titles and previews
//! content_root = "images"        # Image tree, relative to the site directory
//! static_dir = "static"          # Served verbatim under /static/
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"    # Captions, empty-state messages
//! border = "#e0e0e0"
//! accent = "#2563eb"        # Active tab and folder
//!
//! [colors.dark]
//! background = "#0a0a0a"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! border = "#333333"
//! accent = "#60a5fa"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::validate::validate_folder_name;

pub const CONFIG_FILE: &str = "config.toml";

/// Top-level URL segments already taken by the router.
const RESERVED_ROUTES: &[&str] = &["daily", "view", "static", "assets"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults; a config file only lists what it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Display name used in page titles and social previews.
    pub site_name: String,
    /// Directory under the site directory holding `daily/` and `weekly/`.
    /// Also the URL prefix images are served from.
    pub content_root: String,
    /// Directory under the site directory served at `/static/`.
    pub static_dir: String,
    /// Listener settings.
    pub server: ServerConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Thai Card Store".to_string(),
            content_root: "images".to_string(),
            static_dir: "static".to_string(),
            server: ServerConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_name must not be empty".into(),
            ));
        }
        // The content root doubles as a URL prefix and as the path prefix
        // untrusted `src` values are checked against.
        if validate_folder_name(&self.content_root).is_err() || self.content_root.starts_with('.')
        {
            return Err(ConfigError::Validation(
                "content_root must be a single directory name of [A-Za-z0-9._-]".into(),
            ));
        }
        if RESERVED_ROUTES.contains(&self.content_root.as_str()) {
            return Err(ConfigError::Validation(format!(
                "content_root must not be one of {RESERVED_ROUTES:?}"
            )));
        }
        if self.static_dir.is_empty() {
            return Err(ConfigError::Validation(
                "static_dir must not be empty".into(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
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

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Background color.
    pub background: String,
    /// Primary text color.
    pub text: String,
    /// Muted text (captions, empty-state messages).
    pub text_muted: String,
    /// Border color for cards and tabs.
    pub border: String,
    /// Highlight for the active tab and folder.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            accent: "#2563eb".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            accent: "#60a5fa".to_string(),
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
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
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
    let config_path = site_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load the site config: stock defaults with the site's `config.toml` merged
/// on top, unknown keys rejected, values validated.
pub fn load_config(site_dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_config(site_dir)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Card Gallery Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Display name used in page titles and social previews.
site_name = "Thai Card Store"

# Image tree, relative to the site directory. Must contain daily/ and/or
# weekly/. Images are served at /<content_root>/...
content_root = "images"

# Directory served verbatim at /static/.
static_dir = "static"

# ---------------------------------------------------------------------------
# Listener (overridden by --host / --port)
# ---------------------------------------------------------------------------
[server]
host = "127.0.0.1"
port = 8080

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"    # Captions, empty-state messages
border = "#e0e0e0"
accent = "#2563eb"        # Active tab and folder

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0a0a"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
accent = "#60a5fa"
"##
}

/// CSS custom property name and value for each palette slot, in the order
/// gallery.css consumes them.
fn palette_vars(scheme: &ColorScheme) -> [(&'static str, &str); 5] {
    [
        ("--color-bg", scheme.background.as_str()),
        ("--color-text", scheme.text.as_str()),
        ("--color-text-muted", scheme.text_muted.as_str()),
        ("--color-border", scheme.border.as_str()),
        ("--color-accent", scheme.accent.as_str()),
    ]
}

fn declarations(scheme: &ColorScheme, indent: &str) -> String {
    palette_vars(scheme)
        .iter()
        .map(|(name, value)| format!("{indent}{name}: {value};\n"))
        .collect()
}

/// `:root` palette variables, with the dark scheme behind a
/// `prefers-color-scheme` media query.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n{}}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{}    }}\n}}",
        declarations(&colors.light, "    "),
        declarations(&colors.dark, "        "),
    )
}
