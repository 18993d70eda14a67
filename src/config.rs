//! Configuration module.
//!
//! Two unrelated pieces of configuration live here:
//!
//! - [`BuildConfig`]: where the build reads and writes (`drill.toml`). Layered
//!   as stock defaults → `drill.toml` → command-line flags.
//! - [`DrillConfig`]: the `config` block inside the schema itself. It carries
//!   the identifier seed and whatever site settings the author wants the
//!   front-end to see.
//!
//! ## Build Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! schema = "schema.json"            # Curriculum schema to read
//! registry = "drill_registry.json"  # Identifier registry to write
//!
//! [output]
//! dir = "dist"                      # Rendered HTML
//! curriculum_json = false           # Also write dist/curriculum.json
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! ## The Seed
//!
//! Identifiers are derived from `config.uuid_seed` in the schema. When the key
//! is missing, [`DEFAULT_UUID_SEED`] is used instead. A schema without a seed
//! and a schema whose seed is literally `"default_seed"` produce the same
//! identifiers, and both differ from every other seed.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the build config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "drill.toml";

/// Seed used when the schema's `config` block has no `uuid_seed`.
pub const DEFAULT_UUID_SEED: &str = "default_seed";

/// Landing page heading when the schema doesn't set `site_title`.
pub const DEFAULT_SITE_TITLE: &str = "Drills";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Config validation error: {0}")]
    Validation(String),
}

// =============================================================================
// Build config (drill.toml)
// =============================================================================

/// Build configuration loaded from `drill.toml`.
///
/// All fields have defaults matching the conventional layout: `schema.json`
/// and `drill_registry.json` next to each other, HTML under `dist/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Path to the curriculum schema.
    pub schema: PathBuf,
    /// Path of the registry file written at the end of a build.
    pub registry: PathBuf,
    /// Rendered output settings.
    pub output: OutputConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            schema: PathBuf::from("schema.json"),
            registry: PathBuf::from("drill_registry.json"),
            output: OutputConfig::default(),
        }
    }
}

/// Rendered output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving the HTML pages.
    pub dir: PathBuf,
    /// Also write the annotated curriculum as `curriculum.json` in `dir`.
    pub curriculum_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("dist"),
            curriculum_json: false,
        }
    }
}

impl BuildConfig {
    /// Validate that every path is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schema.as_os_str().is_empty() {
            return Err(ConfigError::Validation("schema must not be empty".into()));
        }
        if self.registry.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "registry must not be empty".into(),
            ));
        }
        if self.output.dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output.dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BuildConfig::default()).expect("default config must serialize")
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

/// Read a config file as a raw TOML value. `Ok(None)` if it doesn't exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BuildConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BuildConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the build config.
///
/// An explicit path must exist. Without one, `drill.toml` in `dir` is used
/// when present and stock defaults otherwise.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<BuildConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) => {
            let raw = load_raw_config(path)?;
            Some(raw.ok_or_else(|| ConfigError::NotFound(path.to_path_buf()))?)
        }
        None => load_raw_config(&dir.join(CONFIG_FILENAME))?,
    };
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `drill.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# drill-site build configuration
# ==============================
# All settings are optional. Values shown below are the defaults.
# Command-line flags (--schema, --registry, --output) override this file.
# Unknown keys will cause an error.

# Curriculum schema (pages -> sections -> lessons). The identifier seed
# lives inside it, under config.uuid_seed.
schema = "schema.json"

# Registry written at the end of every build: identifier -> location.
# It is rebuilt from scratch each time, never merged.
registry = "drill_registry.json"

# ---------------------------------------------------------------------------
# Rendered output
# ---------------------------------------------------------------------------
[output]
# Directory receiving <page>.html, App.html and index.html.
dir = "dist"

# Also write the annotated curriculum (lessons with level identifiers)
# as curriculum.json in the output directory.
curriculum_json = false
"##
}

// =============================================================================
// Schema config block
// =============================================================================

/// The `config` block of a curriculum schema.
///
/// Only `uuid_seed`, `site_title` and `intro` are interpreted; every other key
/// is kept in [`extra`](Self::extra) and published to the app shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Seed for the identifier namespace.
    #[serde(default = "default_uuid_seed")]
    pub uuid_seed: String,
    /// Landing page heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_title: Option<String>,
    /// Markdown shown on the landing page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_uuid_seed() -> String {
    DEFAULT_UUID_SEED.to_string()
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            uuid_seed: default_uuid_seed(),
            site_title: None,
            intro: None,
            extra: serde_json::Map::new(),
        }
    }
}

impl DrillConfig {
    /// True when the seed is the fallback, whether omitted or spelled out.
    pub fn uses_default_seed(&self) -> bool {
        self.uuid_seed == DEFAULT_UUID_SEED
    }

    pub fn site_title(&self) -> &str {
        self.site_title.as_deref().unwrap_or(DEFAULT_SITE_TITLE)
    }
}
