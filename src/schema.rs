//! Curriculum schema loading.
//!
//! Stage 1 of the build. Reads the JSON schema describing the curriculum and
//! checks its structure before anything else runs:
//!
//! ```text
//! schema.json
//! ├── config            # optional; seed + site settings (see config::DrillConfig)
//! └── pages[]
//!     ├── title         # label and output filename stem
//!     └── sections[]
//!         ├── heading
//!         └── lessons[] # "Short A" or { "name": "Short A", ... }
//! ```
//!
//! ## Validation
//!
//! Missing `pages`, `sections`, `heading` or `lessons`, and lessons that are
//! neither a string nor an object with a `name`, are reported by serde with
//! the offending line and column. Page titles additionally have to work as a
//! filename stem and as a link target since each page is written to
//! `<title>.html` and linked from the nav as-is, so `#`, `?` and `%` are
//! rejected along with path separators.
//!
//! Unknown keys are ignored at every level so schema authors can annotate
//! lessons freely. A key repeated within one object (two `"pages"`, say) is
//! an error rather than last-one-wins.

use crate::config::DrillConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Schema error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Schema file not found: {0}")]
    NotFound(PathBuf),
    #[error("Page title {0:?} cannot be used as a file name or link")]
    UnsafeTitle(String),
}

/// Parsed curriculum schema, before identifiers are attached.
#[derive(Debug, Clone, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub config: DrillConfig,
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub heading: String,
    pub lessons: Vec<LessonEntry>,
}

/// A lesson as written in the schema: a bare name or an object with a `name`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LessonEntry {
    Name(String),
    Object { name: String },
}

impl LessonEntry {
    pub fn into_name(self) -> String {
        match self {
            LessonEntry::Name(name) | LessonEntry::Object { name } => name,
        }
    }
}

impl Schema {
    /// Total number of lesson entries across all pages and sections.
    pub fn lesson_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| &p.sections)
            .map(|s| s.lessons.len())
            .sum()
    }

    /// Check constraints serde can't express.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for page in &self.pages {
            if !is_safe_file_stem(&page.title) {
                return Err(SchemaError::UnsafeTitle(page.title.clone()));
            }
        }
        Ok(())
    }
}

/// A page title is written verbatim as `<title>.html` inside the output dir
/// and used unencoded as the nav link.
fn is_safe_file_stem(title: &str) -> bool {
    !title.is_empty()
        && title != "."
        && title != ".."
        && !title.contains(['/', '\\', '\0', '#', '?', '%'])
}

/// Parse and validate a schema from JSON text.
pub fn parse_schema(json: &str) -> Result<Schema, SchemaError> {
    let schema: Schema = serde_json::from_str(json)?;
    schema.validate()?;
    Ok(schema)
}

/// Load and validate the schema file at `path`.
pub fn load_schema(path: &Path) -> Result<Schema, SchemaError> {
    if !path.exists() {
        return Err(SchemaError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    parse_schema(&content)
}
