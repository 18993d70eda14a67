//! Shared test utilities for the drill-site test suite.
//!
//! Provides schema builders, lookup helpers and bulk extractors that work with
//! the derived curriculum (`DrillSite`, `Lesson`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (site, registry) = derive(sample_schema("test"));
//!
//! let lesson = find_lesson(&site, "Sounds", "Vowels", "Short A");
//! let location = registry.get(&lesson.levels[1].uid).unwrap();
//! assert_eq!(location, &location("Sounds", "Vowels", "Short A", 2));
//! ```

use std::path::Path;
use uuid::Uuid;

use crate::derive::{DrillPage, DrillSite, Lesson};
use crate::registry::Location;
use crate::schema::{Schema, parse_schema};

// =========================================================================
// Fixture setup
// =========================================================================

/// Path of the checked-in fixture schema.
pub fn fixture_schema_path() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/schema.json")
}

/// The fixture schema with its seed replaced.
pub fn sample_schema(seed: &str) -> Schema {
    let content = std::fs::read_to_string(fixture_schema_path()).unwrap();
    let mut schema = parse_schema(&content).unwrap();
    schema.config.uuid_seed = seed.to_string();
    schema
}

/// One page, one section, one lesson: `Sounds / Vowels / Short A`.
pub fn single_lesson_schema(seed: &str) -> Schema {
    let json = serde_json::json!({
        "config": {"uuid_seed": seed},
        "pages": [{
            "title": "Sounds",
            "sections": [{"heading": "Vowels", "lessons": ["Short A"]}]
        }]
    });
    parse_schema(&json.to_string()).unwrap()
}

pub fn location(page: &str, section: &str, lesson: &str, level: u8) -> Location {
    Location {
        page: page.to_string(),
        section: section.to_string(),
        lesson: lesson.to_string(),
        level,
    }
}

// =========================================================================
// Site lookups (panic with a clear message on miss)
// =========================================================================

/// Find a page by title. Panics if not found.
pub fn find_page<'a>(site: &'a DrillSite, title: &str) -> &'a DrillPage {
    site.pages
        .iter()
        .find(|p| p.title == title)
        .unwrap_or_else(|| {
            let titles: Vec<&str> = site.pages.iter().map(|p| p.title.as_str()).collect();
            panic!("page '{title}' not found. Available: {titles:?}")
        })
}

/// Find a lesson by page title, section heading and lesson name.
pub fn find_lesson<'a>(site: &'a DrillSite, page: &str, heading: &str, name: &str) -> &'a Lesson {
    let section = find_page(site, page)
        .sections
        .iter()
        .find(|s| s.heading == heading)
        .unwrap_or_else(|| panic!("section '{heading}' not found on page '{page}'"));
    section
        .lessons
        .iter()
        .find(|l| l.name == name)
        .unwrap_or_else(|| {
            let names: Vec<&str> = section.lessons.iter().map(|l| l.name.as_str()).collect();
            panic!("lesson '{name}' not found in '{page} / {heading}'. Available: {names:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Every level identifier in document order.
pub fn all_uids(site: &DrillSite) -> Vec<Uuid> {
    site.pages
        .iter()
        .flat_map(|p| &p.sections)
        .flat_map(|s| &s.lessons)
        .flat_map(|l| l.levels.iter().map(|level| level.uid))
        .collect()
}
