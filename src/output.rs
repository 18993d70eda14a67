//! CLI output formatting for all build stages.
//!
//! # Information-First Display
//!
//! Output leads with the curriculum itself (positional index and title of
//! every page, section and lesson), with identifiers and file paths as
//! indented context lines. The inventory doubles as a readable dump of what
//! the registry is about to contain.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Pages
//! 001 Sounds
//!     001 Vowels
//!         001 Short A
//!             Level 1: b20af703-756c-5872-9ada-f0d96a48c952
//!             Level 2: 8f5666c7-44b0-542e-838e-8d1807717009
//!             Level 3: 3a49d47c-c676-598e-8819-ed9a36ecc5bf
//!
//! Seed
//!     test
//! ```
//!
//! ## Generate
//!
//! ```text
//! 001 Sounds → Sounds.html
//! Drill → App.html
//! Home → index.html
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::config::DrillConfig;
use crate::derive::DrillSite;
use crate::generate::GeneratedFile;
use crate::registry::{Location, RegistryDiff};
use std::path::Path;
use uuid::Uuid;

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

/// Seed line, flagging the fallback so an omitted seed doesn't go unnoticed.
fn seed_label(config: &DrillConfig) -> String {
    if config.uses_default_seed() {
        format!("{} (default)", config.uuid_seed)
    } else {
        config.uuid_seed.clone()
    }
}

// ============================================================================
// Check: curriculum inventory
// ============================================================================

/// Format the derived curriculum with every level identifier.
pub fn format_site_output(site: &DrillSite) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];

    for (p, page) in site.pages.iter().enumerate() {
        lines.push(format!("{} {}", format_index(p + 1), page.title));
        for (s, section) in page.sections.iter().enumerate() {
            lines.push(format!(
                "{}{} {}",
                indent(1),
                format_index(s + 1),
                section.heading
            ));
            if section.lessons.is_empty() {
                lines.push(format!("{}(no lessons)", indent(2)));
            }
            for (l, lesson) in section.lessons.iter().enumerate() {
                lines.push(format!("{}{} {}", indent(2), format_index(l + 1), lesson.name));
                for level in &lesson.levels {
                    lines.push(format!("{}Level {}: {}", indent(3), level.num, level.uid));
                }
            }
        }
    }

    lines.push(String::new());
    lines.push("Seed".to_string());
    lines.push(format!("{}{}", indent(1), seed_label(&site.config)));
    lines
}

pub fn print_site_output(site: &DrillSite) {
    for line in format_site_output(site) {
        println!("{}", line);
    }
}

// ============================================================================
// Build: generated files and summary
// ============================================================================

/// Format the list of written pages, `→` pointing at the output file.
pub fn format_generate_output(files: &[GeneratedFile]) -> Vec<String> {
    files
        .iter()
        .map(|file| match file.position {
            Some(pos) => format!(
                "{} {} \u{2192} {}",
                format_index(pos),
                file.label,
                file.filename
            ),
            None => format!("{} \u{2192} {}", file.label, file.filename),
        })
        .collect()
}

pub fn print_generate_output(files: &[GeneratedFile]) {
    for line in format_generate_output(files) {
        println!("{}", line);
    }
}

/// Format the closing summary of a build.
pub fn format_build_summary(
    identifiers: usize,
    config: &DrillConfig,
    registry_path: &Path,
    output_dir: &Path,
) -> Vec<String> {
    vec![
        format!(
            "{} identifiers generated (seed: {})",
            identifiers,
            seed_label(config)
        ),
        format!("Registry: {}", registry_path.display()),
        format!("HTML: {}", output_dir.display()),
    ]
}

pub fn print_build_summary(
    identifiers: usize,
    config: &DrillConfig,
    registry_path: &Path,
    output_dir: &Path,
) {
    for line in format_build_summary(identifiers, config, registry_path, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Lookup and diff
// ============================================================================

pub fn format_lookup(uid: &Uuid, location: &Location) -> String {
    format!("{} \u{2192} {}", uid, location)
}

/// Format registry changes: `+` added, `-` removed, `~` moved.
pub fn format_diff_output(diff: &RegistryDiff) -> Vec<String> {
    if diff.is_empty() {
        return vec!["Registry is up to date".to_string()];
    }

    let mut lines = Vec::new();
    for (uid, location) in &diff.added {
        lines.push(format!("+ {} {}", uid, location));
    }
    for (uid, location) in &diff.removed {
        lines.push(format!("- {} {}", uid, location));
    }
    for (uid, old, new) in &diff.moved {
        lines.push(format!("~ {} {} \u{2192} {}", uid, old, new));
    }
    lines.push(String::new());
    lines.push(format!(
        "{} added, {} removed, {} moved",
        diff.added.len(),
        diff.removed.len(),
        diff.moved.len()
    ));
    lines
}

pub fn print_diff_output(diff: &RegistryDiff) {
    for line in format_diff_output(diff) {
        println!("{}", line);
    }
}
