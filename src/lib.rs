//! # drill-site
//!
//! A static site builder for language-drill curricula. A single JSON schema
//! lists pages, their sections and the lessons in each section; the build
//! gives every lesson three levels, assigns each level a stable identifier,
//! renders the HTML pages and writes a registry that maps identifiers back to
//! `[page, section, lesson, level]` for the drill API.
//!
//! # Architecture: Linear Pipeline
//!
//! ```text
//! 1. Load      schema.json  →  Schema                 (parse + validate)
//! 2. Derive    Schema       →  DrillSite + Registry   (pure, no I/O)
//! 3. Generate  DrillSite    →  dist/*.html
//! 4. Persist   Registry     →  drill_registry.json
//! ```
//!
//! Stage 2 runs to completion before anything is written, so a broken schema
//! never leaves half a site or half a registry behind.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`schema`] | Stage 1: loads the curriculum schema and checks its structure |
//! | [`derive`] | Stage 2: level generation, identifier derivation, registry construction |
//! | [`generate`] | Stage 3: renders list pages, the app shell and the landing page using Maud |
//! | [`registry`] | Registry type, file format, loading and diffing |
//! | [`config`] | `drill.toml` build config and the schema's `config` block |
//! | [`types`] | Navigation items shared by generate and output |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Name-Based Identifiers
//!
//! Identifiers are UUID v5: a namespace derived from the schema's seed, then
//! one UUID per `page|section|lesson|level` key. There is nothing to store
//! between builds. Rebuilding from the same schema reproduces every
//! identifier, so progress recorded against them by the API survives
//! rebuilds, and only the levels whose names actually changed get new ones.
//!
//! ## Fresh Registry Every Build
//!
//! The registry is a pure function of the schema. It is rewritten on every
//! build, never merged with the previous file. Use `drill-site diff` before
//! uploading to see which identifiers a schema edit retires.
//!
//! ## Maud Over Template Files
//!
//! Pages are Maud templates compiled into the binary: no template directory
//! to ship, and every piece of schema text is escaped.

pub mod config;
pub mod derive;
pub mod generate;
pub mod output;
pub mod registry;
pub mod schema;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
