//! Level identifier derivation and registry construction.
//!
//! Stage 2 of the build, and the only part with real design content. Every
//! lesson gets exactly [`LEVELS_PER_LESSON`] levels, and every level gets a
//! name-based (v5) UUID computed in two steps:
//!
//! ```text
//! namespace = uuid5(NAMESPACE_DNS, seed)
//! uid       = uuid5(namespace, "page|section|lesson|level")
//! ```
//!
//! Both steps are pure SHA-1 derivations, so the same seed and the same
//! schema text always give the same identifiers, on any machine. Renaming a
//! page, section or lesson changes the identifiers under it and nothing else.
//!
//! ## Composite key collisions
//!
//! The key segments are joined with a literal `|` and never escaped. Two
//! levels whose keys come out identical, either because the lesson is listed
//! twice or because a `|` inside a name shifts the segment boundaries, share
//! one identifier. The registry then keeps the location of whichever was
//! processed last. Schema authors rely on this to deduplicate repeated lesson
//! entries, so it is kept.

use crate::config::DrillConfig;
use crate::registry::{Location, Registry};
use crate::schema::Schema;
use serde::Serialize;
use uuid::Uuid;

/// Fixed number of levels generated for every lesson, numbered from 1.
pub const LEVELS_PER_LESSON: u8 = 3;

/// Curriculum with identifiers attached, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct DrillSite {
    #[serde(skip)]
    pub config: DrillConfig,
    pub pages: Vec<DrillPage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DrillPage {
    pub title: String,
    pub sections: Vec<DrillSection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DrillSection {
    pub heading: String,
    pub lessons: Vec<Lesson>,
}

/// A normalized lesson: the input's string/object distinction is gone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lesson {
    pub name: String,
    pub levels: Vec<Level>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Level {
    pub num: u8,
    pub uid: Uuid,
}

impl DrillSite {
    pub fn lesson_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| &p.sections)
            .map(|s| s.lessons.len())
            .sum()
    }
}

/// Namespace for all identifiers of one build.
pub fn namespace(seed: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_DNS, seed.as_bytes())
}

/// `title|heading|lesson|level`, joined verbatim.
pub fn composite_key(page_title: &str, heading: &str, lesson: &str, level: u8) -> String {
    format!("{page_title}|{heading}|{lesson}|{level}")
}

pub fn level_uid(namespace: &Uuid, composite_key: &str) -> Uuid {
    Uuid::new_v5(namespace, composite_key.as_bytes())
}

/// Attach level identifiers to every lesson and collect the registry.
///
/// Walks pages, sections and lessons in document order. Consumes the schema;
/// nothing outside the returned values is touched.
pub fn derive(schema: Schema) -> (DrillSite, Registry) {
    let ns = namespace(&schema.config.uuid_seed);
    let mut registry = Registry::new();

    let pages = schema
        .pages
        .into_iter()
        .map(|page| {
            let sections = page
                .sections
                .into_iter()
                .map(|section| {
                    let lessons = section
                        .lessons
                        .into_iter()
                        .map(|entry| {
                            derive_lesson(
                                &ns,
                                &page.title,
                                &section.heading,
                                entry.into_name(),
                                &mut registry,
                            )
                        })
                        .collect();
                    DrillSection {
                        heading: section.heading,
                        lessons,
                    }
                })
                .collect();
            DrillPage {
                title: page.title,
                sections,
            }
        })
        .collect();

    let site = DrillSite {
        config: schema.config,
        pages,
    };
    (site, registry)
}

fn derive_lesson(
    ns: &Uuid,
    page_title: &str,
    heading: &str,
    name: String,
    registry: &mut Registry,
) -> Lesson {
    let levels = (1..=LEVELS_PER_LESSON)
        .map(|num| {
            let uid = level_uid(ns, &composite_key(page_title, heading, &name, num));
            registry.insert(
                uid,
                Location {
                    page: page_title.to_string(),
                    section: heading.to_string(),
                    lesson: name.clone(),
                    level: num,
                },
            );
            Level { num, uid }
        })
        .collect();
    Lesson { name, levels }
}
