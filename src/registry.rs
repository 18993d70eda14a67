//! The drill registry: identifier → human-readable location.
//!
//! The registry is what the drill API consumes. Every level identifier maps to
//! the `[page, section, lesson, level]` tuple it was derived from:
//!
//! ```text
//! {
//!   "b20af703-756c-5872-9ada-f0d96a48c952": ["Sounds", "Vowels", "Short A", 1],
//!   "8f5666c7-44b0-542e-838e-8d1807717009": ["Sounds", "Vowels", "Short A", 2]
//! }
//! ```
//!
//! ## Ordering and overwrites
//!
//! Entries keep their first-insertion order. Inserting an identifier that is
//! already present replaces its location in place (last write wins), which is
//! what happens when two lessons share the same composite key.
//!
//! ## File format
//!
//! Two-space indented object with each location array kept on its key's line.
//! Non-ASCII text is written as-is. The file is rewritten from scratch on
//! every build.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Registry JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Registry file not found: {0}")]
    NotFound(PathBuf),
}

/// Where a level identifier points: `[page, section, lesson, level]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LocationTuple", into = "LocationTuple")]
pub struct Location {
    pub page: String,
    pub section: String,
    pub lesson: String,
    pub level: u8,
}

type LocationTuple = (String, String, String, u8);

impl From<LocationTuple> for Location {
    fn from((page, section, lesson, level): LocationTuple) -> Self {
        Self {
            page,
            section,
            lesson,
            level,
        }
    }
}

impl From<Location> for LocationTuple {
    fn from(loc: Location) -> Self {
        (loc.page, loc.section, loc.lesson, loc.level)
    }
}

impl Location {
    /// Rebuild the composite key this location was derived from.
    pub fn composite_key(&self) -> String {
        crate::derive::composite_key(&self.page, &self.section, &self.lesson, self.level)
    }

    fn to_inline_json(&self) -> Result<String, serde_json::Error> {
        Ok(format!(
            "[{}, {}, {}, {}]",
            serde_json::to_string(&self.page)?,
            serde_json::to_string(&self.section)?,
            serde_json::to_string(&self.lesson)?,
            self.level
        ))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} \u{203a} {} \u{203a} {} \u{203a} Level {}",
            self.page, self.section, self.lesson, self.level
        )
    }
}

/// Insertion-ordered map from level identifier to [`Location`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    entries: Vec<(Uuid, Location)>,
    /// Runtime index: identifier → position in `entries`.
    index: HashMap<Uuid, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Returns the previous location if the identifier
    /// was already present; its position is kept.
    pub fn insert(&mut self, uid: Uuid, location: Location) -> Option<Location> {
        match self.index.get(&uid) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, location)),
            None => {
                self.index.insert(uid, self.entries.len());
                self.entries.push((uid, location));
                None
            }
        }
    }

    pub fn get(&self, uid: &Uuid) -> Option<&Location> {
        self.index.get(uid).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains(&self, uid: &Uuid) -> bool {
        self.index.contains_key(uid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Uuid, &Location)> {
        self.entries.iter().map(|(uid, loc)| (uid, loc))
    }

    /// Serialize in the registry file format.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        if self.entries.is_empty() {
            return Ok("{}".to_string());
        }
        let mut lines = Vec::with_capacity(self.entries.len());
        for (uid, location) in &self.entries {
            lines.push(format!(
                "  {}: {}",
                serde_json::to_string(&uid.to_string())?,
                location.to_inline_json()?
            ));
        }
        Ok(format!("{{\n{}\n}}", lines.join(",\n")))
    }

    /// Write the registry file, replacing any previous one.
    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Read a registry file, preserving entry order.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        if !path.exists() {
            return Err(RegistryError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl<'de> Deserialize<'de> for Registry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RegistryVisitor;

        impl<'de> Visitor<'de> for RegistryVisitor {
            type Value = Registry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of identifiers to [page, section, lesson, level]")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Registry, A::Error> {
                let mut registry = Registry::new();
                while let Some((uid, location)) = map.next_entry::<Uuid, Location>()? {
                    registry.insert(uid, location);
                }
                Ok(registry)
            }
        }

        deserializer.deserialize_map(RegistryVisitor)
    }
}

/// Differences between a persisted registry and a fresh one.
#[derive(Debug, Default, PartialEq)]
pub struct RegistryDiff {
    /// Present only in the fresh registry.
    pub added: Vec<(Uuid, Location)>,
    /// Present only in the persisted registry.
    pub removed: Vec<(Uuid, Location)>,
    /// Same identifier, different location (only possible through composite
    /// key collisions).
    pub moved: Vec<(Uuid, Location, Location)>,
}

impl RegistryDiff {
    pub fn compute(previous: &Registry, current: &Registry) -> Self {
        let mut diff = Self::default();
        for (uid, location) in current.iter() {
            match previous.get(uid) {
                None => diff.added.push((*uid, location.clone())),
                Some(old) if old != location => {
                    diff.moved.push((*uid, old.clone(), location.clone()))
                }
                Some(_) => {}
            }
        }
        for (uid, location) in previous.iter() {
            if !current.contains(uid) {
                diff.removed.push((*uid, location.clone()));
            }
        }
        diff
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.moved.is_empty()
    }
}
