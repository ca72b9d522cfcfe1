//! Value source catalog.
//!
//! A catalog maps a source name (e.g. `first_names`) to an ordered list of
//! candidate strings. Fields that name a `value_source` are filled by a
//! uniform pick from the matching list.
//!
//! A built-in catalog with the fixed fantasy vocabularies is always
//! available; catalog files are merged over it.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Error type for catalog lookups and loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Error reading catalog file
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML/JSON
    #[error("Failed to parse catalog: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Source name not present in the catalog
    #[error("Unknown value source: {0}")]
    UnknownSource(String),

    /// Source present but has no values to pick from
    #[error("Value source '{0}' is empty")]
    EmptySource(String),
}

/// Named lists of candidate values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueCatalog {
    sources: BTreeMap<String, Vec<String>>,
}

impl ValueCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the fixed fantasy vocabularies.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (name, values) in BUILTIN_SOURCES {
            catalog.insert(*name, values.iter().map(|v| v.to_string()).collect());
        }
        catalog
    }

    /// Load catalog entries from a YAML or JSON file (`name: [values...]`).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse catalog entries from a YAML (or JSON) string.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Add or replace a source.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.sources.insert(name.into(), values);
    }

    /// Merge `other` into this catalog; entries in `other` win.
    pub fn merge(mut self, other: ValueCatalog) -> Self {
        self.sources.extend(other.sources);
        self
    }

    /// Look up a source by exact name.
    pub fn get(&self, name: &str) -> Result<&[String], CatalogError> {
        self.sources
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| CatalogError::UnknownSource(name.to_string()))
    }

    /// Pick one value from the named source uniformly at random.
    pub fn sample<R: Rng>(&self, name: &str, rng: &mut R) -> Result<&str, CatalogError> {
        self.get(name)?
            .choose(rng)
            .map(String::as_str)
            .ok_or_else(|| CatalogError::EmptySource(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    /// All source names, sorted.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

const BUILTIN_SOURCES: &[(&str, &[&str])] = &[
    ("race_names", &["Elf", "Dwarf", "Human", "Orc", "Undead", "Naga"]),
    (
        "race_descriptions",
        &[
            "Graceful beings connected with nature and magic.",
            "Stout warriors skilled in metallurgy and crafting.",
            "Versatile and adaptive, excelling in various crafts and trades.",
            "Brutal and strong, excelling in physical combat.",
            "Risen from the dead, masters of dark arts and curses.",
            "Serpentine creatures adept in both magic and combat.",
        ],
    ),
    (
        "item_types",
        &[
            "Sword", "Staff", "Bow", "Shield", "Dagger", "Amulet", "Ring", "Potion",
        ],
    ),
    (
        "class_names",
        &["Warrior", "Mage", "Archer", "Healer", "Rogue", "Summoner"],
    ),
    (
        "class_descriptions",
        &[
            "Specializes in tanking damage and close combat.",
            "Offers both damage and support through a variety of spells.",
            "Excels at long-range damage with various types of arrows.",
            "Focuses on healing and buffing teammates.",
            "Skilled in stealth and quick, deadly attacks.",
            "Summons minions to aid in combat.",
        ],
    ),
    (
        "kingdom_names",
        &["Valoria", "Cimmeria", "Elphora", "Orynthia"],
    ),
    (
        "npc_types",
        &["Quest-givers", "Shopkeepers", "Skill_Trainers", "Lore_Masters"],
    ),
    (
        "npc_descriptions",
        &[
            "Assign tasks and offer rewards",
            "Sell items and resources",
            "Offer skill upgrades for a fee",
            "Provide backstory and clues to hidden secrets",
        ],
    ),
];
