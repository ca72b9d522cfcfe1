//! Entity schema definitions for the worldsynth generator.
//!
//! This module defines the schema types that drive record generation.
//!
//! ## Type Hierarchy
//!
//! - `EntityType` - Closed set of category tags (player, npc, item, ...)
//! - `DataType` - Scalar type of a field (int, float, string, datetime)
//! - `FieldSpec` - Single field with an optional role or value source
//! - `EntityDefinition` - Named entity with a type tag and ordered fields
//! - `EntitySchema` - Full schema loaded from a YAML (or JSON) file
//!
//! A schema must be validated with [`EntitySchema::validate`] before any
//! generation starts; a schema that misses a required tag is rejected.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML/JSON
    #[error("Failed to parse schema: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// One or more required entity types have no definition
    #[error(
        "The following entity types are missing in the entity definitions: {}. All types must be defined: {}",
        join_types(.missing),
        join_types(EntityType::REQUIRED)
    )]
    MissingEntityTypes { missing: Vec<EntityType> },

    /// Two definitions share the same name
    #[error("Duplicate entity definition: {0}")]
    DuplicateEntity(String),

    /// Unknown entity type tag
    #[error("Invalid entity type: {0}")]
    UnknownEntityType(String),

    /// Known tag that a definition may not declare
    #[error(
        "Invalid entity type '{entity_type}' for entity '{entity}'. Definitions must use one of: {}",
        join_types(EntityType::REQUIRED)
    )]
    UndeclarableEntityType {
        entity: String,
        entity_type: EntityType,
    },
}

fn join_types(types: &[EntityType]) -> String {
    types
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Entity Types
// ============================================================================

/// Category tag of an entity definition.
///
/// Tags group record pools and drive relation compatibility. `Quest`
/// only exists as a relation-table key: no definition may declare it and
/// the event sampler never draws it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Player,
    Event,
    Item,
    Enemy,
    Team,
    Npc,
    Guild,
    Dialogue,
    Quest,
}

impl EntityType {
    /// Tags every schema must define, and the only tags it may use.
    pub const REQUIRED: &'static [EntityType] = &[
        EntityType::Player,
        EntityType::Event,
        EntityType::Item,
        EntityType::Enemy,
        EntityType::Team,
        EntityType::Npc,
        EntityType::Guild,
        EntityType::Dialogue,
    ];

    /// Every known tag, including relation-only ones.
    pub const ALL: &'static [EntityType] = &[
        EntityType::Player,
        EntityType::Event,
        EntityType::Item,
        EntityType::Enemy,
        EntityType::Team,
        EntityType::Npc,
        EntityType::Guild,
        EntityType::Dialogue,
        EntityType::Quest,
    ];

    /// Lowercase tag name as it appears in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Player => "player",
            EntityType::Event => "event",
            EntityType::Item => "item",
            EntityType::Enemy => "enemy",
            EntityType::Team => "team",
            EntityType::Npc => "npc",
            EntityType::Guild => "guild",
            EntityType::Dialogue => "dialogue",
            EntityType::Quest => "quest",
        }
    }

    /// Whether an entity definition may declare this tag.
    pub fn is_declarable(&self) -> bool {
        EntityType::REQUIRED.contains(self)
    }

    /// Primary-key counter namespace for this tag.
    ///
    /// Enemies share the npc bucket so that npc and enemy keys never collide.
    pub fn key_bucket(&self) -> EntityType {
        match self {
            EntityType::Enemy => EntityType::Npc,
            other => *other,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownEntityType(s.to_string()))
    }
}

// ============================================================================
// Field Types
// ============================================================================

/// Scalar data type of a field.
///
/// Datatype names outside the supported set are kept as `Other` so the
/// resolver can report them instead of failing at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataType {
    Int,
    Float,
    String,
    DateTime,
    Other(String),
}

impl DataType {
    pub fn as_str(&self) -> &str {
        match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::String => "string",
            DataType::DateTime => "datetime",
            DataType::Other(name) => name,
        }
    }
}

impl From<String> for DataType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "int" => DataType::Int,
            "float" => DataType::Float,
            "string" => DataType::String,
            "datetime" => DataType::DateTime,
            _ => DataType::Other(s),
        }
    }
}

impl From<DataType> for String {
    fn from(dt: DataType) -> Self {
        dt.as_str().to_string()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Special role of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    #[default]
    None,
    PrimaryKey,
}

/// Field specification inside an entity definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name
    pub name: String,

    /// Scalar type used when neither role nor value source applies
    pub datatype: DataType,

    /// Field role (`type: primary_key` is accepted for older schema files)
    #[serde(default, alias = "type")]
    pub role: FieldRole,

    /// Name of a catalog value source to sample from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_source: Option<String>,
}

impl FieldSpec {
    /// Create a plain typed field.
    pub fn new(name: impl Into<String>, datatype: DataType) -> Self {
        Self {
            name: name.into(),
            datatype,
            role: FieldRole::None,
            value_source: None,
        }
    }

    /// Create an integer primary-key field.
    pub fn primary_key(name: impl Into<String>) -> Self {
        Self {
            role: FieldRole::PrimaryKey,
            ..Self::new(name, DataType::Int)
        }
    }

    /// Create a string field filled from a catalog value source.
    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            value_source: Some(source.into()),
            ..Self::new(name, DataType::String)
        }
    }

    pub fn is_primary_key(&self) -> bool {
        self.role == FieldRole::PrimaryKey
    }
}

/// Entity definition: a named, typed list of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDefinition {
    /// Entity name (used as the dump header)
    pub name: String,

    /// Category tag
    #[serde(rename = "type")]
    pub entity_type: EntityType,

    /// Fields in declaration order
    pub fields: Vec<FieldSpec>,
}

impl EntityDefinition {
    pub fn new(name: impl Into<String>, entity_type: EntityType, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.into(),
            entity_type,
            fields,
        }
    }

    /// Get a field spec by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get all field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Full entity schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Entity definitions in file order
    pub entities: Vec<EntityDefinition>,
}

impl EntitySchema {
    pub fn new(entities: Vec<EntityDefinition>) -> Self {
        Self { entities }
    }

    /// Load schema from a YAML or JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from a YAML (or JSON) string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Get an entity definition by name.
    pub fn get_entity(&self, name: &str) -> Option<&EntityDefinition> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Set of tags defined by at least one entity.
    pub fn defined_types(&self) -> BTreeSet<EntityType> {
        self.entities.iter().map(|e| e.entity_type).collect()
    }

    /// Required tags with no definition, in canonical order.
    pub fn missing_types(&self) -> Vec<EntityType> {
        let defined = self.defined_types();
        EntityType::REQUIRED
            .iter()
            .copied()
            .filter(|t| !defined.contains(t))
            .collect()
    }

    /// Check the schema before generation.
    ///
    /// Fails on a relation-only tag, a missing required tag, or two
    /// definitions sharing a name.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if let Some(entity) = self.entities.iter().find(|e| !e.entity_type.is_declarable()) {
            return Err(SchemaError::UndeclarableEntityType {
                entity: entity.name.clone(),
                entity_type: entity.entity_type,
            });
        }

        let missing = self.missing_types();
        if !missing.is_empty() {
            return Err(SchemaError::MissingEntityTypes { missing });
        }

        let mut seen = HashSet::new();
        for entity in &self.entities {
            if !seen.insert(entity.name.as_str()) {
                return Err(SchemaError::DuplicateEntity(entity.name.clone()));
            }
        }

        Ok(())
    }
}
