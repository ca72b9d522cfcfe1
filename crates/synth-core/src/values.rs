//! Value representations for generated game-world records.
//!
//! `FieldValue` is the concrete value of one field, `Record` is an ordered,
//! immutable set of field values, and `Resolution` is what the field
//! resolver hands back for a single field spec.

use crate::schema::{DataType, EntityType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Format a timestamp as ISO 8601 without offset (`2021-03-04T05:06:07`).
pub fn format_iso(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Concrete value of a generated field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Integer value (also used for counter primary keys)
    Int(i64),

    /// Float value, already rounded to two decimals
    Float(f64),

    /// String value
    Text(String),

    /// Timestamp without timezone
    DateTime(NaiveDateTime),

    /// UUID primary key
    Uuid(Uuid),

    /// Explicit "no value" for fields whose datatype could not be generated
    Null,
}

impl FieldValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&NaiveDateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(u) => Some(u),
            _ => None,
        }
    }
}

/// Outcome of resolving one field spec.
///
/// Callers must decide what to do with `Unsupported`; the resolver never
/// writes a placeholder on its own.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A concrete value was produced
    Resolved(FieldValue),

    /// The field's datatype has no generator
    Unsupported(DataType),
}

impl Resolution {
    /// Get the resolved value, if any.
    pub fn value(&self) -> Option<&FieldValue> {
        match self {
            Resolution::Resolved(v) => Some(v),
            Resolution::Unsupported(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// A generated record: field values in schema declaration order.
///
/// Records are immutable once built; the event sampler only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    /// Create a record from ordered `(name, value)` pairs.
    pub fn new(fields: Vec<(String, FieldValue)>) -> Self {
        Self { fields }
    }

    /// Start building a record field by field.
    pub fn builder() -> RecordBuilder {
        RecordBuilder { fields: Vec::new() }
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Iterate over fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builder for `Record`.
pub struct RecordBuilder {
    fields: Vec<(String, FieldValue)>,
}

impl RecordBuilder {
    /// Append a field to the record.
    pub fn field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    /// Append a field in place.
    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push((name.into(), value));
    }

    pub fn build(self) -> Record {
        Record {
            fields: self.fields,
        }
    }
}

/// Records generated for one entity definition.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPool {
    /// Name of the owning entity definition
    pub name: String,

    /// Category tag of the owning entity definition
    pub entity_type: EntityType,

    /// Generated records in generation order
    pub records: Vec<Record>,
}

impl RecordPool {
    pub fn new(name: impl Into<String>, entity_type: EntityType, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            entity_type,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
