//! Interaction event records.

use synth_core::{EntityType, Record};

/// One interaction between two (or three) generated records.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// `<entity1_type>_with_<entity2_type>`, e.g. `player_with_npc`
    pub label: String,
    /// ISO 8601 timestamp inside the configured window
    pub timestamp: String,
    pub entity1_type: EntityType,
    pub entity1: Record,
    pub entity2_type: EntityType,
    pub entity2: Record,
    /// Verb from the relation table
    pub verb: String,
    /// Third entity type implied by the verb
    pub additional_type: Option<EntityType>,
    /// Sampled third entity; absent when its pool was empty
    pub additional_entity: Option<Record>,
}

impl EventRecord {
    /// Label for an ordered pair of entity types.
    pub fn label_for(entity1: EntityType, entity2: EntityType) -> String {
        format!("{entity1}_with_{entity2}")
    }

    /// Additional type and entity, only when an entity was actually sampled.
    pub fn additional(&self) -> Option<(EntityType, &Record)> {
        match (self.additional_type, &self.additional_entity) {
            (Some(t), Some(record)) => Some((t, record)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synth_core::FieldValue;

    #[test]
    fn test_label() {
        assert_eq!(
            EventRecord::label_for(EntityType::Player, EntityType::Npc),
            "player_with_npc"
        );
    }

    #[test]
    fn test_additional_requires_entity() {
        let record = Record::builder().field("id", FieldValue::Int(1)).build();
        let mut event = EventRecord {
            label: EventRecord::label_for(EntityType::Player, EntityType::Npc),
            timestamp: "2022-01-01T00:00:00".to_string(),
            entity1_type: EntityType::Player,
            entity1: record.clone(),
            entity2_type: EntityType::Npc,
            entity2: record.clone(),
            verb: "Talked".to_string(),
            additional_type: Some(EntityType::Dialogue),
            additional_entity: None,
        };
        assert!(event.additional().is_none());

        event.additional_entity = Some(record);
        assert_eq!(event.additional().map(|(t, _)| t), Some(EntityType::Dialogue));
    }
}
