//! Relation table between entity types.
//!
//! The table is directional: `(player, npc)` is defined but `(npc, player)`
//! is not. Pairs outside the table have no relation and are rejected by
//! the event sampler.

use rand::seq::SliceRandom;
use rand::Rng;
use synth_core::EntityType;

/// A sampled relation for an ordered pair of entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    /// Verb describing the interaction (e.g. "Talked")
    pub verb: &'static str,
    /// Type of a third entity involved in the interaction, if any
    pub additional_type: Option<EntityType>,
}

const RELATIONS: &[(EntityType, EntityType, &[&str])] = &[
    (
        EntityType::Player,
        EntityType::Npc,
        &["Talked", "Fought", "Ignored", "Bought From", "Sold To"],
    ),
    (
        EntityType::Npc,
        EntityType::Dialogue,
        &["Started Conversation", "Ended Conversation"],
    ),
    (
        EntityType::Npc,
        EntityType::Quest,
        &["Gave Quest", "Completed Quest"],
    ),
    (EntityType::Item, EntityType::Npc, &["Given", "Taken"]),
    (
        EntityType::Player,
        EntityType::Guild,
        &["Joined", "Left", "Promoted"],
    ),
    (
        EntityType::Player,
        EntityType::Team,
        &["Joined", "Left", "Captained"],
    ),
    (
        EntityType::Player,
        EntityType::Enemy,
        &["Defeated", "Escaped", "Captured"],
    ),
];

/// Verb vocabulary for an ordered pair; empty when the pair is not related.
pub fn verbs(entity1: EntityType, entity2: EntityType) -> &'static [&'static str] {
    RELATIONS
        .iter()
        .find(|(a, b, _)| *a == entity1 && *b == entity2)
        .map(|(_, _, verbs)| *verbs)
        .unwrap_or(&[])
}

/// Whether the ordered pair has any relation.
pub fn is_compatible(entity1: EntityType, entity2: EntityType) -> bool {
    !verbs(entity1, entity2).is_empty()
}

/// Additional entity type implied by a verb of the `(player, npc)` relation.
fn additional_type_for(entity1: EntityType, entity2: EntityType, verb: &str) -> Option<EntityType> {
    match (entity1, entity2, verb) {
        (EntityType::Player, EntityType::Npc, "Talked") => Some(EntityType::Dialogue),
        (EntityType::Player, EntityType::Npc, "Bought From" | "Sold To") => Some(EntityType::Item),
        _ => None,
    }
}

/// Sample a relation for the ordered pair, or `None` if the pair is unrelated.
pub fn relation<R: Rng>(entity1: EntityType, entity2: EntityType, rng: &mut R) -> Option<Relation> {
    let verb = *verbs(entity1, entity2).choose(rng)?;
    Some(Relation {
        verb,
        additional_type: additional_type_for(entity1, entity2, verb),
    })
}

/// All ordered pairs with a relation, in table order.
pub fn compatible_pairs() -> impl Iterator<Item = (EntityType, EntityType)> {
    RELATIONS.iter().map(|(a, b, _)| (*a, *b))
}
