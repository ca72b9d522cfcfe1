//! RNG-driven UUID keys.

use rand::Rng;
use uuid::{Builder, Uuid};

/// Draw a v4 UUID from `rng`, so seeded runs repeat their keys.
pub fn random_uuid<R: Rng>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}
