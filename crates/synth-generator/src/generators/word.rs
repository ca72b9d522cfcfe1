//! Word-like string generator.
//!
//! Produces pronounceable nonsense such as `pralo` or `tramisca` by
//! alternating vowels with single consonants and two-letter clusters.
//! At most two vowels appear in a row, and at most two consonant units
//! (a cluster counts as two) appear before a vowel is forced.

use rand::seq::SliceRandom;
use rand::Rng;
use synth_core::FieldValue;

/// Bounds for the number of phoneme units in an untyped `string` field.
pub const WORD_UNITS: (usize, usize) = (3, 8);

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

const CONSONANTS: &[char] = &[
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'q', 'r', 's', 't', 'v', 'w',
    'x', 'y', 'z',
];

const CLUSTERS: &[&str] = &[
    "bl", "br", "cl", "cr", "dr", "fl", "fr", "gl", "gr", "pl", "pr", "sc", "sk", "sl", "sm", "sn",
    "sp", "st", "sw", "tr",
];

/// Generate a word made of `units` phoneme units.
///
/// A unit is one vowel, one consonant, or one cluster, so the returned
/// string may be longer than `units` characters.
pub fn generate_word<R: Rng>(rng: &mut R, units: usize) -> String {
    let mut word = String::with_capacity(units * 2);
    let mut consonant_run = 0;
    let mut vowel_run = 0;

    for _ in 0..units {
        let want_vowel = vowel_run < 2 && rng.gen_range(0..3) == 1;
        if want_vowel || consonant_run > 1 {
            word.push(pick(VOWELS, rng));
            consonant_run = 0;
            vowel_run += 1;
        } else {
            vowel_run = 0;
            if consonant_run > 0 || rng.gen_bool(0.5) {
                word.push(pick(CONSONANTS, rng));
                consonant_run += 1;
            } else {
                word.push_str(CLUSTERS.choose(rng).copied().unwrap_or("st"));
                consonant_run += 2;
            }
        }
    }

    word
}

/// Generate a word with a random unit count in [`WORD_UNITS`].
pub fn generate_word_value<R: Rng>(rng: &mut R) -> FieldValue {
    let units = rng.gen_range(WORD_UNITS.0..=WORD_UNITS.1);
    FieldValue::Text(generate_word(rng, units))
}

fn pick<R: Rng>(set: &[char], rng: &mut R) -> char {
    set.choose(rng).copied().unwrap_or('a')
}
