//! Numeric value generators.

use rand::Rng;
use synth_core::FieldValue;

/// Bounds used for untyped `int` fields.
pub const INT_RANGE: (i64, i64) = (1, 1000);

/// Bounds used for untyped `float` fields.
pub const FLOAT_RANGE: (f64, f64) = (1.0, 1000.0);

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> FieldValue {
    FieldValue::Int(rng.gen_range(min..=max))
}

/// Generate a random float in the given range (inclusive), rounded to 2 decimal places.
pub fn generate_float_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> FieldValue {
    let value: f64 = rng.gen_range(min..=max);
    FieldValue::Float((value * 100.0).round() / 100.0)
}
