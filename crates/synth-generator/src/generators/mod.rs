//! Individual value generators for field datatypes.
//!
//! This module provides the generation logic for each scalar datatype a
//! field can declare when it has neither a primary-key role nor a value
//! source.

pub mod numeric;
pub mod timestamp;
pub mod uuid;
pub mod word;

use rand::Rng;
use synth_core::{DataType, FieldValue, Resolution, TimeWindow};

/// Generate a random value for the given datatype.
///
/// Datatypes without a generator come back as `Resolution::Unsupported`.
pub fn generate_scalar<R: Rng>(datatype: &DataType, rng: &mut R, window: &TimeWindow) -> Resolution {
    let value = match datatype {
        DataType::Int => numeric::generate_int_range(rng, numeric::INT_RANGE.0, numeric::INT_RANGE.1),

        DataType::Float => {
            numeric::generate_float_range(rng, numeric::FLOAT_RANGE.0, numeric::FLOAT_RANGE.1)
        }

        DataType::String => word::generate_word_value(rng),

        DataType::DateTime => FieldValue::DateTime(timestamp::generate_timestamp(rng, window)),

        DataType::Other(_) => return Resolution::Unsupported(datatype.clone()),
    };

    Resolution::Resolved(value)
}
