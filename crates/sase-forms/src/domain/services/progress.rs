//! Completion progress

use crate::domain::value_objects::{FormSchema, FormValues};

/// Percentage of required fields holding a non-empty value.
///
/// Exactly 0.0 when there is no schema or the schema has no required fields.
pub fn calculate_progress(schema: Option<&FormSchema>, values: &FormValues) -> f64 {
    let Some(schema) = schema else {
        return 0.0;
    };

    let (required, filled) = schema.required_fields().fold((0usize, 0usize), |(r, f), field| {
        (r + 1, f + usize::from(values.is_filled(&field.name)))
    });

    if required == 0 {
        return 0.0;
    }
    if filled == required {
        return 100.0;
    }
    filled as f64 / required as f64 * 100.0
}
