//! Shared range-validation helpers.

/// Push an error if `value` is outside `[min, max]`.
pub(crate) fn validate_range_f32(
    errors: &mut Vec<String>,
    name: &str,
    value: f32,
    min: f32,
    max: f32,
) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error unless `value` is finite and strictly positive.
pub(crate) fn validate_positive(errors: &mut Vec<String>, name: &str, value: f32) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(format!("{name} = {value} must be > 0"));
    }
}

pub(crate) fn validate_min_u32(errors: &mut Vec<String>, name: &str, value: u32, min: u32) {
    if value < min {
        errors.push(format!("{name} = {value} must be >= {min}"));
    }
}
