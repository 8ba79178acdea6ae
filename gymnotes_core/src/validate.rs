//! Field and record validation for raw operator input.
//!
//! Every field validator trims its input and answers with a plain `bool`;
//! the record validator reports the first failing position.

use crate::error::RecordError;
use crate::types::FieldKind;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9.-]+$")
        .expect("e-mail pattern is a valid regex")
});

/// Lower bound applied to every numeric field of a record
const NUMERIC_MIN: i64 = 0;

/// Whole-number fields are stored as `u32`
const INT_MAX: i64 = u32::MAX as i64;

/// True if `s` is a base-10 integer inside the inclusive bounds
pub fn validate_int(s: &str, min: Option<i64>, max: Option<i64>) -> bool {
    match s.trim().parse::<i64>() {
        Ok(value) => min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m),
        Err(_) => false,
    }
}

/// True if `s` is a finite decimal number inside the inclusive bounds
pub fn validate_float(s: &str, min: Option<f64>, max: Option<f64>) -> bool {
    match s.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => {
            min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
        }
        _ => false,
    }
}

/// True if `s` has any content once trimmed
pub fn validate_str(s: &str) -> bool {
    !s.trim().is_empty()
}

/// True if `s` looks like `local-part@domain.tld`
pub fn validate_email(s: &str) -> bool {
    EMAIL_RE.is_match(s.trim())
}

/// Check one value against a schema position
pub fn validate_field(kind: FieldKind, s: &str) -> bool {
    match kind {
        FieldKind::Str => validate_str(s),
        FieldKind::Int => validate_int(s, Some(NUMERIC_MIN), Some(INT_MAX)),
        FieldKind::Float => validate_float(s, Some(NUMERIC_MIN as f64), None),
        FieldKind::Email => validate_email(s),
    }
}

/// Validate an ordered list of raw values against a schema.
///
/// A length mismatch fails before any field is looked at. Otherwise the
/// first value that does not satisfy its positional kind is reported.
pub fn validate_record<S: AsRef<str>>(
    values: &[S],
    schema: &[FieldKind],
) -> Result<(), RecordError> {
    if values.len() != schema.len() {
        return Err(RecordError::FieldCount {
            expected: schema.len(),
            actual: values.len(),
        });
    }

    for (i, (value, kind)) in values.iter().zip(schema).enumerate() {
        let value = value.as_ref();
        if !validate_field(*kind, value) {
            return Err(RecordError::InvalidField {
                position: i + 1,
                kind: *kind,
                value: value.trim().to_string(),
            });
        }
    }

    Ok(())
}
