//! Core domain types for the gym notes system.
//!
//! This module defines the records stored in the two tables:
//! - User profiles and the schema their raw input is checked against
//! - Workout feature selections
//! - Table names and reserved header rows

use crate::error::RecordError;
use std::fmt;

// ============================================================================
// Tables
// ============================================================================

/// Table holding one row per user profile
pub const USER_TABLE: &str = "user";

/// Table holding one row per workout feature selection
pub const FEATURES_TABLE: &str = "features";

/// Header row written to an empty user table
pub const USER_HEADER: [&str; 7] = [
    "name", "surname", "age", "gender", "weight", "height", "e-mail",
];

/// Title row of the features table (row 1)
pub const FEATURES_TITLE: [&str; 1] = ["workout features"];

/// Column header of the features table (row 2)
pub const FEATURES_HEADER: [&str; 5] = ["exercise", "weight", "reps", "rest time", "period"];

/// Number of rows at the top of the features table that never hold data
pub const FEATURES_RESERVED_ROWS: usize = 2;

/// 1-based column holding the e-mail, the natural key of a user row
pub const USER_EMAIL_COLUMN: usize = 7;

// ============================================================================
// Schema
// ============================================================================

/// Type tag for one position in a record schema
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Int,
    Float,
    Email,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Str => "text value",
            FieldKind::Int => "whole number",
            FieldKind::Float => "number",
            FieldKind::Email => "e-mail address",
        };
        f.write_str(name)
    }
}

/// Field order of a user record: name, surname, age, gender, weight, height, e-mail
pub const USER_SCHEMA: [FieldKind; 7] = [
    FieldKind::Str,
    FieldKind::Str,
    FieldKind::Int,
    FieldKind::Str,
    FieldKind::Float,
    FieldKind::Int,
    FieldKind::Email,
];

// ============================================================================
// Records
// ============================================================================

/// A validated user profile
///
/// Keeps the submitted text of every field so the stored row matches what
/// the operator typed; numeric fields are also available parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct UserRecord {
    cells: Vec<String>,
    age: u32,
    weight_kg: f64,
    height_cm: u32,
}

impl UserRecord {
    /// Build a record from raw fields, rejecting the whole record on any bad field
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, RecordError> {
        crate::validate::validate_record(fields, &USER_SCHEMA)?;

        let cells: Vec<String> = fields.iter().map(|f| f.as_ref().trim().to_string()).collect();
        let invalid = |i: usize| RecordError::InvalidField {
            position: i + 1,
            kind: USER_SCHEMA[i],
            value: cells[i].clone(),
        };

        let age = cells[2].parse().map_err(|_| invalid(2))?;
        let weight_kg = cells[4].parse().map_err(|_| invalid(4))?;
        let height_cm = cells[5].parse().map_err(|_| invalid(5))?;

        Ok(Self {
            cells,
            age,
            weight_kg,
            height_cm,
        })
    }

    pub fn name(&self) -> &str {
        &self.cells[0]
    }

    pub fn surname(&self) -> &str {
        &self.cells[1]
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> &str {
        &self.cells[3]
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_cm(&self) -> u32 {
        self.height_cm
    }

    pub fn email(&self) -> &str {
        &self.cells[USER_EMAIL_COLUMN - 1]
    }

    /// Cells in table column order, as submitted
    pub fn to_row(&self) -> Vec<String> {
        self.cells.clone()
    }
}

/// One workout selection, each field picked from a fixed menu
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkoutFeatureRecord {
    pub exercise: String,
    pub weight: String,
    pub reps: String,
    pub rest_time: String,
    pub period: String,
}

impl WorkoutFeatureRecord {
    /// Cells in table column order
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.exercise.clone(),
            self.weight.clone(),
            self.reps.clone(),
            self.rest_time.clone(),
            self.period.clone(),
        ]
    }
}

/// Convert a fixed header into an owned row
pub fn header_row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_fields_keeps_order() {
        let user = UserRecord::from_fields(&[
            "Jane", "Doe", "30", "female", "65.5", "170", "jane@x.com",
        ])
        .unwrap();

        assert_eq!(user.age(), 30);
        assert_eq!(user.weight_kg(), 65.5);
        assert_eq!(user.height_cm(), 170);
        assert_eq!(
            user.to_row(),
            vec!["Jane", "Doe", "30", "female", "65.5", "170", "jane@x.com"]
        );
    }

    #[test]
    fn test_user_from_fields_trims() {
        let user = UserRecord::from_fields(&[
            " Jane ", "Doe", " 30", "female", "65.5 ", "170", " jane@x.com ",
        ])
        .unwrap();
        assert_eq!(user.name(), "Jane");
        assert_eq!(user.email(), "jane@x.com");
    }

    #[test]
    fn test_user_row_keeps_submitted_text() {
        let user = UserRecord::from_fields(&[
            "Jane", "Doe", "030", "female", "70.0", "170", "j@x.com",
        ])
        .unwrap();
        assert_eq!(user.age(), 30);
        assert_eq!(user.weight_kg(), 70.0);
        assert_eq!(
            user.to_row(),
            vec!["Jane", "Doe", "030", "female", "70.0", "170", "j@x.com"]
        );

        let user = UserRecord::from_fields(&[
            "Jane", "Doe", "30", "female", "1e2", "170", "j@x.com",
        ])
        .unwrap();
        assert_eq!(user.to_row()[4], "1e2");
    }

    #[test]
    fn test_user_age_at_u32_limit() {
        let user = UserRecord::from_fields(&[
            "Jane", "Doe", "4294967295", "female", "70", "170", "j@x.com",
        ])
        .unwrap();
        assert_eq!(user.age(), u32::MAX);

        let err = UserRecord::from_fields(&[
            "Jane", "Doe", "4294967296", "female", "70", "170", "j@x.com",
        ])
        .unwrap_err();
        assert!(matches!(err, RecordError::InvalidField { position: 3, .. }));
    }

    #[test]
    fn test_user_from_fields_rejects_wholesale() {
        let err = UserRecord::from_fields(&[
            "Jane", "Doe", "thirty", "female", "65.5", "170", "jane@x.com",
        ])
        .unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidField {
                position: 3,
                kind: FieldKind::Int,
                value: "thirty".into(),
            }
        );
    }

    #[test]
    fn test_feature_row_order() {
        let record = WorkoutFeatureRecord {
            exercise: "Squat".into(),
            weight: "20kg".into(),
            reps: "10".into(),
            rest_time: "60s".into(),
            period: "2 weeks".into(),
        };
        assert_eq!(record.to_row(), vec!["Squat", "20kg", "10", "60s", "2 weeks"]);
    }

    #[test]
    fn test_header_matches_schema_width() {
        assert_eq!(USER_HEADER.len(), USER_SCHEMA.len());
        assert_eq!(USER_HEADER[USER_EMAIL_COLUMN - 1], "e-mail");
    }
}
