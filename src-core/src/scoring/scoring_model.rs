use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

pub const KIND_NUMBER: &str = "NUMBER";
pub const KIND_PERCENT: &str = "PERCENT";
pub const KIND_BOOLEAN: &str = "BOOLEAN";
pub const KIND_ENUM: &str = "ENUM";

pub const DIRECTION_HIGHER_BETTER: &str = "HIGHER_BETTER";
pub const DIRECTION_LOWER_BETTER: &str = "LOWER_BETTER";

/// Risk band for a computed 0-100 score. UNASSESSED is the sentinel for a
/// student scored with no criteria defined at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLabel {
    Low,
    Medium,
    High,
    Critical,
    Unassessed,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Low => "LOW",
            RiskLabel::Medium => "MEDIUM",
            RiskLabel::High => "HIGH",
            RiskLabel::Critical => "CRITICAL",
            RiskLabel::Unassessed => "UNASSESSED",
        }
    }
}

#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::criteria)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    pub id: String,
    pub key: String,
    pub name: String,
    pub kind: String,
    pub direction: String,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub weight: f64,
    pub source_field: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::criteria)]
#[serde(rename_all = "camelCase")]
pub struct NewCriteria {
    pub id: Option<String>,
    pub key: String,
    pub name: String,
    pub kind: String,
    pub direction: String,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub weight: Option<f64>,
    pub source_field: Option<String>,
}

impl NewCriteria {
    pub fn validate(&self) -> Result<(), Error> {
        if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
            if min >= max {
                return Err(
                    ValidationError::InvalidInput("minValue must be less than maxValue".into())
                        .into(),
                );
            }
        }
        match self.kind.as_str() {
            KIND_NUMBER | KIND_PERCENT | KIND_BOOLEAN | KIND_ENUM => {}
            other => {
                return Err(ValidationError::InvalidInput(format!(
                    "Unknown criteria kind '{}'",
                    other
                ))
                .into())
            }
        }
        match self.direction.as_str() {
            DIRECTION_HIGHER_BETTER | DIRECTION_LOWER_BETTER => {}
            other => {
                return Err(ValidationError::InvalidInput(format!(
                    "Unknown criteria direction '{}'",
                    other
                ))
                .into())
            }
        }
        Ok(())
    }
}

#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::student_criteria)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct StudentCriterion {
    pub id: String,
    pub student_id: String,
    pub criteria_id: String,
    pub value: f64,
    pub updated_at: NaiveDateTime,
}

#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::classifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub id: String,
    pub student_id: String,
    pub total_score: i32,
    pub label: String,
    pub computed_at: NaiveDateTime,
}

/// Per-criterion line of a score computation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CriterionScore {
    pub criteria: String,
    pub name: String,
    pub raw_value: f64,
    pub normalized: f64,
    pub weight: f64,
    pub contribution: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub student_id: String,
    pub total_score: i32,
    pub label: String,
    pub breakdown: Vec<CriterionScore>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentScoreSummary {
    pub student_id: String,
    pub score: i32,
    pub label: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecalculationSummary {
    pub total_students: usize,
    pub updated: Vec<StudentScoreSummary>,
}
