use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::students)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub status: String,
    pub national_number: Option<String>,
    pub nationality: Option<String>,
    pub education_level: Option<String>,
    pub education_gap_years: Option<i32>,
    pub last_grade_completed: Option<String>,
    pub literacy_level: Option<String>,
    pub family_size: Option<i32>,
    pub monthly_income: Option<f64>,
    pub income_source: Option<String>,
    pub housing_status: Option<String>,
    pub has_disability: bool,
    pub disability_type: Option<String>,
    pub notes: Option<String>,
    pub guardian_id: Option<String>,
    pub school_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::students)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub id: Option<String>,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub status: String,
    pub national_number: Option<String>,
    pub nationality: Option<String>,
    pub education_level: Option<String>,
    pub education_gap_years: Option<i32>,
    pub last_grade_completed: Option<String>,
    pub literacy_level: Option<String>,
    pub family_size: Option<i32>,
    pub monthly_income: Option<f64>,
    pub income_source: Option<String>,
    pub housing_status: Option<String>,
    pub has_disability: bool,
    pub disability_type: Option<String>,
    pub notes: Option<String>,
    pub guardian_id: Option<String>,
    pub school_id: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl NewStudent {
    pub fn stamp(&mut self) {
        let now = Utc::now().naive_utc();
        if self.id.is_none() {
            self.id = Some(uuid::Uuid::new_v4().to_string());
        }
        self.created_at.get_or_insert(now);
        self.updated_at.get_or_insert(now);
    }
}
