use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::follow_up_visits)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct FollowUpVisit {
    pub id: String,
    pub student_id: String,
    pub guardian_id: Option<String>,
    pub user_ref: String,
    pub visit_date: NaiveDateTime,
    pub visit_type: String,
    pub interaction_type: String,
    pub guardian_present: bool,
    pub notes: Option<String>,
    pub note_for_guardian: Option<String>,
    pub student_status_assessment: Option<String>,
    pub recommendations: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::follow_up_visits)]
#[serde(rename_all = "camelCase")]
pub struct NewFollowUpVisit {
    pub id: Option<String>,
    pub student_id: String,
    pub guardian_id: Option<String>,
    pub user_ref: String,
    pub visit_date: NaiveDateTime,
    pub visit_type: String,
    pub interaction_type: String,
    #[serde(default)]
    pub guardian_present: bool,
    pub notes: Option<String>,
    pub note_for_guardian: Option<String>,
    pub student_status_assessment: Option<String>,
    pub recommendations: Option<String>,
}
