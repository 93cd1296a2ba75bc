use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::guardians)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Guardian {
    pub id: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub relation_to_student: Option<String>,
    pub national_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::guardians)]
#[serde(rename_all = "camelCase")]
pub struct NewGuardian {
    pub id: Option<String>,
    pub full_name: String,
    pub phone: Option<String>,
    pub relation_to_student: Option<String>,
    pub national_number: Option<String>,
    pub notes: Option<String>,
}
