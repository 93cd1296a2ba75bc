use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::schools)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: String,
    pub name: String,
    pub region: Option<String>,
    pub address: Option<String>,
    pub contact_info: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::schools)]
#[serde(rename_all = "camelCase")]
pub struct NewSchool {
    pub id: Option<String>,
    pub name: String,
    pub region: Option<String>,
    pub address: Option<String>,
    pub contact_info: Option<String>,
}
