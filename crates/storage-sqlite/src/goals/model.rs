//! Database models for goals.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use stride_core::goals::{Goal, NewGoal};

/// Database model for goals
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
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct GoalDB {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub is_date_fixed: bool,
    pub start_dt: NaiveDateTime,
    pub end_dt: NaiveDateTime,
    pub is_end: bool,
    pub join_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new goal. The id column is omitted so
/// SQLite assigns the next rowid.
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[serde(rename_all = "camelCase")]
pub struct NewGoalDB {
    pub title: String,
    pub description: Option<String>,
    pub is_date_fixed: bool,
    pub start_dt: NaiveDateTime,
    pub end_dt: NaiveDateTime,
    pub is_end: bool,
    pub join_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion to domain models
impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Self {
            id: db.id,
            title: db.title,
            description: db.description,
            is_date_fixed: db.is_date_fixed,
            start_dt: db.start_dt,
            end_dt: db.end_dt,
            is_end: db.is_end,
            join_count: db.join_count,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewGoal> for NewGoalDB {
    fn from(domain: NewGoal) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            title: domain.title,
            description: domain.description,
            is_date_fixed: domain.is_date_fixed,
            start_dt: domain.start_dt,
            end_dt: domain.end_dt,
            is_end: false,
            join_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
