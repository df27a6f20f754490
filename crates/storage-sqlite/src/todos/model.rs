//! Database models for to-do items.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use stride_core::todos::Todo;

use crate::goals::GoalDB;

/// Database model for to-do items
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Associations,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(GoalDB, foreign_key = goal_id))]
#[diesel(table_name = crate::schema::todos)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TodoDB {
    pub id: String,
    pub member_id: String,
    pub goal_id: i64,
    pub content: String,
    pub sort_order: i32,
    pub is_completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<TodoDB> for Todo {
    fn from(db: TodoDB) -> Self {
        Self {
            id: db.id,
            member_id: db.member_id,
            goal_id: db.goal_id,
            content: db.content,
            sort_order: db.sort_order,
            is_completed: db.is_completed,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
