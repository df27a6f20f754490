//! To-do domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// A single to-do item belonging to one member's participation in a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub member_id: String,
    pub goal_id: i64,
    pub content: String,
    pub sort_order: i32,
    pub is_completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for one to-do item in a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTodoItem {
    pub content: String,
    #[serde(default)]
    pub sort_order: i32,
}

impl NewTodoItem {
    pub fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(ValidationError::MissingField("content".to_string()).into());
        }
        Ok(())
    }
}
