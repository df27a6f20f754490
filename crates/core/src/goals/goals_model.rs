//! Goal domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Domain model representing a trackable goal.
///
/// `is_date_fixed` decides deadline ownership: a fixed-date goal imposes
/// its own `end_dt` on every participant, a flexible goal lets each
/// participant pick their own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub is_date_fixed: bool,
    pub start_dt: NaiveDateTime,
    pub end_dt: NaiveDateTime,
    /// Set by the goal owner to stop accepting new joins.
    pub is_end: bool,
    /// Cumulative count of participations ever created for this goal.
    pub join_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Goal {
    /// Whether the goal's own end date has passed.
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.end_dt < now
    }
}

/// Input model for creating a new goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    pub description: Option<String>,
    pub is_date_fixed: bool,
    pub start_dt: NaiveDateTime,
    pub end_dt: NaiveDateTime,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        if self.end_dt <= self.start_dt {
            return Err(ValidationError::InvalidInput(
                "endDt must be after startDt".to_string(),
            )
            .into());
        }
        Ok(())
    }
}
