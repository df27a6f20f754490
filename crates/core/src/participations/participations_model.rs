//! Participation domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{Error, ValidationError};
use crate::goals::Goal;
use crate::todos::NewTodoItem;

/// Role of a member within a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalRole {
    Owner,
    Participant,
}

impl GoalRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalRole::Owner => "OWNER",
            GoalRole::Participant => "PARTICIPANT",
        }
    }
}

impl FromStr for GoalRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OWNER" => Ok(GoalRole::Owner),
            "PARTICIPANT" => Ok(GoalRole::Participant),
            other => {
                Err(ValidationError::InvalidInput(format!("unknown goal role '{}'", other)).into())
            }
        }
    }
}

/// One member's participation in one goal.
///
/// `end_dt` is this participation's own deadline and `is_end` its own
/// termination flag; both are independent of the goal's.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub member_id: String,
    pub goal_id: i64,
    pub role: GoalRole,
    pub start_dt: NaiveDateTime,
    pub end_dt: NaiveDateTime,
    pub is_end: bool,
    /// Number of members who joined this goal citing this member as
    /// referrer.
    pub copy_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for inserting a participation row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParticipation {
    pub member_id: String,
    pub goal_id: i64,
    pub role: GoalRole,
    pub start_dt: NaiveDateTime,
    pub end_dt: NaiveDateTime,
}

impl NewParticipation {
    pub fn new(
        member_id: String,
        goal_id: i64,
        role: GoalRole,
        start_dt: NaiveDateTime,
        end_dt: NaiveDateTime,
    ) -> Self {
        Self {
            member_id,
            goal_id,
            role,
            start_dt,
            end_dt,
        }
    }
}

/// Effective lifecycle state of a participation at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipationStatus {
    Active,
    EndedByFlag,
    EndedByDate,
}

/// Computes the effective status of a participation.
///
/// The explicit flag wins over date expiry when both apply. A deadline
/// exactly at `now` counts as passed.
pub fn effective_status(participation: &Participation, now: NaiveDateTime) -> ParticipationStatus {
    if participation.is_end {
        ParticipationStatus::EndedByFlag
    } else if participation.end_dt <= now {
        ParticipationStatus::EndedByDate
    } else {
        ParticipationStatus::Active
    }
}

/// Request body for joining an existing goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGoalRequest {
    pub goal_id: i64,
    /// Caller-picked deadline; ignored for fixed-date goals.
    pub end_dt: Option<NaiveDateTime>,
    /// Uid of the member whose participation this join was copied from.
    pub referrer_uid: Option<String>,
    /// To-do items seeded together with the new participation.
    #[serde(default)]
    pub todos: Vec<NewTodoItem>,
}

/// Request body for re-joining a goal the member previously left.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejoinGoalRequest {
    pub end_dt: Option<NaiveDateTime>,
}

/// A participation joined with the goal it belongs to, for list views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationDetail {
    pub participation: Participation,
    pub goal: Goal,
}
