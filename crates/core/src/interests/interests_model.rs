//! Job interest domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{Error, ValidationError};

/// Kind of node in the job interest hierarchy: a top-level job group or a
/// concrete interest under one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobInterestType {
    JobGroup,
    JobInterest,
}

impl JobInterestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobInterestType::JobGroup => "JOB_GROUP",
            JobInterestType::JobInterest => "JOB_INTEREST",
        }
    }
}

impl FromStr for JobInterestType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JOB_GROUP" => Ok(JobInterestType::JobGroup),
            "JOB_INTEREST" => Ok(JobInterestType::JobInterest),
            other => Err(ValidationError::InvalidInput(format!(
                "unknown job interest type '{}'",
                other
            ))
            .into()),
        }
    }
}

/// A node in the job interest hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobInterest {
    pub id: i64,
    pub name: String,
    pub interest_type: JobInterestType,
    /// Parent group; `None` for top-level job groups.
    pub job_group_id: Option<i64>,
}

/// A member following a job interest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberJobInterest {
    pub member_id: String,
    pub job_interest_id: i64,
    pub created_at: NaiveDateTime,
}
