//! Database models for job interests.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use stride_core::errors::Error;
use stride_core::interests::{JobInterest, MemberJobInterest};

/// Database model for a node in the job interest hierarchy
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::job_interests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct JobInterestDB {
    pub id: i64,
    pub name: String,
    pub interest_type: String,
    pub job_group_id: Option<i64>,
}

/// Database model for inserting a job interest; the id comes from SQLite.
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::job_interests)]
#[serde(rename_all = "camelCase")]
pub struct NewJobInterestDB {
    pub name: String,
    pub interest_type: String,
    pub job_group_id: Option<i64>,
}

/// Database model for a member following a job interest
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(JobInterestDB, foreign_key = job_interest_id))]
#[diesel(table_name = crate::schema::member_job_interests)]
#[diesel(primary_key(member_id, job_interest_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct MemberJobInterestDB {
    pub member_id: String,
    pub job_interest_id: i64,
    pub created_at: NaiveDateTime,
}

impl TryFrom<JobInterestDB> for JobInterest {
    type Error = Error;

    fn try_from(db: JobInterestDB) -> Result<Self, Self::Error> {
        Ok(JobInterest {
            interest_type: db.interest_type.parse()?,
            id: db.id,
            name: db.name,
            job_group_id: db.job_group_id,
        })
    }
}

impl From<MemberJobInterestDB> for MemberJobInterest {
    fn from(db: MemberJobInterestDB) -> Self {
        Self {
            member_id: db.member_id,
            job_interest_id: db.job_interest_id,
            created_at: db.created_at,
        }
    }
}
