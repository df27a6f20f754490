//! Database models for participations.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use stride_core::errors::Error;
use stride_core::participations::{NewParticipation, Participation};

use crate::goals::GoalDB;

/// Database model for one member's participation in one goal, keyed by the
/// (member_id, goal_id) composite primary key.
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
#[diesel(table_name = crate::schema::member_goals)]
#[diesel(primary_key(member_id, goal_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct MemberGoalDB {
    pub member_id: String,
    pub goal_id: i64,
    pub role: String,
    pub start_dt: NaiveDateTime,
    pub end_dt: NaiveDateTime,
    pub is_end: bool,
    pub copy_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// The role column is free text at the database level; converting back to
// the domain enum can fail, hence TryFrom rather than From.
impl TryFrom<MemberGoalDB> for Participation {
    type Error = Error;

    fn try_from(db: MemberGoalDB) -> Result<Self, Self::Error> {
        Ok(Participation {
            role: db.role.parse()?,
            member_id: db.member_id,
            goal_id: db.goal_id,
            start_dt: db.start_dt,
            end_dt: db.end_dt,
            is_end: db.is_end,
            copy_count: db.copy_count,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Participation> for MemberGoalDB {
    fn from(domain: Participation) -> Self {
        Self {
            member_id: domain.member_id,
            goal_id: domain.goal_id,
            role: domain.role.as_str().to_string(),
            start_dt: domain.start_dt,
            end_dt: domain.end_dt,
            is_end: domain.is_end,
            copy_count: domain.copy_count,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

impl From<NewParticipation> for MemberGoalDB {
    fn from(domain: NewParticipation) -> Self {
        Self {
            member_id: domain.member_id,
            goal_id: domain.goal_id,
            role: domain.role.as_str().to_string(),
            start_dt: domain.start_dt,
            end_dt: domain.end_dt,
            is_end: false,
            copy_count: 0,
            created_at: domain.start_dt,
            updated_at: domain.start_dt,
        }
    }
}
