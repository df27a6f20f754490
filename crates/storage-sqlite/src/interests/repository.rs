use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use stride_core::interests::{
    InterestError, JobInterest, JobInterestRepositoryTrait, JobInterestType, MemberJobInterest,
};
use stride_core::{Error, Result};

use super::model::{JobInterestDB, MemberJobInterestDB, NewJobInterestDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::schema::{job_interests, member_job_interests};

/// Repository for the job interest hierarchy and member follow edges.
pub struct JobInterestRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl JobInterestRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load_interests(
        rows: Vec<JobInterestDB>,
    ) -> Result<Vec<JobInterest>> {
        rows.into_iter()
            .map(JobInterest::try_from)
            .collect::<Result<Vec<_>>>()
    }
}

#[async_trait]
impl JobInterestRepositoryTrait for JobInterestRepository {
    fn get_by_id(&self, interest_id: i64) -> Result<JobInterest> {
        let mut conn = get_connection(&self.pool)?;
        job_interests::table
            .find(interest_id)
            .select(JobInterestDB::as_select())
            .first::<JobInterestDB>(&mut conn)
            .optional()?
            .ok_or_else(|| InterestError::NotFound(interest_id).into())
            .and_then(JobInterest::try_from)
    }

    fn list_by_type(&self, interest_type: JobInterestType) -> Result<Vec<JobInterest>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = job_interests::table
            .filter(job_interests::interest_type.eq(interest_type.as_str()))
            .order(job_interests::id.asc())
            .select(JobInterestDB::as_select())
            .load::<JobInterestDB>(&mut conn)?;
        Self::load_interests(rows)
    }

    fn list_by_job_group(&self, job_group_id: i64) -> Result<Vec<JobInterest>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = job_interests::table
            .filter(job_interests::job_group_id.eq(job_group_id))
            .order(job_interests::id.asc())
            .select(JobInterestDB::as_select())
            .load::<JobInterestDB>(&mut conn)?;
        Self::load_interests(rows)
    }

    async fn insert(
        &self,
        name: String,
        interest_type: JobInterestType,
        job_group_id: Option<i64>,
    ) -> Result<JobInterest> {
        self.writer
            .exec(move |conn| {
                let new_row = NewJobInterestDB {
                    name,
                    interest_type: interest_type.as_str().to_string(),
                    job_group_id,
                };
                let created = diesel::insert_into(job_interests::table)
                    .values(&new_row)
                    .returning(JobInterestDB::as_returning())
                    .get_result::<JobInterestDB>(conn)?;
                JobInterest::try_from(created)
            })
            .await
    }

    fn exists_follow(&self, member_id: &str, interest_id: i64) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let present = diesel::select(diesel::dsl::exists(
            member_job_interests::table
                .filter(member_job_interests::member_id.eq(member_id))
                .filter(member_job_interests::job_interest_id.eq(interest_id)),
        ))
        .get_result::<bool>(&mut conn)?;
        Ok(present)
    }

    async fn insert_follow(
        &self,
        member_id: String,
        interest_id: i64,
    ) -> Result<MemberJobInterest> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| {
                let row = MemberJobInterestDB {
                    member_id: member_id.clone(),
                    job_interest_id: interest_id,
                    created_at: Utc::now().naive_utc(),
                };
                diesel::insert_into(member_job_interests::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(|e| match e {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            InterestError::AlreadyFollowed {
                                member_id,
                                interest_id,
                            }
                            .into()
                        }
                        other => Error::from(other),
                    })?;
                Ok(MemberJobInterest::from(row))
            })
            .await
    }

    async fn delete_follow(&self, member_id: String, interest_id: i64) -> Result<usize> {
        self.writer
            .exec(move |conn| {
                let deleted = diesel::delete(
                    member_job_interests::table
                        .filter(member_job_interests::member_id.eq(&member_id))
                        .filter(member_job_interests::job_interest_id.eq(interest_id)),
                )
                .execute(conn)?;
                Ok(deleted)
            })
            .await
    }

    fn list_followed_groups(&self, member_id: &str) -> Result<Vec<JobInterest>> {
        let mut conn = get_connection(&self.pool)?;
        let followed = member_job_interests::table
            .inner_join(job_interests::table)
            .filter(member_job_interests::member_id.eq(member_id))
            .select(JobInterestDB::as_select())
            .load::<JobInterestDB>(&mut conn)?;

        // Collapse to the distinct parent groups (a followed group is its
        // own parent).
        let mut group_ids: Vec<i64> = followed
            .iter()
            .map(|db| db.job_group_id.unwrap_or(db.id))
            .collect();
        group_ids.sort_unstable();
        group_ids.dedup();

        let rows = job_interests::table
            .filter(job_interests::id.eq_any(group_ids))
            .order(job_interests::id.asc())
            .select(JobInterestDB::as_select())
            .load::<JobInterestDB>(&mut conn)?;
        Self::load_interests(rows)
    }

    fn list_followed_by_group(
        &self,
        member_id: &str,
        job_group_id: i64,
    ) -> Result<Vec<JobInterest>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = member_job_interests::table
            .inner_join(job_interests::table)
            .filter(member_job_interests::member_id.eq(member_id))
            .filter(job_interests::job_group_id.eq(job_group_id))
            .order(job_interests::id.asc())
            .select(JobInterestDB::as_select())
            .load::<JobInterestDB>(&mut conn)?;
        Self::load_interests(rows)
    }
}
