use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use stride_core::paging::{Page, PageRequest};
use stride_core::participations::{
    NewParticipation, Participation, ParticipationError, ParticipationRepositoryTrait,
};
use stride_core::{Error, Result};

use super::model::MemberGoalDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::schema::member_goals;

/// Repository for managing participation rows in the database.
pub struct ParticipationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ParticipationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn get_row(
        member_id: &str,
        goal_id: i64,
        conn: &mut SqliteConnection,
    ) -> Result<Participation> {
        member_goals::table
            .find((member_id.to_string(), goal_id))
            .select(MemberGoalDB::as_select())
            .first::<MemberGoalDB>(conn)
            .optional()?
            .ok_or_else(|| {
                ParticipationError::NotFound {
                    member_id: member_id.to_string(),
                    goal_id,
                }
                .into()
            })
            .and_then(Participation::try_from)
    }

    /// The composite primary key is the arbiter for duplicate joins: a
    /// unique violation here becomes `AlreadyExists`.
    fn insert_row(
        new_participation: NewParticipation,
        conn: &mut SqliteConnection,
    ) -> Result<Participation> {
        let member_id = new_participation.member_id.clone();
        let goal_id = new_participation.goal_id;
        let row = MemberGoalDB::from(new_participation);

        diesel::insert_into(member_goals::table)
            .values(&row)
            .execute(conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    ParticipationError::AlreadyExists { member_id, goal_id }.into()
                }
                other => Error::from(other),
            })?;

        Participation::try_from(row)
    }

    fn load_page(
        rows: Vec<MemberGoalDB>,
        page: PageRequest,
        total: i64,
    ) -> Result<Page<Participation>> {
        let content = rows
            .into_iter()
            .map(Participation::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Page::new(content, page, total))
    }
}

#[async_trait]
impl ParticipationRepositoryTrait for ParticipationRepository {
    fn get(&self, member_id: &str, goal_id: i64) -> Result<Participation> {
        let mut conn = get_connection(&self.pool)?;
        Self::get_row(member_id, goal_id, &mut conn)
    }

    fn get_in_tx(
        &self,
        member_id: &str,
        goal_id: i64,
        conn: &mut SqliteConnection,
    ) -> Result<Participation> {
        Self::get_row(member_id, goal_id, conn)
    }

    fn exists(&self, member_id: &str, goal_id: i64) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let present = diesel::select(diesel::dsl::exists(
            member_goals::table
                .filter(member_goals::member_id.eq(member_id))
                .filter(member_goals::goal_id.eq(goal_id)),
        ))
        .get_result::<bool>(&mut conn)?;
        Ok(present)
    }

    async fn insert(&self, new_participation: NewParticipation) -> Result<Participation> {
        self.writer
            .exec(move |conn| Self::insert_row(new_participation, conn))
            .await
    }

    fn insert_in_tx(
        &self,
        new_participation: NewParticipation,
        conn: &mut SqliteConnection,
    ) -> Result<Participation> {
        Self::insert_row(new_participation, conn)
    }

    fn increase_copy_count_in_tx(
        &self,
        member_id: &str,
        goal_id: i64,
        conn: &mut SqliteConnection,
    ) -> Result<()> {
        // Single UPDATE so the increment is atomic; no read-modify-write.
        let updated = diesel::update(
            member_goals::table.find((member_id.to_string(), goal_id)),
        )
        .set((
            member_goals::copy_count.eq(member_goals::copy_count + 1),
            member_goals::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(conn)?;

        if updated == 0 {
            return Err(ParticipationError::NotFound {
                member_id: member_id.to_string(),
                goal_id,
            }
            .into());
        }
        Ok(())
    }

    fn save_in_tx(
        &self,
        participation: Participation,
        conn: &mut SqliteConnection,
    ) -> Result<Participation> {
        let mut row = MemberGoalDB::from(participation);
        row.updated_at = Utc::now().naive_utc();

        let updated = diesel::update(
            member_goals::table.find((row.member_id.clone(), row.goal_id)),
        )
        .set(&row)
        .execute(conn)?;

        if updated == 0 {
            return Err(ParticipationError::NotFound {
                member_id: row.member_id,
                goal_id: row.goal_id,
            }
            .into());
        }
        Participation::try_from(row)
    }

    fn list_active_page(
        &self,
        member_id: &str,
        as_of: NaiveDateTime,
        page: PageRequest,
    ) -> Result<Page<Participation>> {
        let mut conn = get_connection(&self.pool)?;
        let base = || {
            member_goals::table
                .filter(member_goals::member_id.eq(member_id))
                .filter(member_goals::is_end.eq(false))
                .filter(member_goals::end_dt.gt(as_of))
        };

        let total = base().count().get_result::<i64>(&mut conn)?;
        let rows = base()
            .select(MemberGoalDB::as_select())
            .order(member_goals::start_dt.desc())
            .limit(page.size)
            .offset(page.offset())
            .load::<MemberGoalDB>(&mut conn)?;

        Self::load_page(rows, page, total)
    }

    fn list_ended_page(
        &self,
        member_id: &str,
        as_of: NaiveDateTime,
        page: PageRequest,
    ) -> Result<Page<Participation>> {
        let mut conn = get_connection(&self.pool)?;
        let base = || {
            member_goals::table
                .filter(member_goals::member_id.eq(member_id))
                .filter(
                    member_goals::end_dt
                        .le(as_of)
                        .or(member_goals::is_end.eq(true)),
                )
        };

        let total = base().count().get_result::<i64>(&mut conn)?;
        let rows = base()
            .select(MemberGoalDB::as_select())
            .order(member_goals::start_dt.desc())
            .limit(page.size)
            .offset(page.offset())
            .load::<MemberGoalDB>(&mut conn)?;

        Self::load_page(rows, page, total)
    }

    fn list_member_ids_by_goal(&self, goal_id: i64, page: PageRequest) -> Result<Page<String>> {
        let mut conn = get_connection(&self.pool)?;
        let base = || member_goals::table.filter(member_goals::goal_id.eq(goal_id));

        let total = base().count().get_result::<i64>(&mut conn)?;
        let member_ids = base()
            .select(member_goals::member_id)
            .order(member_goals::created_at.asc())
            .limit(page.size)
            .offset(page.offset())
            .load::<String>(&mut conn)?;

        Ok(Page::new(member_ids, page, total))
    }

    fn count_by_goal(&self, goal_id: i64) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let total = member_goals::table
            .filter(member_goals::goal_id.eq(goal_id))
            .count()
            .get_result::<i64>(&mut conn)?;
        Ok(total)
    }

    fn list_ending_after(&self, cutoff: NaiveDateTime) -> Result<Vec<Participation>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = member_goals::table
            .filter(member_goals::end_dt.gt(cutoff))
            .select(MemberGoalDB::as_select())
            .order(member_goals::end_dt.asc())
            .load::<MemberGoalDB>(&mut conn)?;

        rows.into_iter()
            .map(Participation::try_from)
            .collect::<Result<Vec<_>>>()
    }
}
