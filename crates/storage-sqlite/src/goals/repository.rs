use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use stride_core::goals::{Goal, GoalError, GoalRepositoryTrait, NewGoal};
use stride_core::Result;

use super::model::{GoalDB, NewGoalDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::schema::goals;

/// Repository for managing goal data in the database.
pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn get_goal(goal_id: i64, conn: &mut SqliteConnection) -> Result<Goal> {
        goals::table
            .find(goal_id)
            .select(GoalDB::as_select())
            .first::<GoalDB>(conn)
            .optional()?
            .map(Goal::from)
            .ok_or_else(|| GoalError::NotFound(goal_id).into())
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    async fn create(&self, new_goal: NewGoal) -> Result<Goal> {
        self.writer
            .exec(move |conn| {
                let new_goal_db = NewGoalDB::from(new_goal);
                let created = diesel::insert_into(goals::table)
                    .values(&new_goal_db)
                    .returning(GoalDB::as_returning())
                    .get_result::<GoalDB>(conn)?;
                Ok(Goal::from(created))
            })
            .await
    }

    fn get_by_id(&self, goal_id: i64) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        Self::get_goal(goal_id, &mut conn)
    }

    fn get_by_id_in_tx(&self, goal_id: i64, conn: &mut SqliteConnection) -> Result<Goal> {
        Self::get_goal(goal_id, conn)
    }

    fn increase_join_count_in_tx(&self, goal_id: i64, conn: &mut SqliteConnection) -> Result<()> {
        // Single UPDATE so the increment is atomic; no read-modify-write.
        let updated = diesel::update(goals::table.find(goal_id))
            .set((
                goals::join_count.eq(goals::join_count + 1),
                goals::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)?;

        if updated == 0 {
            return Err(GoalError::NotFound(goal_id).into());
        }
        Ok(())
    }
}
