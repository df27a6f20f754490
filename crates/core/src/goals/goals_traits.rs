//! Goal repository and service traits.

use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;

use super::goals_model::{Goal, NewGoal};
use crate::errors::Result;

/// Trait defining the contract for goal repository operations.
///
/// The `*_in_tx` variants take a borrowed connection so the participation
/// lifecycle can compose them with its own writes in one transaction.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// Inserts a new goal with `is_end = false` and `join_count = 0`.
    async fn create(&self, new_goal: NewGoal) -> Result<Goal>;

    /// Fetches a goal by id. Fails with `GoalError::NotFound`.
    fn get_by_id(&self, goal_id: i64) -> Result<Goal>;

    fn get_by_id_in_tx(&self, goal_id: i64, conn: &mut SqliteConnection) -> Result<Goal>;

    /// Atomically increments `join_count` by one in a single UPDATE.
    /// Fails with `GoalError::NotFound` when the goal row is absent.
    fn increase_join_count_in_tx(&self, goal_id: i64, conn: &mut SqliteConnection) -> Result<()>;
}

/// Trait for goal service operations.
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;

    fn get_goal(&self, goal_id: i64) -> Result<Goal>;
}
