use log::debug;
use std::sync::Arc;

use super::goals_model::{Goal, NewGoal};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::errors::Result;

/// Service for managing goals.
pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(repository: Arc<dyn GoalRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl GoalServiceTrait for GoalService {
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        debug!("Creating goal '{}'", new_goal.title);
        self.repository.create(new_goal).await
    }

    fn get_goal(&self, goal_id: i64) -> Result<Goal> {
        self.repository.get_by_id(goal_id)
    }
}
