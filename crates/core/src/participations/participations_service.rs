use chrono::{NaiveDateTime, Utc};
use log::debug;
use std::sync::Arc;

use super::participations_errors::ParticipationError;
use super::participations_model::{
    GoalRole, JoinGoalRequest, NewParticipation, Participation, ParticipationDetail,
    RejoinGoalRequest,
};
use super::participations_traits::{ParticipationRepositoryTrait, ParticipationServiceTrait};
use crate::db::DbTransactionExecutor;
use crate::errors::{Error, Result, ValidationError};
use crate::goals::{Goal, GoalError, GoalRepositoryTrait};
use crate::paging::{Page, PageRequest};
use crate::todos::TodoRepositoryTrait;

/// Resolves the deadline for a join or rejoin against the goal's date
/// mode: fixed-date goals impose their own `end_dt`, flexible goals
/// require a caller-supplied one that is still in the future.
fn resolve_end_dt(
    goal: &Goal,
    requested: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> Result<NaiveDateTime> {
    if goal.is_date_fixed {
        return Ok(goal.end_dt);
    }
    let end_dt = requested.ok_or_else(|| ValidationError::MissingField("endDt".to_string()))?;
    if end_dt <= now {
        return Err(
            ValidationError::InvalidInput("endDt must be in the future".to_string()).into(),
        );
    }
    Ok(end_dt)
}

/// The participation lifecycle manager.
///
/// Owns every mutation of participation rows and of the goal counters they
/// derive from. Each mutating operation runs inside one transaction via
/// the executor, so partial counter increments are never observable.
pub struct ParticipationService<E: DbTransactionExecutor> {
    repository: Arc<dyn ParticipationRepositoryTrait>,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    todo_repository: Arc<dyn TodoRepositoryTrait>,
    transaction_executor: E,
}

impl<E: DbTransactionExecutor> ParticipationService<E> {
    pub fn new(
        repository: Arc<dyn ParticipationRepositoryTrait>,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        todo_repository: Arc<dyn TodoRepositoryTrait>,
        transaction_executor: E,
    ) -> Self {
        Self {
            repository,
            goal_repository,
            todo_repository,
            transaction_executor,
        }
    }

    /// Joins each participation with its goal. A participation whose goal
    /// row is gone fails the whole request: rows must never outlive their
    /// goal, so this is an integrity violation rather than a not-found.
    fn attach_goals(&self, page: Page<Participation>) -> Result<Page<ParticipationDetail>> {
        let Page {
            content,
            page,
            size,
            total_elements,
        } = page;

        let mut details = Vec::with_capacity(content.len());
        for participation in content {
            let goal = match self.goal_repository.get_by_id(participation.goal_id) {
                Ok(goal) => goal,
                Err(Error::Goal(GoalError::NotFound(_))) => {
                    return Err(ParticipationError::GoalMissing {
                        member_id: participation.member_id,
                        goal_id: participation.goal_id,
                    }
                    .into());
                }
                Err(other) => return Err(other),
            };
            details.push(ParticipationDetail {
                participation,
                goal,
            });
        }

        Ok(Page {
            content: details,
            page,
            size,
            total_elements,
        })
    }
}

#[async_trait::async_trait]
impl<E: DbTransactionExecutor> ParticipationServiceTrait for ParticipationService<E> {
    async fn join_existing_goal(
        &self,
        member_id: &str,
        request: JoinGoalRequest,
    ) -> Result<Participation> {
        let member_id = member_id.to_string();
        let repository = self.repository.clone();
        let goal_repository = self.goal_repository.clone();
        let todo_repository = self.todo_repository.clone();

        self.transaction_executor.execute(move |conn| {
            let goal = goal_repository.get_by_id_in_tx(request.goal_id, conn)?;
            if goal.is_end {
                return Err(GoalError::Terminated(goal.id).into());
            }

            let now = Utc::now().naive_utc();
            let end_dt = resolve_end_dt(&goal, request.end_dt, now)?;

            // Referrer credit, then the goal counter, then the row
            // itself. A missing referrer record aborts before anything
            // has moved.
            if let Some(referrer_uid) = request.referrer_uid.as_deref() {
                repository.increase_copy_count_in_tx(referrer_uid, goal.id, conn)?;
            }
            goal_repository.increase_join_count_in_tx(goal.id, conn)?;

            let participation = repository.insert_in_tx(
                NewParticipation::new(
                    member_id.clone(),
                    goal.id,
                    GoalRole::Participant,
                    now,
                    end_dt,
                ),
                conn,
            )?;

            if !request.todos.is_empty() {
                todo_repository.insert_batch_in_tx(&member_id, goal.id, request.todos, conn)?;
            }

            debug!(
                "member {} joined goal {} (end_dt {})",
                member_id, goal.id, end_dt
            );
            Ok(participation)
        })
    }

    fn has_existing_join(&self, member_id: &str, goal_id: i64) -> Result<bool> {
        self.repository.exists(member_id, goal_id)
    }

    async fn rejoin(
        &self,
        member_id: &str,
        goal_id: i64,
        request: RejoinGoalRequest,
    ) -> Result<Participation> {
        let member_id = member_id.to_string();
        let repository = self.repository.clone();
        let goal_repository = self.goal_repository.clone();

        self.transaction_executor.execute(move |conn| {
            let mut participation = repository.get_in_tx(&member_id, goal_id, conn)?;
            let goal = goal_repository.get_by_id_in_tx(goal_id, conn)?;

            let now = Utc::now().naive_utc();
            if goal.is_date_fixed && goal.is_expired(now) {
                return Err(GoalError::Terminated(goal.id).into());
            }

            participation.is_end = false;
            participation.start_dt = now;
            participation.end_dt = resolve_end_dt(&goal, request.end_dt, now)?;

            debug!("member {} rejoined goal {}", member_id, goal_id);
            repository.save_in_tx(participation, conn)
        })
    }

    async fn end_participation(&self, member_id: &str, goal_id: i64) -> Result<Participation> {
        let member_id = member_id.to_string();
        let repository = self.repository.clone();

        self.transaction_executor.execute(move |conn| {
            let mut participation = repository.get_in_tx(&member_id, goal_id, conn)?;
            participation.is_end = true;
            repository.save_in_tx(participation, conn)
        })
    }

    async fn add_participation(
        &self,
        member_id: &str,
        goal_id: i64,
        end_dt: NaiveDateTime,
        role: GoalRole,
    ) -> Result<Participation> {
        let now = Utc::now().naive_utc();
        self.repository
            .insert(NewParticipation::new(
                member_id.to_string(),
                goal_id,
                role,
                now,
                end_dt,
            ))
            .await
    }

    fn get_participation(&self, member_id: &str, goal_id: i64) -> Result<Participation> {
        self.repository.get(member_id, goal_id)
    }

    fn get_role(&self, member_id: &str, goal_id: i64) -> Result<GoalRole> {
        Ok(self.repository.get(member_id, goal_id)?.role)
    }

    fn list_active_participations(
        &self,
        member_id: &str,
        page: PageRequest,
    ) -> Result<Page<ParticipationDetail>> {
        let now = Utc::now().naive_utc();
        let participations = self.repository.list_active_page(member_id, now, page)?;
        self.attach_goals(participations)
    }

    fn list_ended_participations(
        &self,
        member_id: &str,
        page: PageRequest,
    ) -> Result<Page<ParticipationDetail>> {
        let now = Utc::now().naive_utc();
        let participations = self.repository.list_ended_page(member_id, now, page)?;
        self.attach_goals(participations)
    }

    fn list_participants_of_goal(&self, goal_id: i64, page: PageRequest) -> Result<Page<String>> {
        self.repository.list_member_ids_by_goal(goal_id, page)
    }

    fn count_participants(&self, goal_id: i64) -> Result<i64> {
        self.repository.count_by_goal(goal_id)
    }

    fn sweep_expired_as_of(&self, cutoff: NaiveDateTime) -> Result<Vec<Participation>> {
        self.repository.list_ending_after(cutoff)
    }
}
