//! Participation repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::sqlite::SqliteConnection;

use super::participations_model::{
    GoalRole, JoinGoalRequest, NewParticipation, Participation, ParticipationDetail,
    RejoinGoalRequest,
};
use crate::errors::Result;
use crate::paging::{Page, PageRequest};

/// Trait defining the contract for participation repository operations.
///
/// Reads come from pooled connections; single-row writes go through the
/// writer actor; the `*_in_tx` variants take a borrowed connection so the
/// lifecycle service can compose several steps into one transaction.
#[async_trait]
pub trait ParticipationRepositoryTrait: Send + Sync {
    /// Fetches by composite key. Fails with `ParticipationError::NotFound`.
    fn get(&self, member_id: &str, goal_id: i64) -> Result<Participation>;

    fn get_in_tx(
        &self,
        member_id: &str,
        goal_id: i64,
        conn: &mut SqliteConnection,
    ) -> Result<Participation>;

    /// Pure existence check on the composite key.
    fn exists(&self, member_id: &str, goal_id: i64) -> Result<bool>;

    /// Inserts a fresh row with `is_end = false` and `copy_count = 0`.
    /// A composite-key collision maps to `ParticipationError::AlreadyExists`.
    async fn insert(&self, new_participation: NewParticipation) -> Result<Participation>;

    fn insert_in_tx(
        &self,
        new_participation: NewParticipation,
        conn: &mut SqliteConnection,
    ) -> Result<Participation>;

    /// Atomically increments the referrer's `copy_count` by one.
    /// Fails with `ParticipationError::NotFound` when no row matches.
    fn increase_copy_count_in_tx(
        &self,
        member_id: &str,
        goal_id: i64,
        conn: &mut SqliteConnection,
    ) -> Result<()>;

    /// Persists the mutable fields of an existing row.
    fn save_in_tx(
        &self,
        participation: Participation,
        conn: &mut SqliteConnection,
    ) -> Result<Participation>;

    /// Rows with `end_dt` in the future and `is_end = false`, newest first.
    fn list_active_page(
        &self,
        member_id: &str,
        as_of: NaiveDateTime,
        page: PageRequest,
    ) -> Result<Page<Participation>>;

    /// Rows with `end_dt` passed or `is_end = true`, newest first.
    fn list_ended_page(
        &self,
        member_id: &str,
        as_of: NaiveDateTime,
        page: PageRequest,
    ) -> Result<Page<Participation>>;

    /// Member uids with any participation row for the goal.
    fn list_member_ids_by_goal(&self, goal_id: i64, page: PageRequest) -> Result<Page<String>>;

    /// Historical total of participation rows for the goal.
    fn count_by_goal(&self, goal_id: i64) -> Result<i64>;

    /// Rows whose `end_dt` is strictly after the cutoff. Read-only.
    fn list_ending_after(&self, cutoff: NaiveDateTime) -> Result<Vec<Participation>>;
}

/// Trait for the participation lifecycle service.
#[async_trait]
pub trait ParticipationServiceTrait: Send + Sync {
    /// Joins an existing goal: checks the goal is live, credits the
    /// referrer, bumps the goal's join counter, creates the participation
    /// row, and dispatches the seed to-dos - all in one transaction.
    async fn join_existing_goal(
        &self,
        member_id: &str,
        request: JoinGoalRequest,
    ) -> Result<Participation>;

    /// Whether a participation row exists for the pair. No side effects.
    fn has_existing_join(&self, member_id: &str, goal_id: i64) -> Result<bool>;

    /// Reactivates an ended participation: resets the termination flag,
    /// restarts the clock, and recomputes the deadline.
    async fn rejoin(
        &self,
        member_id: &str,
        goal_id: i64,
        request: RejoinGoalRequest,
    ) -> Result<Participation>;

    /// Marks the participation as ended by the member.
    async fn end_participation(&self, member_id: &str, goal_id: i64) -> Result<Participation>;

    /// Inserts a participation row directly with the given role. Used by
    /// goal-creation flows to seed the owner's own row.
    async fn add_participation(
        &self,
        member_id: &str,
        goal_id: i64,
        end_dt: NaiveDateTime,
        role: GoalRole,
    ) -> Result<Participation>;

    fn get_participation(&self, member_id: &str, goal_id: i64) -> Result<Participation>;

    fn get_role(&self, member_id: &str, goal_id: i64) -> Result<GoalRole>;

    fn list_active_participations(
        &self,
        member_id: &str,
        page: PageRequest,
    ) -> Result<Page<ParticipationDetail>>;

    fn list_ended_participations(
        &self,
        member_id: &str,
        page: PageRequest,
    ) -> Result<Page<ParticipationDetail>>;

    fn list_participants_of_goal(&self, goal_id: i64, page: PageRequest) -> Result<Page<String>>;

    fn count_participants(&self, goal_id: i64) -> Result<i64>;

    /// Participations whose `end_dt` is after the cutoff, for the external
    /// expiry sweep. Read-only; re-running with the same cutoff is safe.
    fn sweep_expired_as_of(&self, cutoff: NaiveDateTime) -> Result<Vec<Participation>>;
}
