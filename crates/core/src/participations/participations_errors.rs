use thiserror::Error;

/// Errors raised by participation lookups and lifecycle transitions.
#[derive(Error, Debug)]
pub enum ParticipationError {
    #[error("member {member_id} has no participation for goal {goal_id}")]
    NotFound { member_id: String, goal_id: i64 },

    #[error("member {member_id} already joined goal {goal_id}")]
    AlreadyExists { member_id: String, goal_id: i64 },

    /// A participation row references a goal row that no longer exists.
    /// This is a referential-integrity violation, not a normal not-found:
    /// participation rows must never outlive their goal.
    #[error("participation of member {member_id} references missing goal {goal_id}")]
    GoalMissing { member_id: String, goal_id: i64 },
}
