use thiserror::Error;

/// Errors raised by goal lookups and lifecycle checks.
#[derive(Error, Debug)]
pub enum GoalError {
    #[error("goal {0} not found")]
    NotFound(i64),

    /// The goal no longer accepts joins, either because its owner ended it
    /// or because its fixed end date has passed.
    #[error("goal {0} is terminated")]
    Terminated(i64),
}
