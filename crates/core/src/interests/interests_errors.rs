use thiserror::Error;

/// Errors raised by job interest lookups and follow operations.
#[derive(Error, Debug)]
pub enum InterestError {
    #[error("job interest {0} not found")]
    NotFound(i64),

    #[error("member {member_id} already follows job interest {interest_id}")]
    AlreadyFollowed { member_id: String, interest_id: i64 },
}
