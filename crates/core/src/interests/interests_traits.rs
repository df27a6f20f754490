//! Job interest repository and service traits.

use async_trait::async_trait;

use super::interests_model::{JobInterest, JobInterestType, MemberJobInterest};
use crate::errors::Result;

/// Trait defining the contract for job interest repository operations.
#[async_trait]
pub trait JobInterestRepositoryTrait: Send + Sync {
    /// Fails with `InterestError::NotFound`.
    fn get_by_id(&self, interest_id: i64) -> Result<JobInterest>;

    fn list_by_type(&self, interest_type: JobInterestType) -> Result<Vec<JobInterest>>;

    fn list_by_job_group(&self, job_group_id: i64) -> Result<Vec<JobInterest>>;

    async fn insert(
        &self,
        name: String,
        interest_type: JobInterestType,
        job_group_id: Option<i64>,
    ) -> Result<JobInterest>;

    fn exists_follow(&self, member_id: &str, interest_id: i64) -> Result<bool>;

    /// A duplicate follow maps to `InterestError::AlreadyFollowed`.
    async fn insert_follow(&self, member_id: String, interest_id: i64)
        -> Result<MemberJobInterest>;

    /// Returns the number of deleted rows (0 or 1).
    async fn delete_follow(&self, member_id: String, interest_id: i64) -> Result<usize>;

    /// Distinct job groups under which the member follows something,
    /// including directly followed groups.
    fn list_followed_groups(&self, member_id: &str) -> Result<Vec<JobInterest>>;

    fn list_followed_by_group(&self, member_id: &str, job_group_id: i64)
        -> Result<Vec<JobInterest>>;
}

/// Trait for job interest service operations.
#[async_trait]
pub trait JobInterestServiceTrait: Send + Sync {
    fn get_interest(&self, interest_id: i64) -> Result<JobInterest>;

    fn list_job_groups(&self) -> Result<Vec<JobInterest>>;

    fn list_by_job_group(&self, job_group_id: i64) -> Result<Vec<JobInterest>>;

    async fn add_job_group(&self, name: String) -> Result<JobInterest>;

    /// Adds a concrete interest under an existing job group.
    async fn add_job_interest(&self, job_group_id: i64, name: String) -> Result<JobInterest>;

    fn is_following(&self, member_id: &str, interest_id: i64) -> Result<bool>;

    async fn follow(&self, member_id: &str, interest_id: i64) -> Result<MemberJobInterest>;

    async fn unfollow(&self, member_id: &str, interest_id: i64) -> Result<()>;

    /// Follows every id not yet followed; returns how many were added.
    async fn follow_all(&self, member_id: &str, interest_ids: Vec<i64>) -> Result<usize>;

    /// Unfollows every id; returns how many rows were removed.
    async fn unfollow_all(&self, member_id: &str, interest_ids: Vec<i64>) -> Result<usize>;

    fn list_followed_groups(&self, member_id: &str) -> Result<Vec<JobInterest>>;

    fn list_followed_by_group(&self, member_id: &str, job_group_id: i64)
        -> Result<Vec<JobInterest>>;
}
