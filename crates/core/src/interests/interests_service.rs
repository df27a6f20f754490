use log::debug;
use std::sync::Arc;

use super::interests_errors::InterestError;
use super::interests_model::{JobInterest, JobInterestType, MemberJobInterest};
use super::interests_traits::{JobInterestRepositoryTrait, JobInterestServiceTrait};
use crate::errors::{Result, ValidationError};

/// Service for the job interest hierarchy and member follow edges.
pub struct JobInterestService {
    repository: Arc<dyn JobInterestRepositoryTrait>,
}

impl JobInterestService {
    pub fn new(repository: Arc<dyn JobInterestRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl JobInterestServiceTrait for JobInterestService {
    fn get_interest(&self, interest_id: i64) -> Result<JobInterest> {
        self.repository.get_by_id(interest_id)
    }

    fn list_job_groups(&self) -> Result<Vec<JobInterest>> {
        self.repository.list_by_type(JobInterestType::JobGroup)
    }

    fn list_by_job_group(&self, job_group_id: i64) -> Result<Vec<JobInterest>> {
        self.repository.list_by_job_group(job_group_id)
    }

    async fn add_job_group(&self, name: String) -> Result<JobInterest> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        self.repository
            .insert(name, JobInterestType::JobGroup, None)
            .await
    }

    async fn add_job_interest(&self, job_group_id: i64, name: String) -> Result<JobInterest> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        let parent = self.repository.get_by_id(job_group_id)?;
        if parent.interest_type != JobInterestType::JobGroup {
            return Err(ValidationError::InvalidInput(format!(
                "job interest {} is not a job group",
                job_group_id
            ))
            .into());
        }
        self.repository
            .insert(name, JobInterestType::JobInterest, Some(parent.id))
            .await
    }

    fn is_following(&self, member_id: &str, interest_id: i64) -> Result<bool> {
        self.repository.exists_follow(member_id, interest_id)
    }

    async fn follow(&self, member_id: &str, interest_id: i64) -> Result<MemberJobInterest> {
        // The lookup doubles as the existence check.
        let interest = self.repository.get_by_id(interest_id)?;
        if self.repository.exists_follow(member_id, interest.id)? {
            return Err(InterestError::AlreadyFollowed {
                member_id: member_id.to_string(),
                interest_id: interest.id,
            }
            .into());
        }
        self.repository
            .insert_follow(member_id.to_string(), interest.id)
            .await
    }

    async fn unfollow(&self, member_id: &str, interest_id: i64) -> Result<()> {
        self.repository
            .delete_follow(member_id.to_string(), interest_id)
            .await?;
        Ok(())
    }

    async fn follow_all(&self, member_id: &str, interest_ids: Vec<i64>) -> Result<usize> {
        let mut added = 0;
        for interest_id in interest_ids {
            if self.repository.exists_follow(member_id, interest_id)? {
                continue;
            }
            self.repository
                .insert_follow(member_id.to_string(), interest_id)
                .await?;
            added += 1;
        }
        debug!("member {} followed {} interests", member_id, added);
        Ok(added)
    }

    async fn unfollow_all(&self, member_id: &str, interest_ids: Vec<i64>) -> Result<usize> {
        let mut removed = 0;
        for interest_id in interest_ids {
            removed += self
                .repository
                .delete_follow(member_id.to_string(), interest_id)
                .await?;
        }
        Ok(removed)
    }

    fn list_followed_groups(&self, member_id: &str) -> Result<Vec<JobInterest>> {
        self.repository.list_followed_groups(member_id)
    }

    fn list_followed_by_group(
        &self,
        member_id: &str,
        job_group_id: i64,
    ) -> Result<Vec<JobInterest>> {
        self.repository.list_followed_by_group(member_id, job_group_id)
    }
}
