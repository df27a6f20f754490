#[cfg(test)]
mod tests {
    use crate::errors::{Error, Result};
    use crate::interests::{
        InterestError, JobInterest, JobInterestRepositoryTrait, JobInterestService,
        JobInterestServiceTrait, JobInterestType, MemberJobInterest,
    };
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MockJobInterestRepository {
        interests: Arc<Mutex<HashMap<i64, JobInterest>>>,
        follows: Arc<Mutex<Vec<MemberJobInterest>>>,
        next_id: Arc<Mutex<i64>>,
    }

    impl MockJobInterestRepository {
        fn add_interest(&self, interest: JobInterest) {
            self.interests
                .lock()
                .unwrap()
                .insert(interest.id, interest);
        }

        fn follow_count(&self) -> usize {
            self.follows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl JobInterestRepositoryTrait for MockJobInterestRepository {
        fn get_by_id(&self, interest_id: i64) -> Result<JobInterest> {
            self.interests
                .lock()
                .unwrap()
                .get(&interest_id)
                .cloned()
                .ok_or_else(|| InterestError::NotFound(interest_id).into())
        }

        fn list_by_type(&self, interest_type: JobInterestType) -> Result<Vec<JobInterest>> {
            Ok(self
                .interests
                .lock()
                .unwrap()
                .values()
                .filter(|i| i.interest_type == interest_type)
                .cloned()
                .collect())
        }

        fn list_by_job_group(&self, job_group_id: i64) -> Result<Vec<JobInterest>> {
            Ok(self
                .interests
                .lock()
                .unwrap()
                .values()
                .filter(|i| i.job_group_id == Some(job_group_id))
                .cloned()
                .collect())
        }

        async fn insert(
            &self,
            name: String,
            interest_type: JobInterestType,
            job_group_id: Option<i64>,
        ) -> Result<JobInterest> {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let interest = JobInterest {
                id: *next_id,
                name,
                interest_type,
                job_group_id,
            };
            self.add_interest(interest.clone());
            Ok(interest)
        }

        fn exists_follow(&self, member_id: &str, interest_id: i64) -> Result<bool> {
            Ok(self
                .follows
                .lock()
                .unwrap()
                .iter()
                .any(|f| f.member_id == member_id && f.job_interest_id == interest_id))
        }

        async fn insert_follow(
            &self,
            member_id: String,
            interest_id: i64,
        ) -> Result<MemberJobInterest> {
            let follow = MemberJobInterest {
                member_id,
                job_interest_id: interest_id,
                created_at: Utc::now().naive_utc(),
            };
            self.follows.lock().unwrap().push(follow.clone());
            Ok(follow)
        }

        async fn delete_follow(&self, member_id: String, interest_id: i64) -> Result<usize> {
            let mut follows = self.follows.lock().unwrap();
            let before = follows.len();
            follows.retain(|f| !(f.member_id == member_id && f.job_interest_id == interest_id));
            Ok(before - follows.len())
        }

        fn list_followed_groups(&self, member_id: &str) -> Result<Vec<JobInterest>> {
            let interests = self.interests.lock().unwrap();
            let mut groups: Vec<JobInterest> = self
                .follows
                .lock()
                .unwrap()
                .iter()
                .filter(|f| f.member_id == member_id)
                .filter_map(|f| interests.get(&f.job_interest_id))
                .filter_map(|i| match i.interest_type {
                    JobInterestType::JobGroup => Some(i.clone()),
                    JobInterestType::JobInterest => {
                        i.job_group_id.and_then(|gid| interests.get(&gid).cloned())
                    }
                })
                .collect();
            groups.sort_by_key(|g| g.id);
            groups.dedup_by_key(|g| g.id);
            Ok(groups)
        }

        fn list_followed_by_group(
            &self,
            member_id: &str,
            job_group_id: i64,
        ) -> Result<Vec<JobInterest>> {
            let interests = self.interests.lock().unwrap();
            Ok(self
                .follows
                .lock()
                .unwrap()
                .iter()
                .filter(|f| f.member_id == member_id)
                .filter_map(|f| interests.get(&f.job_interest_id))
                .filter(|i| i.job_group_id == Some(job_group_id))
                .cloned()
                .collect())
        }
    }

    fn fixture() -> (MockJobInterestRepository, JobInterestService) {
        let repository = MockJobInterestRepository::default();
        let service = JobInterestService::new(Arc::new(repository.clone()));
        (repository, service)
    }

    fn group(id: i64, name: &str) -> JobInterest {
        JobInterest {
            id,
            name: name.to_string(),
            interest_type: JobInterestType::JobGroup,
            job_group_id: None,
        }
    }

    fn interest(id: i64, name: &str, group_id: i64) -> JobInterest {
        JobInterest {
            id,
            name: name.to_string(),
            interest_type: JobInterestType::JobInterest,
            job_group_id: Some(group_id),
        }
    }

    #[tokio::test]
    async fn add_job_interest_requires_group_parent() {
        let (repository, service) = fixture();
        repository.add_interest(group(1, "Engineering"));
        repository.add_interest(interest(2, "Backend", 1));

        let created = service
            .add_job_interest(1, "Frontend".to_string())
            .await
            .unwrap();
        assert_eq!(created.job_group_id, Some(1));
        assert_eq!(created.interest_type, JobInterestType::JobInterest);

        // A concrete interest cannot be a parent.
        let err = service
            .add_job_interest(2, "Nested".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = service
            .add_job_interest(99, "Orphan".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Interest(InterestError::NotFound(99))));
    }

    #[tokio::test]
    async fn follow_rejects_duplicates() {
        let (repository, service) = fixture();
        repository.add_interest(group(1, "Engineering"));

        service.follow("u1", 1).await.unwrap();
        assert!(service.is_following("u1", 1).unwrap());

        let err = service.follow("u1", 1).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Interest(InterestError::AlreadyFollowed { .. })
        ));
        assert_eq!(repository.follow_count(), 1);
    }

    #[tokio::test]
    async fn follow_unknown_interest_fails() {
        let (_, service) = fixture();
        let err = service.follow("u1", 7).await.unwrap_err();
        assert!(matches!(err, Error::Interest(InterestError::NotFound(7))));
    }

    #[tokio::test]
    async fn follow_all_skips_already_followed() {
        let (repository, service) = fixture();
        repository.add_interest(group(1, "Engineering"));
        repository.add_interest(interest(2, "Backend", 1));
        repository.add_interest(interest(3, "Frontend", 1));
        service.follow("u1", 2).await.unwrap();

        let added = service.follow_all("u1", vec![1, 2, 3]).await.unwrap();
        assert_eq!(added, 2);
        assert_eq!(repository.follow_count(), 3);

        let removed = service.unfollow_all("u1", vec![1, 2, 3, 4]).await.unwrap();
        assert_eq!(removed, 3);
        assert_eq!(repository.follow_count(), 0);
    }

    #[tokio::test]
    async fn followed_groups_collapse_to_distinct_parents() {
        let (repository, service) = fixture();
        repository.add_interest(group(1, "Engineering"));
        repository.add_interest(interest(2, "Backend", 1));
        repository.add_interest(interest(3, "Frontend", 1));
        service.follow_all("u1", vec![2, 3]).await.unwrap();

        let groups = service.list_followed_groups("u1").unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, 1);

        let followed = service.list_followed_by_group("u1", 1).unwrap();
        assert_eq!(followed.len(), 2);
    }
}
