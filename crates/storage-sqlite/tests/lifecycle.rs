//! End-to-end tests for the SQLite repositories wired through the real
//! services, against a temporary database file.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tempfile::TempDir;

use stride_core::errors::Error;
use stride_core::goals::{GoalError, GoalRepositoryTrait, GoalService, GoalServiceTrait, NewGoal};
use stride_core::interests::{InterestError, JobInterestService, JobInterestServiceTrait};
use stride_core::paging::PageRequest;
use stride_core::participations::{
    GoalRole, JoinGoalRequest, ParticipationError, ParticipationService,
    ParticipationServiceTrait, RejoinGoalRequest,
};
use stride_core::todos::{NewTodoItem, TodoRepositoryTrait, TodoService, TodoServiceTrait};

use stride_storage_sqlite::goals::GoalRepository;
use stride_storage_sqlite::interests::JobInterestRepository;
use stride_storage_sqlite::participations::ParticipationRepository;
use stride_storage_sqlite::todos::TodoRepository;
use stride_storage_sqlite::{init, SqliteTransactionExecutor};

struct TestBackend {
    // Keeps the database file alive for the duration of the test.
    _dir: TempDir,
    goal_service: GoalService,
    participation_service: ParticipationService<SqliteTransactionExecutor>,
    todo_service: TodoService,
    interest_service: JobInterestService,
}

fn backend() -> TestBackend {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("stride.db");
    let (pool, writer) = init(db_path.to_str().unwrap()).unwrap();

    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let participation_repository =
        Arc::new(ParticipationRepository::new(pool.clone(), writer.clone()));
    let todo_repository = Arc::new(TodoRepository::new(pool.clone(), writer.clone()));
    let interest_repository = Arc::new(JobInterestRepository::new(pool.clone(), writer));

    TestBackend {
        _dir: dir,
        goal_service: GoalService::new(goal_repository.clone() as Arc<dyn GoalRepositoryTrait>),
        participation_service: ParticipationService::new(
            participation_repository,
            goal_repository,
            todo_repository.clone() as Arc<dyn TodoRepositoryTrait>,
            SqliteTransactionExecutor::new(pool),
        ),
        todo_service: TodoService::new(todo_repository),
        interest_service: JobInterestService::new(interest_repository),
    }
}

fn fixed_goal(hours_ahead: i64) -> NewGoal {
    let now = Utc::now().naive_utc();
    NewGoal {
        title: "learn rust".to_string(),
        description: Some("one chapter a day".to_string()),
        is_date_fixed: true,
        start_dt: now,
        end_dt: now + Duration::hours(hours_ahead),
    }
}

fn flexible_goal() -> NewGoal {
    NewGoal {
        is_date_fixed: false,
        ..fixed_goal(24 * 30)
    }
}

#[tokio::test]
async fn join_lifecycle_roundtrip() {
    let backend = backend();

    let goal = backend.goal_service.create_goal(fixed_goal(2)).await.unwrap();
    assert_eq!(goal.join_count, 0);
    assert!(!goal.is_end);

    // First join seeds todos and bumps the counter.
    let created = backend
        .participation_service
        .join_existing_goal(
            "u1",
            JoinGoalRequest {
                goal_id: goal.id,
                end_dt: None,
                referrer_uid: None,
                todos: vec![
                    NewTodoItem {
                        content: "install the toolchain".to_string(),
                        sort_order: 0,
                    },
                    NewTodoItem {
                        content: "read chapter 1".to_string(),
                        sort_order: 1,
                    },
                ],
            },
        )
        .await
        .unwrap();

    assert_eq!(created.role, GoalRole::Participant);
    assert_eq!(created.end_dt, goal.end_dt);
    assert!(!created.is_end);

    let stored_goal = backend.goal_service.get_goal(goal.id).unwrap();
    assert_eq!(stored_goal.join_count, 1);

    let todos = backend
        .todo_service
        .get_todo_page("u1", goal.id, PageRequest::default())
        .unwrap();
    assert_eq!(todos.total_elements, 2);
    assert_eq!(todos.content[0].content, "install the toolchain");

    // The composite key rejects a duplicate join.
    assert!(backend
        .participation_service
        .has_existing_join("u1", goal.id)
        .unwrap());
    let err = backend
        .participation_service
        .join_existing_goal(
            "u1",
            JoinGoalRequest {
                goal_id: goal.id,
                end_dt: None,
                referrer_uid: None,
                todos: Vec::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Participation(ParticipationError::AlreadyExists { .. })
    ));
    // The failed attempt rolled back its counter increment.
    assert_eq!(backend.goal_service.get_goal(goal.id).unwrap().join_count, 1);

    // A second member joins citing the first as referrer.
    backend
        .participation_service
        .join_existing_goal(
            "u2",
            JoinGoalRequest {
                goal_id: goal.id,
                end_dt: None,
                referrer_uid: Some("u1".to_string()),
                todos: Vec::new(),
            },
        )
        .await
        .unwrap();

    let referrer = backend
        .participation_service
        .get_participation("u1", goal.id)
        .unwrap();
    assert_eq!(referrer.copy_count, 1);
    assert_eq!(backend.goal_service.get_goal(goal.id).unwrap().join_count, 2);

    // Participant listings count ended rows too.
    let members = backend
        .participation_service
        .list_participants_of_goal(goal.id, PageRequest::default())
        .unwrap();
    assert_eq!(members.total_elements, 2);
    assert_eq!(
        backend
            .participation_service
            .count_participants(goal.id)
            .unwrap(),
        2
    );

    // u2 gives up, then comes back.
    let ended = backend
        .participation_service
        .end_participation("u2", goal.id)
        .await
        .unwrap();
    assert!(ended.is_end);

    let ended_page = backend
        .participation_service
        .list_ended_participations("u2", PageRequest::default())
        .unwrap();
    assert_eq!(ended_page.total_elements, 1);
    assert_eq!(ended_page.content[0].goal.id, goal.id);

    let rejoined = backend
        .participation_service
        .rejoin("u2", goal.id, RejoinGoalRequest { end_dt: None })
        .await
        .unwrap();
    assert!(!rejoined.is_end);
    assert_eq!(rejoined.end_dt, stored_goal.end_dt);

    let active_page = backend
        .participation_service
        .list_active_participations("u2", PageRequest::default())
        .unwrap();
    assert_eq!(active_page.total_elements, 1);

    // Rejoining did not touch the historical join counter.
    assert_eq!(backend.goal_service.get_goal(goal.id).unwrap().join_count, 2);

    // The sweep sees both rows: their deadlines are after yesterday.
    let cutoff = Utc::now().naive_utc() - Duration::days(1);
    let swept = backend
        .participation_service
        .sweep_expired_as_of(cutoff)
        .unwrap();
    assert_eq!(swept.len(), 2);
}

#[tokio::test]
async fn join_validations_against_real_store() {
    let backend = backend();

    // Unknown goal.
    let err = backend
        .participation_service
        .join_existing_goal(
            "u1",
            JoinGoalRequest {
                goal_id: 4242,
                end_dt: None,
                referrer_uid: None,
                todos: Vec::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Goal(GoalError::NotFound(4242))));

    // Flexible goals demand a caller-picked future deadline.
    let goal = backend
        .goal_service
        .create_goal(flexible_goal())
        .await
        .unwrap();
    let err = backend
        .participation_service
        .join_existing_goal(
            "u1",
            JoinGoalRequest {
                goal_id: goal.id,
                end_dt: None,
                referrer_uid: None,
                todos: Vec::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let wanted = Utc::now().naive_utc() + Duration::days(14);
    let created = backend
        .participation_service
        .join_existing_goal(
            "u1",
            JoinGoalRequest {
                goal_id: goal.id,
                end_dt: Some(wanted),
                referrer_uid: None,
                todos: Vec::new(),
            },
        )
        .await
        .unwrap();
    assert_eq!(created.end_dt, wanted);

    // A missing referrer aborts the join without moving the counter.
    let err = backend
        .participation_service
        .join_existing_goal(
            "u2",
            JoinGoalRequest {
                goal_id: goal.id,
                end_dt: Some(wanted),
                referrer_uid: Some("ghost".to_string()),
                todos: Vec::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Participation(ParticipationError::NotFound { .. })
    ));
    assert_eq!(backend.goal_service.get_goal(goal.id).unwrap().join_count, 1);
    assert!(!backend
        .participation_service
        .has_existing_join("u2", goal.id)
        .unwrap());
}

#[tokio::test]
async fn job_interest_follow_roundtrip() {
    let backend = backend();

    let group = backend
        .interest_service
        .add_job_group("Engineering".to_string())
        .await
        .unwrap();
    let backend_interest = backend
        .interest_service
        .add_job_interest(group.id, "Backend".to_string())
        .await
        .unwrap();
    let frontend_interest = backend
        .interest_service
        .add_job_interest(group.id, "Frontend".to_string())
        .await
        .unwrap();

    let groups = backend.interest_service.list_job_groups().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(
        backend
            .interest_service
            .list_by_job_group(group.id)
            .unwrap()
            .len(),
        2
    );

    let added = backend
        .interest_service
        .follow_all("u1", vec![backend_interest.id, frontend_interest.id])
        .await
        .unwrap();
    assert_eq!(added, 2);

    // Following the same interest twice is rejected.
    let err = backend
        .interest_service
        .follow("u1", backend_interest.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Interest(InterestError::AlreadyFollowed { .. })
    ));

    let followed_groups = backend.interest_service.list_followed_groups("u1").unwrap();
    assert_eq!(followed_groups.len(), 1);
    assert_eq!(followed_groups[0].id, group.id);

    let followed = backend
        .interest_service
        .list_followed_by_group("u1", group.id)
        .unwrap();
    assert_eq!(followed.len(), 2);

    backend
        .interest_service
        .unfollow("u1", backend_interest.id)
        .await
        .unwrap();
    assert!(!backend
        .interest_service
        .is_following("u1", backend_interest.id)
        .unwrap());
}
