//! Tests for participation domain models and the status computation.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::str::FromStr;

use crate::participations::{
    effective_status, GoalRole, Participation, ParticipationStatus,
};

fn sample_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn sample_participation(end_dt: NaiveDateTime, is_end: bool) -> Participation {
    let now = sample_time();
    Participation {
        member_id: "u1".to_string(),
        goal_id: 1,
        role: GoalRole::Participant,
        start_dt: now,
        end_dt,
        is_end,
        copy_count: 0,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn status_is_active_while_deadline_ahead_and_not_flagged() {
    let now = sample_time();
    let participation = sample_participation(now + Duration::hours(2), false);
    assert_eq!(
        effective_status(&participation, now),
        ParticipationStatus::Active
    );
}

#[test]
fn status_is_ended_by_date_once_deadline_passes() {
    let now = sample_time();
    let participation = sample_participation(now - Duration::hours(1), false);
    assert_eq!(
        effective_status(&participation, now),
        ParticipationStatus::EndedByDate
    );
}

#[test]
fn deadline_exactly_at_now_counts_as_passed() {
    let now = sample_time();
    let participation = sample_participation(now, false);
    assert_eq!(
        effective_status(&participation, now),
        ParticipationStatus::EndedByDate
    );
}

#[test]
fn explicit_flag_wins_over_date_expiry() {
    let now = sample_time();
    // Flagged AND expired: the flag is what gets reported.
    let participation = sample_participation(now - Duration::hours(1), true);
    assert_eq!(
        effective_status(&participation, now),
        ParticipationStatus::EndedByFlag
    );

    let participation = sample_participation(now + Duration::hours(1), true);
    assert_eq!(
        effective_status(&participation, now),
        ParticipationStatus::EndedByFlag
    );
}

#[test]
fn goal_role_round_trips_through_str() {
    assert_eq!(GoalRole::Owner.as_str(), "OWNER");
    assert_eq!(GoalRole::Participant.as_str(), "PARTICIPANT");
    assert_eq!(GoalRole::from_str("OWNER").unwrap(), GoalRole::Owner);
    assert_eq!(
        GoalRole::from_str("PARTICIPANT").unwrap(),
        GoalRole::Participant
    );
    assert!(GoalRole::from_str("ADMIN").is_err());
}

#[test]
fn goal_role_serializes_screaming_snake_case() {
    assert_eq!(
        serde_json::to_string(&GoalRole::Participant).unwrap(),
        "\"PARTICIPANT\""
    );
    assert_eq!(
        serde_json::from_str::<GoalRole>("\"OWNER\"").unwrap(),
        GoalRole::Owner
    );
}
