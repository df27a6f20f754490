//! Participations module - the goal participation lifecycle.
//!
//! A participation is one member's relationship to one goal, keyed by the
//! (member uid, goal id) pair. The service in this module is the only
//! component that mutates participation state and goal counters.

mod participations_errors;
mod participations_model;
mod participations_service;
mod participations_traits;

#[cfg(test)]
mod participations_model_tests;

pub use participations_errors::ParticipationError;
pub use participations_model::{
    effective_status, GoalRole, JoinGoalRequest, NewParticipation, Participation,
    ParticipationDetail, ParticipationStatus, RejoinGoalRequest,
};
pub use participations_service::ParticipationService;
pub use participations_traits::{ParticipationRepositoryTrait, ParticipationServiceTrait};
