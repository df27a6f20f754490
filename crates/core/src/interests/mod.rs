//! Job interests module - the job-group/interest hierarchy members follow
//! for content personalization.

mod interests_errors;
mod interests_model;
mod interests_service;
mod interests_traits;

#[cfg(test)]
mod interests_service_tests;

pub use interests_errors::InterestError;
pub use interests_model::{JobInterest, JobInterestType, MemberJobInterest};
pub use interests_service::JobInterestService;
pub use interests_traits::{JobInterestRepositoryTrait, JobInterestServiceTrait};
