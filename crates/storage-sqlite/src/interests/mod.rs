//! SQLite storage implementation for job interests.

mod model;
mod repository;

pub use model::{JobInterestDB, MemberJobInterestDB, NewJobInterestDB};
pub use repository::JobInterestRepository;
