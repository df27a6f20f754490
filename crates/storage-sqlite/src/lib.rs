//! SQLite storage implementation for the Stride backend.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `stride-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the workspace where Diesel queries
//! exist; the core crate works with traits.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod goals;
pub mod interests;
pub mod participations;
pub mod todos;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    SqliteTransactionExecutor, WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from stride-core for convenience
pub use stride_core::errors::{DatabaseError, Error, Result};
