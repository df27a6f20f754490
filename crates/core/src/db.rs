//! Transaction executor seam between services and the storage layer.

use diesel::sqlite::SqliteConnection;

use crate::errors::Result;

/// Executes a closure within a single database transaction.
///
/// Services that touch more than one store in one logical operation (the
/// participation lifecycle flows) run the whole operation through this
/// trait so that either every mutation commits or none does. The storage
/// crate provides the concrete implementation; tests substitute their own.
pub trait DbTransactionExecutor: Send + Sync + Clone + 'static {
    fn execute<F, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static;
}
