//! Database connection management for the SQLite storage backend.
//!
//! Reads run on pooled connections; all plain writes are funneled through
//! a single writer actor (see [`write_actor`]), and composed multi-store
//! writes run through [`SqliteTransactionExecutor`].

mod write_actor;

pub use write_actor::{spawn_writer, WriteHandle};

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;
use std::sync::Arc;

use stride_core::db::DbTransactionExecutor;
use stride_core::errors::{Error, Result};

use crate::errors::StorageError;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Per-connection pragmas: foreign keys for the participation/goal
/// relationship, WAL plus a busy timeout so pooled readers and the writer
/// coexist.
#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(
            "PRAGMA busy_timeout = 5000; \
             PRAGMA journal_mode = WAL; \
             PRAGMA synchronous = NORMAL; \
             PRAGMA foreign_keys = ON;",
        )
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Creates the r2d2 connection pool for the given database path.
pub fn create_pool(db_path: &str) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .map_err(StorageError::PoolError)?;
    Ok(Arc::new(pool))
}

/// Checks a connection out of the pool.
pub fn get_connection(pool: &Arc<DbPool>) -> Result<DbConnection> {
    pool.get().map_err(|e| StorageError::PoolError(e).into())
}

/// Applies any pending embedded migrations.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;
    if !applied.is_empty() {
        info!("applied {} pending database migrations", applied.len());
    }
    Ok(())
}

/// Creates the pool, applies migrations, and spawns the writer actor.
/// Must be called from within a tokio runtime.
pub fn init(db_path: &str) -> Result<(Arc<DbPool>, WriteHandle)> {
    let pool = create_pool(db_path)?;
    {
        let mut conn = get_connection(&pool)?;
        run_migrations(&mut conn)?;
    }
    let writer = spawn_writer(pool.clone());
    Ok((pool, writer))
}

/// Transaction executor over a pooled connection.
///
/// Used by the participation lifecycle for writes that span several
/// repositories. Domain errors raised inside the closure come back typed:
/// `stride_core::Error` implements `From<diesel::result::Error>`, so the
/// transaction machinery never has to stringify them.
#[derive(Clone)]
pub struct SqliteTransactionExecutor {
    pool: Arc<DbPool>,
}

impl SqliteTransactionExecutor {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl DbTransactionExecutor for SqliteTransactionExecutor {
    fn execute<F, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut conn = get_connection(&self.pool)?;
        conn.immediate_transaction::<_, Error, _>(operation)
    }
}
