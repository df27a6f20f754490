//! Single-writer actor for the SQLite database.
//!
//! SQLite allows one writer at a time; funneling every plain write through
//! one dedicated connection serializes them without lock contention. Each
//! job runs inside an immediate transaction.

use diesel::SqliteConnection;
use std::any::Any;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use stride_core::errors::{Error, Result};

use super::DbPool;

// Jobs are type-erased through `Box<dyn Any>` so one channel can carry
// writes with different result types.
type ErasedResult = Box<dyn Any + Send + 'static>;
type WriteJob = Box<dyn FnOnce(&mut SqliteConnection) -> Result<ErasedResult> + Send + 'static>;
type WriteReply = oneshot::Sender<Result<ErasedResult>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(WriteJob, WriteReply)>,
}

impl WriteHandle {
    /// Executes a database job on the writer's dedicated connection and
    /// waits for its result.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |conn| job(conn).map(|value| Box::new(value) as ErasedResult)),
                reply_tx,
            ))
            .await
            .map_err(|_| Error::Unexpected("database writer is no longer running".to_string()))?;

        let result = reply_rx
            .await
            .map_err(|_| Error::Unexpected("database writer dropped the reply".to_string()))?;

        result.map(|boxed| {
            *boxed
                .downcast::<T>()
                .unwrap_or_else(|_| panic!("writer job returned an unexpected type"))
        })
    }
}

/// Spawns the background task that owns one connection from the pool and
/// processes write jobs serially, one immediate transaction per job.
pub fn spawn_writer(pool: Arc<DbPool>) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(WriteJob, WriteReply)>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("no connection available for the database writer");

        while let Some((job, reply_tx)) = rx.recv().await {
            // Domain errors pass through typed; the transaction machinery
            // only needs Error: From<diesel::result::Error> for its own
            // begin/commit failures.
            let result = conn.immediate_transaction::<_, Error, _>(|c| job(c));

            // The requester may have been cancelled; nothing to do then.
            let _ = reply_tx.send(result);
        }
        // Channel closed: every WriteHandle is gone, the actor stops.
    });

    WriteHandle { tx }
}
