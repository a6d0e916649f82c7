use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use investment_goals_core::errors::{Error, Result};
use log::debug;
use tokio::sync::{mpsc, oneshot};

// A queued write. The closure carries its own reply channel, so the actor
// never needs to know the job's result type.
type Job = Box<dyn FnOnce(&mut SqliteConnection) + Send + 'static>;

// Senders wait once this many jobs are queued.
const WRITE_QUEUE_CAPACITY: usize = 1024;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<Job>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// The job runs inside an immediate transaction; returning an error rolls
    /// it back. Errors raised by the job reach the caller unchanged.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        let wrapped: Job = Box::new(move |conn| {
            let result = conn
                .immediate_transaction::<T, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);
            // The caller may have gone away (request timeout); nothing to do then.
            let _ = ret_tx.send(result);
        });

        self.tx
            .send(wrapped)
            .await
            .map_err(|_| Error::from(StorageError::WriterStopped))?;

        ret_rx
            .await
            .map_err(|_| Error::from(StorageError::WriterStopped))?
    }
}

/// Spawns the single writer for the database.
///
/// The actor owns one pooled connection for its whole lifetime and runs jobs
/// one at a time on a blocking thread. It stops once every `WriteHandle` has
/// been dropped.
pub fn spawn_writer(pool: DbPool) -> Result<WriteHandle> {
    let mut conn = pool.get().map_err(StorageError::from)?;
    let (tx, mut rx) = mpsc::channel::<Job>(WRITE_QUEUE_CAPACITY);

    tokio::task::spawn_blocking(move || {
        while let Some(job) = rx.blocking_recv() {
            job(&mut *conn);
        }
        debug!("Database writer stopped");
    });

    Ok(WriteHandle { tx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, get_connection, run_migrations};
    use diesel::connection::SimpleConnection;
    use diesel::RunQueryDsl;
    use investment_goals_core::errors::ValidationErrors;
    use tempfile::tempdir;

    #[derive(diesel::QueryableByName)]
    struct Count {
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        n: i64,
    }

    fn count_rows(pool: &DbPool) -> i64 {
        let mut conn = get_connection(pool).unwrap();
        diesel::sql_query("SELECT COUNT(*) AS n FROM investment_goals")
            .get_result::<Count>(&mut conn)
            .unwrap()
            .n
    }

    #[tokio::test]
    async fn test_failed_job_rolls_back_and_keeps_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("writer.db");
        let pool = create_pool(path.to_str().unwrap()).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer((*pool).clone()).unwrap();

        let result: Result<()> = writer
            .exec(|conn| {
                conn.batch_execute(
                    "INSERT INTO investment_goals (name, months, amount, amount_per_month) \
                     VALUES ('Car', '[\"maio\"]', '10', '10')",
                )
                .map_err(StorageError::from)?;
                Err(ValidationErrors::single("name", "rejected").into())
            })
            .await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(count_rows(&pool), 0);
    }

    #[tokio::test]
    async fn test_jobs_return_their_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("writer.db");
        let pool = create_pool(path.to_str().unwrap()).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer((*pool).clone()).unwrap();

        let inserted = writer
            .exec(|conn| {
                diesel::sql_query(
                    "INSERT INTO investment_goals (name, months, amount, amount_per_month) \
                     VALUES ('Car', '[\"maio\"]', '10', '10')",
                )
                .execute(conn)
                .map_err(|e| StorageError::from(e).into())
            })
            .await
            .unwrap();

        assert_eq!(inserted, 1);
        assert_eq!(count_rows(&pool), 1);
    }
}
