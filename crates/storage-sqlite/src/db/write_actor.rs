use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use log::error;
use moneyboard_core::errors::{DatabaseError, Error, Result};
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type AnyResult = Result<Box<dyn Any + Send + 'static>>;
type Envelope = (Job<Box<dyn Any + Send + 'static>>, oneshot::Sender<AnyResult>);

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<Envelope>,
}

fn writer_gone() -> Error {
    Error::Database(DatabaseError::Internal(
        "Database writer is no longer running".to_string(),
    ))
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// Every job runs inside its own `IMMEDIATE` transaction, so jobs never
    /// interleave. A job that returns an error is rolled back and the error
    /// reaches the caller unchanged.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_gone())?;

        let boxed = ret_rx.await.map_err(|_| writer_gone())??;
        boxed.downcast::<T>().map(|v| *v).map_err(|_| {
            Error::Unexpected("Writer actor returned a value of the wrong type".to_string())
        })
    }
}

/// Spawns a background Tokio task that acts as a single writer to the database.
/// This actor owns one database connection from the pool and processes write jobs serially.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<Envelope>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                error!("Writer actor could not acquire a connection: {}", e);
                while let Some((_, reply_tx)) = rx.recv().await {
                    let _ = reply_tx.send(Err(Error::Database(
                        DatabaseError::ConnectionFailed(e.to_string()),
                    )));
                }
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: AnyResult = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            // The caller may have gone away (timeout, cancelled request).
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
