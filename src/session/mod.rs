//! Scoped database sessions
//!
//! A [`Session`] wraps one SeaORM transaction and lives for exactly one
//! logical operation. It is released on every exit path:
//!
//! ```text
//! open ──► operation ──► Ok  ──► flush   (commit)
//!                   └──► Err ──► discard (rollback)
//! dropped while open (request cancelled, panic) ──► rollback on drop
//! ```
//!
//! [`SessionFactory::with_session`] runs the whole sequence; handlers normally
//! go through [`crate::dispatch::dispatch`] which adds logging on top.

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use std::future::Future;
use std::pin::Pin;

/// Future returned by a session-scoped operation. It may borrow the session.
pub type SessionFuture<'s, T> = Pin<Box<dyn Future<Output = Result<T, DbErr>> + Send + 's>>;

/// Hands out scoped sessions over a shared connection pool.
///
/// Built once at startup and passed to handlers through router state.
#[derive(Clone)]
pub struct SessionFactory {
    conn: DatabaseConnection,
}

impl SessionFactory {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Acquire a session. The caller must end it with [`Session::flush`] or
    /// [`Session::discard`]; dropping it rolls back.
    pub async fn open(&self) -> Result<Session, DbErr> {
        tracing::debug!("Session: opening");
        let txn = self.conn.begin().await?;
        Ok(Session { txn })
    }

    /// Run `operation` inside a fresh session.
    ///
    /// The session is flushed when the operation succeeds and discarded when
    /// it fails. A flush failure is reported as the operation's error.
    pub async fn with_session<T, F>(&self, operation: F) -> Result<T, DbErr>
    where
        F: for<'s> FnOnce(&'s Session) -> SessionFuture<'s, T> + Send,
        T: Send,
    {
        let session = self.open().await?;
        let outcome = operation(&session).await;

        match outcome {
            Ok(value) => {
                session.flush().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = session.discard().await {
                    tracing::warn!(error = %rollback_err, "Session: rollback failed");
                }
                Err(err)
            }
        }
    }
}

/// One database session, backed by a single transaction.
pub struct Session {
    txn: DatabaseTransaction,
}

impl Session {
    /// Connection to run statements on. Statements are only visible to
    /// other sessions after [`Session::flush`].
    pub fn connection(&self) -> &DatabaseTransaction {
        &self.txn
    }

    /// Force pending writes to the database and end the session.
    pub async fn flush(self) -> Result<(), DbErr> {
        tracing::debug!("Session: flushing");
        self.txn.commit().await
    }

    /// Throw away everything done in this session.
    pub async fn discard(self) -> Result<(), DbErr> {
        tracing::debug!("Session: discarding");
        self.txn.rollback().await
    }
}
