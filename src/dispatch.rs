//! Running one database operation per request and reporting the outcome.

use crate::error::ApiError;
use crate::extract::ClientAddr;
use crate::pipe::PipeError;
use crate::session::{Session, SessionFactory, SessionFuture};
use strum_macros::{AsRefStr, Display};

/// Name under which a handler shows up in the logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum Operation {
    ListProducts,
    FetchProduct,
    AppendProduct,
}

/// Run `block` in its own session and log how it went.
///
/// Database failures become [`ApiError::Persistence`] (HTTP 500).
pub async fn dispatch<T, F>(
    operation: Operation,
    client: &ClientAddr,
    sessions: &SessionFactory,
    block: F,
) -> Result<T, ApiError>
where
    F: for<'s> FnOnce(&'s Session) -> SessionFuture<'s, T> + Send,
    T: Send,
{
    match sessions.with_session(block).await {
        Ok(value) => {
            tracing::info!(%operation, %client, "Served {} request from {}", operation, client);
            Ok(value)
        }
        Err(err) => {
            tracing::error!(
                %operation,
                %client,
                error = %err,
                "Failed to serve {} request from {}",
                operation,
                client
            );
            Err(ApiError::Persistence(err))
        }
    }
}

/// Log a rejected input and turn it into a 400.
pub fn reject(operation: Operation, client: &ClientAddr, err: PipeError) -> ApiError {
    tracing::warn!(%operation, %client, error = %err, "Could not extract values");
    ApiError::Validation(err)
}
