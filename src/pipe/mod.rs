use async_trait::async_trait;

pub mod builtins;

pub type PipeResult<T> = Result<T, PipeError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipeError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Malformed body: {0}")]
    MalformedBody(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

/// The Pipe trait for transformation and validation
///
/// Pipes run before any database work; a failing pipe short-circuits the
/// request with `400 Bad Request`.
#[async_trait]
pub trait Pipe: Send + Sync + 'static {
    type Input: Send + 'static;
    type Output: Send + 'static;

    async fn transform(&self, input: Self::Input) -> PipeResult<Self::Output>;
}
