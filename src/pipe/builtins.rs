use crate::pipe::{Pipe, PipeError, PipeResult};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::str::FromStr;

/// A pipe that parses a path segment into a 64-bit identifier
#[derive(Default)]
pub struct ParseIdPipe;

#[async_trait]
impl Pipe for ParseIdPipe {
    type Input = String;
    type Output = i64;

    async fn transform(&self, input: String) -> PipeResult<i64> {
        input
            .parse::<i64>()
            .map_err(|_| PipeError::Validation(format!("'{}' is not a valid id", input)))
    }
}

/// A pipe that parses decimal text without going through floating point.
///
/// Plain notation (`"9.99"`) is tried first, then scientific (`"1.5e1"`).
#[derive(Default)]
pub struct ParseDecimalPipe;

#[async_trait]
impl Pipe for ParseDecimalPipe {
    type Input = String;
    type Output = Decimal;

    async fn transform(&self, input: String) -> PipeResult<Decimal> {
        Decimal::from_str(&input)
            .or_else(|_| Decimal::from_scientific(&input))
            .map_err(|_| PipeError::Validation(format!("'{}' is not a valid decimal", input)))
    }
}
