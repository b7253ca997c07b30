use super::model::{CreateProductRequest, NewProduct};
use crate::pipe::builtins::ParseDecimalPipe;
use crate::pipe::{Pipe, PipeError, PipeResult};
use async_trait::async_trait;
use axum::body::Bytes;
use serde_json::Value;

/// Turns a raw create body into a [`NewProduct`].
///
/// Checks run in order: body is a JSON object, `name` is present and not
/// blank, `price` is present and parses as a decimal.
#[derive(Default)]
pub struct CreateProductPipe;

#[async_trait]
impl Pipe for CreateProductPipe {
    type Input = Bytes;
    type Output = NewProduct;

    async fn transform(&self, body: Bytes) -> PipeResult<NewProduct> {
        if body.is_empty() {
            return Err(PipeError::MalformedBody(
                "the incoming JSON document cannot be empty".to_string(),
            ));
        }

        let json: Value = serde_json::from_slice(&body)
            .map_err(|e| PipeError::MalformedBody(e.to_string()))?;
        if !json.is_object() {
            return Err(PipeError::MalformedBody(
                "the incoming JSON document must be an object".to_string(),
            ));
        }

        let request: CreateProductRequest =
            serde_json::from_value(json).map_err(|e| PipeError::MalformedBody(e.to_string()))?;

        let name = request.name.ok_or(PipeError::MissingField("name"))?;
        if name.trim().is_empty() {
            return Err(PipeError::Validation(
                "the product name cannot be blank".to_string(),
            ));
        }

        let raw_price = request.price.ok_or(PipeError::MissingField("price"))?;
        let price = ParseDecimalPipe.transform(raw_price).await?;

        Ok(NewProduct { name, price })
    }
}
