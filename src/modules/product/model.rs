use super::entity;
use rust_decimal::Decimal;
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A persisted product as it is served over HTTP.
///
/// `price` goes out as a JSON number; it is kept as a `Decimal` internally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl TryFrom<entity::Model> for Product {
    type Error = DbErr;

    fn try_from(model: entity::Model) -> Result<Self, DbErr> {
        let price = Decimal::from_str(&model.price).map_err(|e| {
            DbErr::Custom(format!(
                "product {} has an unreadable price '{}': {}",
                model.id, model.price, e
            ))
        })?;
        Ok(Self {
            id: model.id,
            name: model.name,
            price,
        })
    }
}

/// Raw create body. Both fields are optional here so that a missing field
/// is reported by name instead of as a generic parse failure.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<String>,
}

/// A validated product that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
}
