use super::entity;
use super::model::{NewProduct, Product};
use crate::session::Session;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, QueryOrder};

/// Product queries. Every call runs on the caller's session.
pub struct ProductRepository;

impl ProductRepository {
    pub async fn find_all(session: &Session) -> Result<Vec<Product>, DbErr> {
        let rows = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(session.connection())
            .await?;
        rows.into_iter().map(Product::try_from).collect()
    }

    pub async fn find_by_id(session: &Session, id: i64) -> Result<Option<Product>, DbErr> {
        let row = entity::Entity::find_by_id(id)
            .one(session.connection())
            .await?;
        row.map(Product::try_from).transpose()
    }

    /// Insert a new row; the id comes back from the database.
    pub async fn insert(session: &Session, product: NewProduct) -> Result<Product, DbErr> {
        let model = entity::ActiveModel {
            id: NotSet,
            name: Set(product.name),
            price: Set(product.price.to_string()),
        };
        let saved = model.insert(session.connection()).await?;
        Product::try_from(saved)
    }
}
