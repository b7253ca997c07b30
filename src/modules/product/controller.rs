use super::model::Product;
use super::pipe::CreateProductPipe;
use super::repository::ProductRepository;
use crate::AppState;
use crate::dispatch::{Operation, dispatch, reject};
use crate::error::{ApiError, Result};
use crate::extract::ClientAddr;
use crate::pipe::Pipe;
use crate::pipe::builtins::ParseIdPipe;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

/// Routes for `/products`
pub struct ProductController;

impl ProductController {
    pub fn base_path() -> &'static str {
        "/products"
    }

    pub fn router() -> Router<AppState> {
        let base = Self::base_path();
        Router::new()
            .route(base, get(list_products).post(create_product))
            .route(&format!("{base}/{{id}}"), get(fetch_product))
    }
}

pub async fn list_products(
    State(state): State<AppState>,
    client: ClientAddr,
) -> Result<Json<Vec<Product>>> {
    let products = dispatch(
        Operation::ListProducts,
        &client,
        &state.sessions,
        |session| Box::pin(ProductRepository::find_all(session)),
    )
    .await?;

    Ok(Json(products))
}

pub async fn fetch_product(
    State(state): State<AppState>,
    client: ClientAddr,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>> {
    let id = ParseIdPipe
        .transform(raw_id)
        .await
        .map_err(|err| reject(Operation::FetchProduct, &client, err))?;

    let product = dispatch(
        Operation::FetchProduct,
        &client,
        &state.sessions,
        move |session| Box::pin(ProductRepository::find_by_id(session, id)),
    )
    .await?;

    product.map(Json).ok_or(ApiError::NotFound {
        resource: "Product",
        id,
    })
}

/// Responds `201 Created` with an empty body and a `Location` header
/// pointing at the new product.
pub async fn create_product(
    State(state): State<AppState>,
    client: ClientAddr,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let new_product = CreateProductPipe
        .transform(body)
        .await
        .map_err(|err| reject(Operation::AppendProduct, &client, err))?;

    let product = dispatch(
        Operation::AppendProduct,
        &client,
        &state.sessions,
        move |session| Box::pin(ProductRepository::insert(session, new_product)),
    )
    .await?;

    let location = format!("{}/{}", ProductController::base_path(), product.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}
