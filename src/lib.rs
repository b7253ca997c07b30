//! # Product API
//!
//! A small HTTP API over a single `Product` table.
//!
//! | Method | Path             | Success                          |
//! |--------|------------------|----------------------------------|
//! | GET    | `/products`      | 200, JSON array of products      |
//! | GET    | `/products/{id}` | 200, JSON product (404 if absent)|
//! | POST   | `/products`      | 201, empty body, `Location` set  |
//!
//! Every request validates its input first (400 on failure) and then runs
//! exactly one database operation inside its own scoped session. Database
//! failures come back as 500.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use product_api::{AppState, app, database, session::SessionFactory};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let conn = database::connect_in_memory().await?;
//!     let state = AppState::new(SessionFactory::new(conn));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(
//!         listener,
//!         app(state).into_make_service_with_connect_info::<std::net::SocketAddr>(),
//!     )
//!     .await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod database;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod lifecycle;
pub mod logging;
pub mod modules;
pub mod pipe;
pub mod session;

pub use error::{ApiError, Result};

use axum::Router;
use modules::product::ProductController;
use session::SessionFactory;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionFactory,
}

impl AppState {
    pub fn new(sessions: SessionFactory) -> Self {
        Self { sessions }
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(ProductController::router())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
