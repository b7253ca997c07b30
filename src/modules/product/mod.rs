pub mod controller;
pub mod entity;
pub mod model;
pub mod pipe;
pub mod repository;

pub use controller::ProductController;
pub use model::{NewProduct, Product};
pub use repository::ProductRepository;
