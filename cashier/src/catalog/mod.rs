//! Catalog: products and payment methods

pub mod repository;
pub mod store;

pub use repository::CatalogRepository;
pub use store::{CatalogStore, CategoryFilter, UnknownCategoryFilter};
