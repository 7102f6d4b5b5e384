// ==========================================
// Catalog Import - Repository layer
// ==========================================
// Data access only; no reconciliation rules
// ==========================================

pub mod catalog_repo;
pub mod catalog_repo_impl;
pub mod error;

pub use catalog_repo::CatalogRepository;
pub use catalog_repo_impl::SqliteCatalogRepository;
pub use error::{RepositoryError, RepositoryResult};
