// ==========================================
// Supplier Raw-Material Catalog Import - Core Library
// ==========================================
// Stack: Rust + SQLite
// Scope: reconciliation/import core for supplier catalogs
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and report types
pub mod domain;

// Repository layer - data access
pub mod repository;

// Import layer - external data
pub mod importer;

// Database infrastructure (connection init / PRAGMA unification / schema)
pub mod db;

// Logging
pub mod logging;

// ==========================================
// Re-export core types
// ==========================================

// Domain entities
pub use domain::catalog::{
    Attribute, AttributeName, AttributeValue, Company, EntityKind, RawMaterial,
    MAX_ATTRIBUTE_VALUE_LEN,
};

// Import report
pub use domain::report::{ImportEvent, ImportReport, ImportSummary, RowOutcome};

// Importer
pub use importer::{
    AttributeValueResolver, CatalogImporter, FuzzyEntityResolver, ImportError, ImportResult,
    Row, SheetReader, SIMILARITY_THRESHOLD,
};

// Repository
pub use repository::{
    CatalogRepository, RepositoryError, RepositoryResult, SqliteCatalogRepository,
};

// ==========================================
// Constants
// ==========================================

// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Application name
pub const APP_NAME: &str = "catalog-import";
