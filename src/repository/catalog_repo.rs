// ==========================================
// Catalog Import - Catalog Repository trait
// ==========================================
// Contract: data CRUD for the catalog store, no business rules.
// The importer decides create-vs-reuse; the repository only reads,
// creates and attaches.
// ==========================================

use crate::domain::catalog::{
    Attribute, AttributeName, AttributeValue, Company, EntityKind, RawMaterial,
};
use crate::repository::error::RepositoryResult;

// ==========================================
// CatalogRepository trait
// ==========================================
// Implementor: SqliteCatalogRepository (rusqlite)
pub trait CatalogRepository: Send + Sync {
    // ===== Fuzzy-search support =====

    /// All `(id, name)` pairs for the given entity kind, ascending id.
    ///
    /// The fuzzy resolver ranks these in process; ascending id keeps
    /// tie-breaking deterministic.
    fn candidate_names(&self, kind: EntityKind) -> RepositoryResult<Vec<(i64, String)>>;

    // ===== Creation =====

    /// Insert a new company and return it.
    fn create_company(&self, name: &str) -> RepositoryResult<Company>;

    /// Insert a new raw material and return it.
    fn create_raw_material(
        &self,
        name: &str,
        description: Option<&str>,
        company_id: i64,
    ) -> RepositoryResult<RawMaterial>;

    /// Insert a new attribute binding a raw material to a vocabulary key.
    fn create_attribute(
        &self,
        raw_material_id: i64,
        attribute_name_id: i64,
    ) -> RepositoryResult<Attribute>;

    // ===== Vocabulary lookup =====

    /// Exact-name lookup in the controlled vocabulary. Never creates.
    fn find_attribute_name(&self, name: &str) -> RepositoryResult<Option<AttributeName>>;

    /// Find an attribute value by exact `(attribute_name, value)` pair,
    /// creating it if absent.
    ///
    /// # Errors
    /// - `ValueTooLong` when the value exceeds the stored length bound
    /// - `UniqueConstraintViolation` on a consistency conflict
    fn find_or_create_attribute_value(
        &self,
        attribute_name_id: i64,
        value: &str,
    ) -> RepositoryResult<AttributeValue>;

    // ===== Many-to-many attach =====

    /// Attach a set of attribute values to an attribute. Already-attached
    /// pairs are ignored. Returns the number of rows inserted.
    fn attach_values(&self, attribute_id: i64, value_ids: &[i64]) -> RepositoryResult<usize>;

    // ===== Counters (CLI summary / tests) =====

    fn count_companies(&self) -> RepositoryResult<usize>;
    fn count_raw_materials(&self) -> RepositoryResult<usize>;
    fn count_attributes(&self) -> RepositoryResult<usize>;
    fn count_attribute_values(&self) -> RepositoryResult<usize>;
}
