// ==========================================
// Catalog Import - Domain layer
// ==========================================
// Entities and import report types; no data access, no business flow
// ==========================================

pub mod catalog;
pub mod report;

pub use catalog::{
    Attribute, AttributeName, AttributeValue, Company, EntityKind, RawMaterial,
    MAX_ATTRIBUTE_VALUE_LEN,
};
pub use report::{ImportEvent, ImportReport, ImportSummary, RowOutcome};
