// ==========================================
// Catalog Import - Attribute Value Resolver
// ==========================================
// Contract: split a comma-delimited cell into tokens, trim, find-or-create
// each (attribute_name, token) pair
// Failure policy: a conflict or over-length token mid-column discards the
// whole column's accumulated values; the row continues with an empty set
// ==========================================

use crate::domain::catalog::{AttributeName, AttributeValue};
use crate::domain::report::ImportEvent;
use crate::repository::catalog_repo::CatalogRepository;
use crate::repository::error::RepositoryError;
use tracing::error;

// ==========================================
// AttributeValueResolver
// ==========================================
pub struct AttributeValueResolver<'a, R: CatalogRepository> {
    repo: &'a R,
}

impl<'a, R: CatalogRepository> AttributeValueResolver<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Resolve a raw cell into a distinct set of attribute values.
    ///
    /// A null cell resolves to an empty set without touching the datastore.
    /// Resolution failures degrade the whole column to an empty set and
    /// record a `ValuesDiscarded` event.
    pub fn resolve(
        &self,
        attribute_name: &AttributeName,
        raw_value: Option<&str>,
        row: usize,
        events: &mut Vec<ImportEvent>,
    ) -> Vec<AttributeValue> {
        let Some(raw_value) = raw_value else {
            return Vec::new();
        };

        let mut resolved: Vec<AttributeValue> = Vec::new();
        for token in raw_value.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }

            match self.repo.find_or_create_attribute_value(attribute_name.id, token) {
                Ok(value) => {
                    if !resolved.iter().any(|v| v.id == value.id) {
                        resolved.push(value);
                    }
                }
                Err(e) => {
                    let reason = match &e {
                        RepositoryError::ValueTooLong { length, max } => {
                            format!("value of {} chars exceeds the {} char bound", length, max)
                        }
                        RepositoryError::UniqueConstraintViolation(msg) => {
                            format!("uniqueness violation: {}", msg)
                        }
                        other => other.to_string(),
                    };
                    error!(
                        row = row,
                        attribute = %attribute_name.name,
                        reason = %reason,
                        "attribute value resolution failed, column contributes no values"
                    );
                    events.push(ImportEvent::ValuesDiscarded {
                        row,
                        key: attribute_name.name.clone(),
                        reason,
                    });
                    // reference behavior: accumulated values are dropped too
                    return Vec::new();
                }
            }
        }

        resolved
    }
}
