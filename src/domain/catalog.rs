// ==========================================
// Catalog Import - Catalog domain model
// ==========================================
// Aligned with the schema in db.rs
// Identity rules:
// - Company / RawMaterial: name, fuzzy-unique (trigram similarity > 0.80)
// - AttributeName: name, exact-unique, pre-existing vocabulary
// - AttributeValue: (attribute_name, value), exact pair
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum stored length of an attribute value, in characters.
///
/// Mirrors the column constraint on attribute_value.value; the repository
/// rejects longer values before they reach the datastore.
pub const MAX_ATTRIBUTE_VALUE_LEN: usize = 400;

/// Entity kinds subject to fuzzy name reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Company,
    RawMaterial,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Company => "company",
            EntityKind::RawMaterial => "raw_material",
        }
    }
}

// ==========================================
// Company - supplier master data
// ==========================================
// Created lazily on the first catalog row that references an
// unmatched company name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// ==========================================
// RawMaterial - catalog entry
// ==========================================
// Belongs to exactly one Company (referenced, not owned)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaterial {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub company_id: i64,
    pub created_at: DateTime<Utc>,
}

// ==========================================
// AttributeName - controlled vocabulary key
// ==========================================
// Read-only for the importer; seeded outside this crate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeName {
    pub id: i64,
    pub name: String,
}

// ==========================================
// AttributeValue - vocabulary value
// ==========================================
// Shared across raw materials; find-or-create by exact pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: i64,
    pub attribute_name_id: i64,
    pub value: String,
}

// ==========================================
// Attribute - join entity
// ==========================================
// Binds one RawMaterial to one AttributeName; its value set lives in
// attribute_value_link (many-to-many)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: i64,
    pub raw_material_id: i64,
    pub attribute_name_id: i64,
}
