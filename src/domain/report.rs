// ==========================================
// Catalog Import - Import report types
// ==========================================
// The import returns a structured event stream alongside summary
// counters, so callers can assert on outcomes without parsing log text
// ==========================================

use serde::{Deserialize, Serialize};

/// Terminal state of a single catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowOutcome {
    /// A new RawMaterial and its attributes were created.
    Imported,
    /// An existing RawMaterial fuzzy-matched the row name; nothing created.
    SkippedDuplicate,
    /// A row-local failure; the rest of the batch continued.
    Failed,
}

/// One structured record in the import event stream.
///
/// Row numbers are 1-based data-row positions (header excluded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ImportEvent {
    /// Source file parsed; emitted once at batch start.
    SheetRead { file_name: String, total_rows: usize },
    /// Company name fuzzy-matched an existing record.
    CompanyMatched {
        row: usize,
        requested: String,
        matched: String,
        company_id: i64,
        similarity: f64,
    },
    /// No company matched above threshold; a new record was created.
    CompanyCreated { row: usize, name: String, company_id: i64 },
    /// Raw-material name fuzzy-matched an existing record; row skipped.
    DuplicateSkipped {
        row: usize,
        name: String,
        matched: String,
        raw_material_id: i64,
        similarity: f64,
    },
    /// A new RawMaterial was created.
    RawMaterialCreated {
        row: usize,
        name: String,
        raw_material_id: i64,
        company_id: i64,
    },
    /// An attribute column's key is absent from the vocabulary.
    AttributeNameUnknown { row: usize, key: String },
    /// An Attribute was created and its value set attached.
    AttributeCreated {
        row: usize,
        key: String,
        attribute_id: i64,
        value_count: usize,
    },
    /// Value resolution failed mid-column; the column contributes no values.
    ValuesDiscarded { row: usize, key: String, reason: String },
    /// The row failed as a unit.
    RowFailed { row: usize, reason: String },
}

/// Per-batch counters. Invariant: imported + skipped_duplicates + failed == total_rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total_rows: usize,
    pub imported: usize,
    pub skipped_duplicates: usize,
    pub failed: usize,
}

/// Result of one import run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,
    pub file_name: String,
    pub summary: ImportSummary,
    pub events: Vec<ImportEvent>,
    pub elapsed_ms: u64,
}

impl ImportReport {
    /// Count events of interest in tests and callers.
    pub fn count_events<F: Fn(&ImportEvent) -> bool>(&self, pred: F) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}
