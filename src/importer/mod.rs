// ==========================================
// Catalog Import - Import layer
// ==========================================
// Reconciliation/import core: tabular source adapter, fuzzy entity
// resolver, attribute value resolver, import orchestrator
// ==========================================

pub mod catalog_importer;
pub mod entity_resolver;
pub mod error;
pub mod sheet_reader;
pub mod similarity;
pub mod value_resolver;

pub use catalog_importer::CatalogImporter;
pub use entity_resolver::{EntityMatch, FuzzyEntityResolver, SIMILARITY_THRESHOLD};
pub use error::{ImportError, ImportResult};
pub use sheet_reader::{CsvSheetParser, ExcelSheetParser, Row, SheetParser, SheetReader};
pub use similarity::trigram_similarity;
pub use value_resolver::AttributeValueResolver;
