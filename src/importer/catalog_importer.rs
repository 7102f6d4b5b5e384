// ==========================================
// Catalog Import - Import Orchestrator
// ==========================================
// Flow per row: resolve company -> resolve raw material ->
// create raw material -> resolve and attach attributes
// Terminal row states: Imported / SkippedDuplicate / Failed
// Policy: only the source read is batch-fatal; every later failure is
// row- or column-local and the batch continues
// ==========================================

use crate::domain::catalog::EntityKind;
use crate::domain::report::{ImportEvent, ImportReport, ImportSummary, RowOutcome};
use crate::importer::entity_resolver::FuzzyEntityResolver;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::sheet_reader::{Row, SheetReader};
use crate::importer::value_resolver::AttributeValueResolver;
use crate::repository::catalog_repo::CatalogRepository;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// CatalogImporter
// ==========================================
pub struct CatalogImporter<R: CatalogRepository> {
    repo: R,
}

impl<R: CatalogRepository> CatalogImporter<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// The repository, for callers that want post-import counts.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Import a supplier catalog file as one batch.
    ///
    /// Returns `Err` only when the source file cannot be read; once rows
    /// start processing the batch always runs to completion and the report
    /// carries the per-row outcomes.
    #[instrument(skip(self, path), fields(batch_id))]
    pub fn import<P: AsRef<Path>>(&self, path: P) -> ImportResult<ImportReport> {
        let start = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        info!(batch_id = %batch_id, file = %file_name, "starting catalog import");

        // Source read is the only batch-fatal step
        let rows = SheetReader::read(path)?;

        let mut events = Vec::new();
        let mut summary = ImportSummary {
            total_rows: rows.len(),
            ..ImportSummary::default()
        };

        info!(total_rows = rows.len(), "catalog file parsed");
        events.push(ImportEvent::SheetRead {
            file_name: file_name.clone(),
            total_rows: rows.len(),
        });

        for (idx, row) in rows.iter().enumerate() {
            let row_number = idx + 1;
            match self.import_row(row_number, row, &mut events) {
                RowOutcome::Imported => summary.imported += 1,
                RowOutcome::SkippedDuplicate => summary.skipped_duplicates += 1,
                RowOutcome::Failed => summary.failed += 1,
            }
        }

        info!(
            batch_id = %batch_id,
            total = summary.total_rows,
            imported = summary.imported,
            skipped = summary.skipped_duplicates,
            failed = summary.failed,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "catalog import finished"
        );

        Ok(ImportReport {
            batch_id,
            file_name,
            summary,
            events,
            elapsed_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Process one row to a terminal state. Row-local failures become a
    /// `RowFailed` event plus the `Failed` outcome; the batch continues.
    fn import_row(&self, row_number: usize, row: &Row, events: &mut Vec<ImportEvent>) -> RowOutcome {
        match self.try_import_row(row_number, row, events) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(row = row_number, error = %e, "row failed, continuing batch");
                events.push(ImportEvent::RowFailed {
                    row: row_number,
                    reason: e.to_string(),
                });
                RowOutcome::Failed
            }
        }
    }

    fn try_import_row(
        &self,
        row_number: usize,
        row: &Row,
        events: &mut Vec<ImportEvent>,
    ) -> ImportResult<RowOutcome> {
        let resolver = FuzzyEntityResolver::new(&self.repo);
        let value_resolver = AttributeValueResolver::new(&self.repo);

        let name = row
            .get("name")
            .ok_or_else(|| ImportError::MissingRequiredField {
                row: row_number,
                field: "name".to_string(),
            })?;
        let description = row.get("description");
        let company_name = row
            .get("company")
            .ok_or_else(|| ImportError::MissingRequiredField {
                row: row_number,
                field: "company".to_string(),
            })?;

        // === Company: reuse above threshold, create otherwise ===
        let company_id = match resolver.find(EntityKind::Company, company_name) {
            Some(matched) => {
                info!(
                    row = row_number,
                    company = %company_name,
                    matched = %matched.name,
                    similarity = matched.similarity,
                    "company matched"
                );
                events.push(ImportEvent::CompanyMatched {
                    row: row_number,
                    requested: company_name.to_string(),
                    matched: matched.name,
                    company_id: matched.id,
                    similarity: matched.similarity,
                });
                matched.id
            }
            None => {
                let company = self.repo.create_company(company_name)?;
                info!(row = row_number, company = %company.name, "company not found, created");
                events.push(ImportEvent::CompanyCreated {
                    row: row_number,
                    name: company.name,
                    company_id: company.id,
                });
                company.id
            }
        };

        // === Raw material: a fuzzy match means the row is a duplicate ===
        if let Some(matched) = resolver.find(EntityKind::RawMaterial, name) {
            info!(
                row = row_number,
                material = %name,
                matched = %matched.name,
                similarity = matched.similarity,
                "raw material already exists, row skipped"
            );
            events.push(ImportEvent::DuplicateSkipped {
                row: row_number,
                name: name.to_string(),
                matched: matched.name,
                raw_material_id: matched.id,
                similarity: matched.similarity,
            });
            return Ok(RowOutcome::SkippedDuplicate);
        }

        let material = self.repo.create_raw_material(name, description, company_id)?;
        info!(row = row_number, material = %material.name, "raw material created");
        events.push(ImportEvent::RawMaterialCreated {
            row: row_number,
            name: material.name.clone(),
            raw_material_id: material.id,
            company_id,
        });

        // === Attributes, in source column order ===
        for (key, raw_value) in row.attribute_cells() {
            let Some(attribute_name) = self.repo.find_attribute_name(key)? else {
                warn!(row = row_number, key = %key, "attribute name not in vocabulary, column skipped");
                events.push(ImportEvent::AttributeNameUnknown {
                    row: row_number,
                    key: key.to_string(),
                });
                continue;
            };

            let values = value_resolver.resolve(&attribute_name, raw_value, row_number, events);

            // The attribute is created even when its value set is empty
            let attribute = self.repo.create_attribute(material.id, attribute_name.id)?;
            let value_ids: Vec<i64> = values.iter().map(|v| v.id).collect();
            self.repo.attach_values(attribute.id, &value_ids)?;

            debug!(
                row = row_number,
                key = %key,
                values = value_ids.len(),
                "attribute created"
            );
            events.push(ImportEvent::AttributeCreated {
                row: row_number,
                key: key.to_string(),
                attribute_id: attribute.id,
                value_count: value_ids.len(),
            });
        }

        Ok(RowOutcome::Imported)
    }
}
