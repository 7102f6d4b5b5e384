// ==========================================
// Catalog Import - CLI entry point
// ==========================================
// Usage: catalog-import <catalog-file> [db-path]
// Runs the full import as one batch job and prints the report as JSON.
// Exit code: 0 on a completed batch, 1 on a batch-fatal failure.
// ==========================================

use catalog_import::repository::CatalogRepository;
use catalog_import::{db, logging, CatalogImporter, SqliteCatalogRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();

    tracing::info!("catalog-import {}", catalog_import::VERSION);

    let mut args = std::env::args().skip(1);
    let Some(file_path) = args.next() else {
        eprintln!("usage: catalog-import <catalog-file> [db-path]");
        return ExitCode::FAILURE;
    };
    let db_path = args.next().unwrap_or_else(|| "catalog.db".to_string());

    match run(&file_path, &db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "catalog import failed");
            ExitCode::FAILURE
        }
    }
}

fn run(file_path: &str, db_path: &str) -> anyhow::Result<()> {
    tracing::info!(db = %db_path, "opening catalog store");
    let conn = db::open_sqlite_connection(db_path)?;
    db::initialize_schema(&conn)?;

    let repo = SqliteCatalogRepository::from_connection(conn);
    let importer = CatalogImporter::new(repo);

    let report = importer.import(file_path)?;

    tracing::info!(
        companies = importer.repo().count_companies()?,
        raw_materials = importer.repo().count_raw_materials()?,
        attributes = importer.repo().count_attributes()?,
        attribute_values = importer.repo().count_attribute_values()?,
        "catalog store totals after import"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
