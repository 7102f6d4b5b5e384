// ==========================================
// CatalogImporter integration tests
// ==========================================
// Target: the full per-row reconciliation flow against a real SQLite store
// ==========================================


use catalog_import::{
    logging, CatalogImporter, ImportError, ImportEvent, SqliteCatalogRepository,
};
use rusqlite::Connection;
use test_helpers::{create_test_db, seed_vocabulary, write_catalog_csv};

fn setup(vocabulary: &[&str]) -> (tempfile::NamedTempFile, String) {
    logging::init_test();
    let (temp_file, db_path) = create_test_db().expect("create test db");
    let conn = Connection::open(&db_path).expect("open db");
    seed_vocabulary(&conn, vocabulary).expect("seed vocabulary");
    (temp_file, db_path)
}

fn importer(db_path: &str) -> CatalogImporter<SqliteCatalogRepository> {
    let repo = SqliteCatalogRepository::new(db_path).expect("open repository");
    CatalogImporter::new(repo)
}

fn count(db_path: &str, sql: &str) -> i64 {
    let conn = Connection::open(db_path).expect("open db");
    conn.query_row(sql, [], |row| row.get(0)).expect("count query")
}

#[test]
fn test_basic_import() {
    let (_guard, db_path) = setup(&["color", "grade"]);
    let importer = importer(&db_path);

    let csv = write_catalog_csv(
        "name,description,company,color,grade\n\
         Carbon Black N330,rubber reinforcing filler,Acme Chemicals,black,A1\n\
         Zinc Oxide,activator,Acme Chemicals,white,A2\n",
    )
    .unwrap();

    let report = importer.import(csv.path()).expect("import should succeed");

    assert_eq!(report.summary.total_rows, 2);
    assert_eq!(report.summary.imported, 2);
    assert_eq!(report.summary.skipped_duplicates, 0);
    assert_eq!(report.summary.failed, 0);

    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM company"), 1);
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM raw_material"), 2);
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM attribute"), 4);
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM attribute_value"), 4);
}

#[test]
fn test_reimport_is_idempotent() {
    let (_guard, db_path) = setup(&["color"]);
    let importer = importer(&db_path);

    let csv = write_catalog_csv(
        "name,description,company,color\n\
         Carbon Black N330,filler,Acme Chemicals,black\n\
         Zinc Oxide,activator,Blue Ridge Minerals,white\n",
    )
    .unwrap();

    let first = importer.import(csv.path()).expect("first import");
    assert_eq!(first.summary.imported, 2);

    let second = importer.import(csv.path()).expect("second import");
    assert_eq!(second.summary.imported, 0);
    assert_eq!(second.summary.skipped_duplicates, 2);

    // zero new records on the second run
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM company"), 2);
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM raw_material"), 2);
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM attribute"), 2);
}

#[test]
fn test_fuzzy_company_reuse() {
    let (_guard, db_path) = setup(&[]);
    let importer = importer(&db_path);

    let first = write_catalog_csv(
        "name,description,company\nCarbon Black N330,,Acme Industrial Pigments\n",
    )
    .unwrap();
    importer.import(first.path()).expect("first import");

    // near-duplicate supplier name, different material
    let second = write_catalog_csv(
        "name,description,company\nZinc Oxide,,Acme Industrial Pigment\n",
    )
    .unwrap();
    let report = importer.import(second.path()).expect("second import");

    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM company"), 1);
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM raw_material"), 2);
    assert_eq!(
        report.count_events(|e| matches!(e, ImportEvent::CompanyMatched { .. })),
        1
    );
}

#[test]
fn test_duplicate_material_creates_nothing() {
    let (_guard, db_path) = setup(&["color"]);
    let importer = importer(&db_path);

    let first = write_catalog_csv(
        "name,description,company,color\npremium carbon black,,Acme,black\n",
    )
    .unwrap();
    importer.import(first.path()).expect("first import");

    let attributes_before = count(&db_path, "SELECT COUNT(*) FROM attribute");
    let values_before = count(&db_path, "SELECT COUNT(*) FROM attribute_value");

    // near-duplicate material name: no attribute or value creation at all
    let second = write_catalog_csv(
        "name,description,company,color\npremium carbon blacks,,Acme,crimson\n",
    )
    .unwrap();
    let report = importer.import(second.path()).expect("second import");

    assert_eq!(report.summary.skipped_duplicates, 1);
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM raw_material"), 1);
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM attribute"), attributes_before);
    assert_eq!(
        count(&db_path, "SELECT COUNT(*) FROM attribute_value"),
        values_before
    );
}

#[test]
fn test_similarity_at_exactly_threshold_is_not_a_duplicate() {
    let (_guard, db_path) = setup(&[]);
    let importer = importer(&db_path);

    // "abcd de" vs "abcd de x" share 8 of 10 trigrams: exactly 0.80
    let first = write_catalog_csv("name,description,company\nabcd de x,,Acme\n").unwrap();
    importer.import(first.path()).expect("first import");

    let second = write_catalog_csv("name,description,company\nabcd de,,Acme\n").unwrap();
    let report = importer.import(second.path()).expect("second import");

    assert_eq!(report.summary.imported, 1);
    assert_eq!(report.summary.skipped_duplicates, 0);
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM raw_material"), 2);
}

#[test]
fn test_comma_list_collapses_duplicates() {
    let (_guard, db_path) = setup(&["color"]);
    let importer = importer(&db_path);

    let csv = write_catalog_csv(
        "name,description,company,color\nCarbon Black N330,,Acme,\"red, blue, blue\"\n",
    )
    .unwrap();
    importer.import(csv.path()).expect("import");

    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM attribute_value"), 2);
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM attribute_value_link"), 2);
}

#[test]
fn test_null_attribute_cell_still_creates_attribute() {
    let (_guard, db_path) = setup(&["color"]);
    let importer = importer(&db_path);

    let csv = write_catalog_csv("name,description,company,color\nZinc Oxide,,Acme,\n").unwrap();
    let report = importer.import(csv.path()).expect("import");

    assert_eq!(report.summary.imported, 1);
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM attribute"), 1);
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM attribute_value_link"), 0);
    assert_eq!(
        report.count_events(
            |e| matches!(e, ImportEvent::AttributeCreated { value_count: 0, .. })
        ),
        1
    );
}

#[test]
fn test_overlong_value_is_column_local() {
    let (_guard, db_path) = setup(&["color", "grade"]);
    let importer = importer(&db_path);

    let long_value = "x".repeat(401);
    let csv = write_catalog_csv(&format!(
        "name,description,company,color,grade\n\
         Carbon Black N330,,Acme,\"red, {}\",A1\n\
         Zinc Oxide,,Acme,white,A2\n",
        long_value
    ))
    .unwrap();

    let report = importer.import(csv.path()).expect("import");

    // both rows imported; only the color column of row 1 lost its values
    assert_eq!(report.summary.imported, 2);
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM attribute"), 4);
    assert_eq!(
        report.count_events(|e| matches!(
            e,
            ImportEvent::ValuesDiscarded { row: 1, key, .. } if key == "color"
        )),
        1
    );

    // row 1 color attribute carries zero values, its grade carries one
    let color_links = count(
        &db_path,
        "SELECT COUNT(*) FROM attribute_value_link l \
         JOIN attribute a ON a.id = l.attribute_id \
         JOIN attribute_name n ON n.id = a.attribute_name_id \
         WHERE n.name = 'color' AND a.raw_material_id = 1",
    );
    assert_eq!(color_links, 0);

    let grade_links = count(
        &db_path,
        "SELECT COUNT(*) FROM attribute_value_link l \
         JOIN attribute a ON a.id = l.attribute_id \
         JOIN attribute_name n ON n.id = a.attribute_name_id \
         WHERE n.name = 'grade' AND a.raw_material_id = 1",
    );
    assert_eq!(grade_links, 1);
}

#[test]
fn test_missing_name_fails_row_only() {
    let (_guard, db_path) = setup(&[]);
    let importer = importer(&db_path);

    let csv = write_catalog_csv(
        "name,description,company\n,,Acme\nZinc Oxide,,Acme\n",
    )
    .unwrap();
    let report = importer.import(csv.path()).expect("import");

    assert_eq!(report.summary.total_rows, 2);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.imported, 1);
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM raw_material"), 1);
    assert_eq!(
        report.count_events(|e| matches!(e, ImportEvent::RowFailed { row: 1, .. })),
        1
    );
}

#[test]
fn test_unknown_attribute_column_is_skipped() {
    let (_guard, db_path) = setup(&["color"]);
    let importer = importer(&db_path);

    let csv = write_catalog_csv(
        "name,description,company,color,exotic\nZinc Oxide,,Acme,white,unknown\n",
    )
    .unwrap();
    let report = importer.import(csv.path()).expect("import");

    assert_eq!(report.summary.imported, 1);
    // only the color attribute exists; the unknown key created nothing
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM attribute"), 1);
    assert_eq!(
        report.count_events(
            |e| matches!(e, ImportEvent::AttributeNameUnknown { key, .. } if key == "exotic")
        ),
        1
    );
}

#[test]
fn test_unreadable_file_is_batch_fatal() {
    let (_guard, db_path) = setup(&[]);
    let importer = importer(&db_path);

    let result = importer.import("no_such_catalog.csv");
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));

    let result = importer.import("catalog.pdf");
    assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));

    // nothing was written
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM raw_material"), 0);
}

#[test]
fn test_report_is_serializable_and_consistent() {
    let (_guard, db_path) = setup(&["color"]);
    let importer = importer(&db_path);

    let csv = write_catalog_csv(
        "name,description,company,color\nZinc Oxide,,Acme,white\n,,Acme\n",
    )
    .unwrap();
    let report = importer.import(csv.path()).expect("import");

    assert_eq!(
        report.summary.imported + report.summary.skipped_duplicates + report.summary.failed,
        report.summary.total_rows
    );

    let json = serde_json::to_string(&report).expect("report serializes");
    assert!(json.contains("\"batch_id\""));
}
