// ==========================================
// Catalog Import - SQLite connection initialization
// ==========================================
// Goals:
// - Unify PRAGMA behavior for every Connection::open, so no module runs
//   with foreign keys off while another runs with them on
// - Unify busy_timeout to reduce spurious busy errors
// - Own the catalog schema DDL
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Apply the unified PRAGMA configuration to a SQLite connection.
///
/// foreign_keys and busy_timeout are per-connection settings and must be
/// applied to every connection the process opens.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the unified configuration applied.
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Create the catalog schema if it does not exist.
///
/// attribute_name is the controlled vocabulary: the importer only reads it,
/// it is seeded by catalog administration outside this crate.
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS company (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS raw_material (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            description TEXT,
            company_id  INTEGER NOT NULL REFERENCES company(id),
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS attribute_name (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS attribute_value (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            attribute_name_id INTEGER NOT NULL REFERENCES attribute_name(id),
            value             TEXT NOT NULL CHECK (length(value) <= 400),
            UNIQUE (attribute_name_id, value)
        );

        CREATE TABLE IF NOT EXISTS attribute (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            raw_material_id   INTEGER NOT NULL REFERENCES raw_material(id),
            attribute_name_id INTEGER NOT NULL REFERENCES attribute_name(id)
        );

        CREATE TABLE IF NOT EXISTS attribute_value_link (
            attribute_id       INTEGER NOT NULL REFERENCES attribute(id),
            attribute_value_id INTEGER NOT NULL REFERENCES attribute_value(id),
            PRIMARY KEY (attribute_id, attribute_value_id)
        );
        "#,
    )
}
