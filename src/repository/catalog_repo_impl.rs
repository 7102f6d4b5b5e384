// ==========================================
// Catalog Import - SQLite Catalog Repository
// ==========================================
// Schema: db.rs initialize_schema
// Length bound: attribute_value.value <= 400 chars, checked here before
// the INSERT so the caller sees a typed error instead of a raw CHECK
// failure
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::catalog::{
    Attribute, AttributeName, AttributeValue, Company, EntityKind, RawMaterial,
    MAX_ATTRIBUTE_VALUE_LEN,
};
use crate::repository::catalog_repo::CatalogRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// SqliteCatalogRepository
// ==========================================
pub struct SqliteCatalogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCatalogRepository {
    /// Open a repository on the given database file.
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Wrap an already-configured connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| RepositoryError::InternalError("connection lock poisoned".to_string()))
    }

    fn count_table(&self, table: &str) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?;
        Ok(count as usize)
    }
}

impl CatalogRepository for SqliteCatalogRepository {
    fn candidate_names(&self, kind: EntityKind) -> RepositoryResult<Vec<(i64, String)>> {
        let conn = self.lock()?;
        let sql = match kind {
            EntityKind::Company => "SELECT id, name FROM company ORDER BY id",
            EntityKind::RawMaterial => "SELECT id, name FROM raw_material ORDER BY id",
        };
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<(i64, String)>, _>>()?;
        Ok(rows)
    }

    fn create_company(&self, name: &str) -> RepositoryResult<Company> {
        let conn = self.lock()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO company (name, created_at) VALUES (?1, ?2)",
            params![name, created_at],
        )?;

        Ok(Company {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            created_at,
        })
    }

    fn create_raw_material(
        &self,
        name: &str,
        description: Option<&str>,
        company_id: i64,
    ) -> RepositoryResult<RawMaterial> {
        let conn = self.lock()?;
        let created_at = Utc::now();
        conn.execute(
            r#"
            INSERT INTO raw_material (name, description, company_id, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![name, description, company_id, created_at],
        )?;

        Ok(RawMaterial {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            description: description.map(|d| d.to_string()),
            company_id,
            created_at,
        })
    }

    fn create_attribute(
        &self,
        raw_material_id: i64,
        attribute_name_id: i64,
    ) -> RepositoryResult<Attribute> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO attribute (raw_material_id, attribute_name_id) VALUES (?1, ?2)",
            params![raw_material_id, attribute_name_id],
        )?;

        Ok(Attribute {
            id: conn.last_insert_rowid(),
            raw_material_id,
            attribute_name_id,
        })
    }

    fn find_attribute_name(&self, name: &str) -> RepositoryResult<Option<AttributeName>> {
        let conn = self.lock()?;
        let found = conn
            .query_row(
                "SELECT id, name FROM attribute_name WHERE name = ?1",
                params![name],
                |row| {
                    Ok(AttributeName {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(found)
    }

    fn find_or_create_attribute_value(
        &self,
        attribute_name_id: i64,
        value: &str,
    ) -> RepositoryResult<AttributeValue> {
        let length = value.chars().count();
        if length > MAX_ATTRIBUTE_VALUE_LEN {
            return Err(RepositoryError::ValueTooLong {
                length,
                max: MAX_ATTRIBUTE_VALUE_LEN,
            });
        }

        let conn = self.lock()?;
        let existing = conn
            .query_row(
                r#"
                SELECT id FROM attribute_value
                WHERE attribute_name_id = ?1 AND value = ?2
                "#,
                params![attribute_name_id, value],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;

        let id = match existing {
            Some(id) => id,
            None => {
                conn.execute(
                    "INSERT INTO attribute_value (attribute_name_id, value) VALUES (?1, ?2)",
                    params![attribute_name_id, value],
                )?;
                conn.last_insert_rowid()
            }
        };

        Ok(AttributeValue {
            id,
            attribute_name_id,
            value: value.to_string(),
        })
    }

    fn attach_values(&self, attribute_id: i64, value_ids: &[i64]) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            r#"
            INSERT OR IGNORE INTO attribute_value_link (attribute_id, attribute_value_id)
            VALUES (?1, ?2)
            "#,
        )?;

        let mut attached = 0;
        for value_id in value_ids {
            attached += stmt.execute(params![attribute_id, value_id])?;
        }
        Ok(attached)
    }

    fn count_companies(&self) -> RepositoryResult<usize> {
        self.count_table("company")
    }

    fn count_raw_materials(&self) -> RepositoryResult<usize> {
        self.count_table("raw_material")
    }

    fn count_attributes(&self) -> RepositoryResult<usize> {
        self.count_table("attribute")
    }

    fn count_attribute_values(&self) -> RepositoryResult<usize> {
        self.count_table("attribute_value")
    }
}
