//! Database schema initialization and migrations.

use log::info;

use crate::error::{DatabaseResultExt, Result};

/// Columns added after the first schema, with their DDL.
const ADDED_COLUMNS: &[(&str, &str)] = &[
    ("plan_name", "ALTER TABLE plans ADD COLUMN plan_name TEXT"),
    (
        "substitutions",
        "ALTER TABLE plans ADD COLUMN substitutions TEXT NOT NULL DEFAULT '[]'",
    ),
];

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()
    }

    /// Adds the columns missing from databases created by older versions.
    fn apply_migrations(&self) -> Result<()> {
        for (column, ddl) in ADDED_COLUMNS {
            if !self.has_column("plans", column)? {
                info!("Migrating plans table: adding column {column}");
                self.connection
                    .execute(ddl, [])
                    .db_context("Failed to migrate plans table")?;
            }
        }
        Ok(())
    }

    fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        self.connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
                [table, column],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .db_context("Failed to inspect table columns")
    }
}
