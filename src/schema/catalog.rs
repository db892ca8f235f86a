use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::errors::SchemaError;

/// Catalog introspection and DDL execution for one database backend
///
/// The evolution steps are written against this trait so that a backend
/// other than SQLite only needs to implement its own metadata queries.
#[async_trait]
pub trait SchemaCatalog: Send + Sync {
    /// Whether a table with this name exists
    async fn has_table(&self, table: &str) -> Result<bool, SchemaError>;

    /// Whether the table has a column with this name
    async fn has_column(&self, table: &str, column: &str) -> Result<bool, SchemaError>;

    /// Whether an index with this name exists
    async fn has_index(&self, index: &str) -> Result<bool, SchemaError>;

    /// Execute a raw DDL statement
    async fn execute(&self, ddl: &str) -> Result<(), SchemaError>;
}

/// SchemaCatalog over the SQLite metadata catalog
pub struct SqliteCatalog {
    db: DatabaseConnection,
}

impl SqliteCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn query_exists(
        &self,
        object: &str,
        sql: &str,
        values: Vec<sea_orm::Value>,
    ) -> Result<bool, SchemaError> {
        let row = self
            .db
            .query_one(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                sql,
                values,
            ))
            .await
            .map_err(|e| SchemaError::catalog(object, e))?;

        Ok(row.is_some())
    }
}

#[async_trait]
impl SchemaCatalog for SqliteCatalog {
    async fn has_table(&self, table: &str) -> Result<bool, SchemaError> {
        self.query_exists(
            table,
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
            vec![table.into()],
        )
        .await
    }

    async fn has_column(&self, table: &str, column: &str) -> Result<bool, SchemaError> {
        self.query_exists(
            table,
            "SELECT name FROM pragma_table_info(?) WHERE name = ?",
            vec![table.into(), column.into()],
        )
        .await
    }

    async fn has_index(&self, index: &str) -> Result<bool, SchemaError> {
        self.query_exists(
            index,
            "SELECT name FROM sqlite_master WHERE type = 'index' AND name = ?",
            vec![index.into()],
        )
        .await
    }

    async fn execute(&self, ddl: &str) -> Result<(), SchemaError> {
        self.db
            .execute_unprepared(ddl)
            .await
            .map_err(|e| SchemaError::ddl(ddl, e))?;

        Ok(())
    }
}

impl std::fmt::Debug for SqliteCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteCatalog")
            .field("db", &"<connection>")
            .finish()
    }
}
