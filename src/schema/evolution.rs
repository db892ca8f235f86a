use crate::errors::SchemaError;
use crate::schema::SchemaCatalog;

/// Tenant column added to every shared domain table
pub const TENANT_COLUMN: &str = "firm_id";

/// Default firm for rows that predate multi-tenancy
pub const DEFAULT_FIRM_ID: i64 = 1;

/// The legacy domain tables that carry a tenant column, in patch order.
/// These tables are created and owned by the case-management application;
/// only the tenant column and its index belong to this service.
pub const TENANT_TABLES: [&str; 8] = [
    "clients",
    "employees",
    "cases",
    "courts",
    "contenders",
    "case_files",
    "billing_entries",
    "signature_requests",
];

/// Audit log table ensured at startup
pub const AUDIT_TABLE: &str = "audit_events";

const AUDIT_TABLE_DDL: &str = "CREATE TABLE audit_events (\
    id INTEGER PRIMARY KEY AUTOINCREMENT, \
    timestamp TEXT NOT NULL, \
    event_type TEXT NOT NULL, \
    account_id TEXT, \
    ip_address TEXT, \
    data TEXT NOT NULL\
)";

const AUDIT_INDEX_TIMESTAMP: &str = "idx_audit_events_timestamp";
const AUDIT_INDEX_ACCOUNT: &str = "idx_audit_events_account";

/// Startup-time schema patcher
///
/// Each step checks the catalog before writing, so the whole run is safe to
/// repeat. Steps are independent; there is no transaction spanning tables
/// and no rollback. Any error is returned to the caller and aborts startup.
pub struct SchemaEvolution<C: SchemaCatalog> {
    catalog: C,
}

impl<C: SchemaCatalog> SchemaEvolution<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Run every evolution step: tenant columns first, then the audit table
    pub async fn run(&self) -> Result<(), SchemaError> {
        self.ensure_tenant_columns().await?;
        self.ensure_audit_log_table().await
    }

    /// Ensure each legacy table carries the tenant column and its index
    ///
    /// Tables absent from the catalog are skipped - the legacy application
    /// may not have created them yet.
    pub async fn ensure_tenant_columns(&self) -> Result<(), SchemaError> {
        for table in TENANT_TABLES {
            self.patch_table(table).await?;
        }
        Ok(())
    }

    async fn patch_table(&self, table: &str) -> Result<(), SchemaError> {
        if !self.catalog.has_table(table).await? {
            tracing::debug!("Table '{}' not present, skipping tenant patch", table);
            return Ok(());
        }

        if !self.catalog.has_column(table, TENANT_COLUMN).await? {
            let ddl = format!(
                "ALTER TABLE {} ADD COLUMN {} INTEGER NOT NULL DEFAULT {}",
                table, TENANT_COLUMN, DEFAULT_FIRM_ID
            );
            self.catalog.execute(&ddl).await?;
            tracing::info!("Added tenant column to '{}'", table);
        }

        let index_name = format!("idx_{}_{}", table, TENANT_COLUMN);
        if !self.catalog.has_index(&index_name).await? {
            let ddl = format!(
                "CREATE INDEX {} ON {} ({})",
                index_name, table, TENANT_COLUMN
            );
            self.catalog.execute(&ddl).await?;
            tracing::info!("Created index '{}'", index_name);
        }

        Ok(())
    }

    /// Ensure the audit log table exists in full (columns + two indexes)
    pub async fn ensure_audit_log_table(&self) -> Result<(), SchemaError> {
        if !self.catalog.has_table(AUDIT_TABLE).await? {
            self.catalog.execute(AUDIT_TABLE_DDL).await?;
            tracing::info!("Created table '{}'", AUDIT_TABLE);
        }

        if !self.catalog.has_index(AUDIT_INDEX_TIMESTAMP).await? {
            let ddl = format!(
                "CREATE INDEX {} ON {} (timestamp)",
                AUDIT_INDEX_TIMESTAMP, AUDIT_TABLE
            );
            self.catalog.execute(&ddl).await?;
        }

        if !self.catalog.has_index(AUDIT_INDEX_ACCOUNT).await? {
            let ddl = format!(
                "CREATE INDEX {} ON {} (account_id)",
                AUDIT_INDEX_ACCOUNT, AUDIT_TABLE
            );
            self.catalog.execute(&ddl).await?;
        }

        Ok(())
    }
}

impl<C: SchemaCatalog> std::fmt::Debug for SchemaEvolution<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaEvolution").finish()
    }
}
