use migration::{IdentityMigrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::config::BootstrapSettings;
use crate::errors::SchemaError;

/// Connect to the application database
///
/// Does NOT run migrations - call migrate_identity_schema() separately.
pub async fn connect_database(
    bootstrap: &BootstrapSettings,
) -> Result<DatabaseConnection, SchemaError> {
    let database_url = bootstrap.database_url();

    let db = Database::connect(database_url)
        .await
        .map_err(SchemaError::connection)?;

    tracing::debug!("Connected to database: {}", database_url);

    Ok(db)
}

/// Run identity-schema migrations (accounts, roles, memberships)
///
/// Only the tables this service owns; the legacy domain tables are patched
/// by the schema evolution helper instead.
pub async fn migrate_identity_schema(db: &DatabaseConnection) -> Result<(), SchemaError> {
    IdentityMigrator::up(db, None)
        .await
        .map_err(SchemaError::migration)?;

    tracing::debug!("Identity schema migrations completed");

    Ok(())
}
