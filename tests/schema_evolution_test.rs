// Idempotence of the startup schema patcher

use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

use docket_backend::schema::{SchemaEvolution, SqliteCatalog};

async fn setup_legacy_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    // A subset of the legacy case-management tables, with pre-existing rows
    for ddl in [
        "CREATE TABLE clients (id INTEGER PRIMARY KEY, name TEXT)",
        "CREATE TABLE cases (id INTEGER PRIMARY KEY, title TEXT)",
        "CREATE TABLE courts (id INTEGER PRIMARY KEY, name TEXT)",
        "INSERT INTO cases (title) VALUES ('Estate of Example')",
        "INSERT INTO cases (title) VALUES ('Example v. Example')",
    ] {
        db.execute_unprepared(ddl).await.expect("Failed to seed legacy table");
    }

    db
}

async fn query_rows(db: &DatabaseConnection, sql: &str) -> Vec<sea_orm::QueryResult> {
    db.query_all(Statement::from_string(DatabaseBackend::Sqlite, sql))
        .await
        .expect("Query failed")
}

async fn firm_id_column_count(db: &DatabaseConnection, table: &str) -> usize {
    query_rows(
        db,
        &format!(
            "SELECT name FROM pragma_table_info('{}') WHERE name = 'firm_id'",
            table
        ),
    )
    .await
    .len()
}

async fn index_count(db: &DatabaseConnection, name: &str) -> usize {
    query_rows(
        db,
        &format!(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND name = '{}'",
            name
        ),
    )
    .await
    .len()
}

#[tokio::test]
async fn test_run_adds_tenant_columns_and_indexes() {
    let db = setup_legacy_db().await;
    let evolution = SchemaEvolution::new(SqliteCatalog::new(db.clone()));

    evolution.run().await.expect("Evolution should succeed");

    for table in ["clients", "cases", "courts"] {
        assert_eq!(firm_id_column_count(&db, table).await, 1, "table {}", table);
        assert_eq!(
            index_count(&db, &format!("idx_{}_firm_id", table)).await,
            1,
            "index for {}",
            table
        );
    }
}

#[tokio::test]
async fn test_existing_rows_are_tagged_with_default_firm() {
    let db = setup_legacy_db().await;
    let evolution = SchemaEvolution::new(SqliteCatalog::new(db.clone()));

    evolution.run().await.expect("Evolution should succeed");

    let rows = query_rows(&db, "SELECT firm_id FROM cases").await;
    assert_eq!(rows.len(), 2);
    for row in rows {
        let firm_id: i64 = row.try_get("", "firm_id").expect("firm_id should be readable");
        assert_eq!(firm_id, 1);
    }
}

#[tokio::test]
async fn test_run_twice_is_idempotent() {
    let db = setup_legacy_db().await;
    let evolution = SchemaEvolution::new(SqliteCatalog::new(db.clone()));

    evolution.run().await.expect("First run should succeed");
    evolution.run().await.expect("Second run should succeed");

    // No duplicate columns or indexes
    assert_eq!(firm_id_column_count(&db, "cases").await, 1);
    assert_eq!(index_count(&db, "idx_cases_firm_id").await, 1);
    assert_eq!(index_count(&db, "idx_audit_events_timestamp").await, 1);
    assert_eq!(index_count(&db, "idx_audit_events_account").await, 1);
}

#[tokio::test]
async fn test_absent_legacy_tables_are_skipped() {
    // Only a single legacy table exists; the rest of the fixed list must
    // be skipped without error.
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    db.execute_unprepared("CREATE TABLE cases (id INTEGER PRIMARY KEY, title TEXT)")
        .await
        .unwrap();

    let evolution = SchemaEvolution::new(SqliteCatalog::new(db.clone()));
    evolution.run().await.expect("Evolution should succeed");

    assert_eq!(firm_id_column_count(&db, "cases").await, 1);
    // Skipped tables were not created
    assert_eq!(
        query_rows(
            &db,
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'clients'"
        )
        .await
        .len(),
        0
    );
}

#[tokio::test]
async fn test_audit_table_is_created_in_full() {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    let evolution = SchemaEvolution::new(SqliteCatalog::new(db.clone()));
    evolution.ensure_audit_log_table().await.expect("Ensure should succeed");

    let columns = query_rows(&db, "SELECT name FROM pragma_table_info('audit_events')").await;
    assert_eq!(columns.len(), 6);
    assert_eq!(index_count(&db, "idx_audit_events_timestamp").await, 1);
    assert_eq!(index_count(&db, "idx_audit_events_account").await, 1);

    // Re-running the ensure changes nothing
    evolution.ensure_audit_log_table().await.expect("Repeat should succeed");
    assert_eq!(index_count(&db, "idx_audit_events_timestamp").await, 1);
}
