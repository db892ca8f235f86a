use std::sync::Arc;

use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;

use docket_backend::api::{AuthApi, HealthApi};
use docket_backend::config::{
    connect_database, init_logging, migrate_identity_schema, AdminSeedSettings, BootstrapSettings,
    JwtSettings,
};
use docket_backend::schema::{SchemaEvolution, SqliteCatalog};
use docket_backend::services::{AccountService, AdminSeeder, TokenService};
use docket_backend::stores::{AccountStore, AuditStore, RoleStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_logging()?;

    // Configuration is loaded once here and injected; nothing below reads
    // the environment.
    let bootstrap = BootstrapSettings::from_env()?;
    let jwt_settings = JwtSettings::from_env()?;
    let admin_seed = AdminSeedSettings::from_env()?;

    let db = connect_database(&bootstrap).await?;
    migrate_identity_schema(&db).await?;

    // Patch the legacy catalog before accepting traffic; any DDL error here
    // aborts startup.
    let evolution = SchemaEvolution::new(SqliteCatalog::new(db.clone()));
    evolution.run().await?;
    tracing::info!("Schema evolution completed");

    let accounts = Arc::new(AccountStore::new(db.clone()));
    let roles = Arc::new(RoleStore::new(db.clone()));
    let audit = Arc::new(AuditStore::new(db.clone()));
    let tokens = Arc::new(TokenService::new(jwt_settings));

    let seeder = AdminSeeder::new(
        accounts.clone(),
        roles.clone(),
        audit.clone(),
        admin_seed,
    );
    if let Err(e) = seeder.run().await {
        tracing::error!("Admin seeding failed: {}", e);
    }

    let account_service = Arc::new(AccountService::new(accounts, roles, tokens, audit));
    let auth_api = AuthApi::new(account_service);

    let api_service = OpenApiService::new((HealthApi, auth_api), "Docket Backend", "0.1.0")
        .server(format!("http://{}/api", bootstrap.server_address()));
    let ui = api_service.swagger_ui();

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui);

    tracing::info!("Starting server on http://{}", bootstrap.server_address());

    Server::new(TcpListener::bind(bootstrap.server_address()))
        .run(app)
        .await?;

    Ok(())
}
