mod database;
mod logging;
mod settings;

pub use database::{connect_database, migrate_identity_schema};
pub use logging::init_logging;
pub use settings::{AdminSeedSettings, BootstrapSettings, JwtSettings, SettingsError};
