// API layer - HTTP endpoints
pub mod auth;
pub mod health;

pub use auth::AuthApi;
pub use health::HealthApi;
