// Error types: API-facing (auth) and internal (schema/seed/audit)
pub mod auth;
pub mod internal;

pub use auth::AuthError;
pub use internal::{AuditError, SchemaError, SeedError};
