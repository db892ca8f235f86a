// Database entities - SeaORM models
pub mod account;
pub mod account_role;
pub mod audit_event;
pub mod role;
