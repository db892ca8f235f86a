// Stores layer - Data access and repository pattern
pub mod account_store;
pub mod audit_store;
pub mod role_store;

pub use account_store::{AccountStore, NewAccount};
pub use audit_store::AuditStore;
pub use role_store::RoleStore;
