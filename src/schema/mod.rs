// Schema evolution - startup-time idempotent patching of the legacy catalog
pub mod catalog;
pub mod evolution;

pub use catalog::{SchemaCatalog, SqliteCatalog};
pub use evolution::SchemaEvolution;
