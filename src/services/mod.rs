// Services layer - Business logic and orchestration
pub mod account_service;
pub mod admin_seeder;
pub mod audit_logger;
pub mod crypto;
pub mod token_service;

pub use account_service::AccountService;
pub use admin_seeder::AdminSeeder;
pub use token_service::{IssuedToken, TokenService};
