// Internal types shared across stores and services
pub mod audit;
pub mod auth;
