//! Infrastructure layer: configuration, database wiring, repository adapters.

pub mod config;
pub mod db;
pub mod repositories;

pub use config::{AppConfig, ConfigError, DatabaseConfig};
pub use repositories::{
    InMemoryApprovalRepository, InMemoryInvoiceRepository, PostgresApprovalRepository,
    PostgresInvoiceRepository,
};
