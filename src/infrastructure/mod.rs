//! Infrastructure layer - external concerns

pub mod database;
pub mod notifications;
pub mod seed;
pub mod storage;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use notifications::EventBusNotifier;
pub use seed::seed_default_catalog;
pub use storage::InMemoryRepositoryProvider;
