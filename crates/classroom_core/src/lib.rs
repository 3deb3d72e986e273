//! Class persistence core for the teaching platform.
//! Owns the class table, teacher-class ownership links and the queries
//! over them.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::class::{Class, ClassId, ClassListPage, ClassListReq, LinkState};
pub use repo::class_repo::{ClassRepository, RepoError, RepoResult, SqliteClassStore};
pub use service::class_service::ClassService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
