//! Repository layer for class persistence.
//!
//! # Responsibility
//! - Define the class store contract used by services and tests.
//! - Isolate SQLite query details from use-case orchestration.
//!
//! # Invariants
//! - Storage errors are returned verbatim inside `RepoError::Db`.
//! - Absence is reported through empty values, never `Err`.

pub mod class_repo;
