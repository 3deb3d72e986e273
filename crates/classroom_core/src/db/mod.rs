//! SQLite storage bootstrap, schema migrations and atomic write units.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the class store.
//! - Apply schema migrations in deterministic order.
//! - Offer an all-or-nothing unit for multi-statement writes.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Store code must not read/write class data before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod atomic;
pub mod migrations;
mod open;

pub use atomic::run_atomic;
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage engine and schema bootstrap failures.
#[derive(Debug)]
pub enum DbError {
    /// Error reported by SQLite, kept as-is for the caller.
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build with more migrations.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Returns whether SQLite rejected a write on a table constraint
    /// (primary key, CHECK, or a trigger `RAISE(ABORT)`).
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Sqlite(rusqlite::Error::SqliteFailure(failure, _))
                if failure.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }

    /// Short stable code for `error_code=` log fields.
    pub fn log_code(&self) -> &'static str {
        match self {
            _ if self.is_constraint_violation() => "constraint_violation",
            Self::Sqlite(_) => "sqlite_error",
            Self::UnsupportedSchemaVersion { .. } => "unsupported_schema_version",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => Display::fmt(err, f),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "schema version {db_version} is not supported (this build knows up to {latest_supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Sqlite(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use rusqlite::Connection;

    #[test]
    fn constraint_failures_get_their_own_log_code() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v INTEGER PRIMARY KEY); INSERT INTO t VALUES (1);")
            .unwrap();
        let err = DbError::from(conn.execute("INSERT INTO t VALUES (1);", []).unwrap_err());
        assert!(err.is_constraint_violation());
        assert_eq!(err.log_code(), "constraint_violation");

        let err = DbError::from(conn.execute("SELECT * FROM missing;", []).unwrap_err());
        assert!(!err.is_constraint_violation());
        assert_eq!(err.log_code(), "sqlite_error");

        let err = DbError::UnsupportedSchemaVersion {
            db_version: 9,
            latest_supported: 1,
        };
        assert_eq!(err.log_code(), "unsupported_schema_version");
        assert!(err.to_string().contains("up to 1"));
    }
}
