//! Class store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist classes in `t_class` and teacher ownership in `t_teacher_class`.
//! - Keep both tables consistent for class creation and deletion.
//! - Answer pagination and existence queries over the two tables.
//!
//! # Invariants
//! - `insert_class` and `delete_class` touch both tables inside one atomic
//!   unit; a failure in either write leaves neither applied.
//! - Every predicate value is a bound parameter.
//! - "Not found" is never an error: reads return the zero-value class,
//!   an empty page, or `false`.
//! - `delete_class` only invalidates the calling teacher's link. Links of
//!   other teachers to the same class stay valid after the class row is
//!   gone, and still count toward their `total`.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{run_atomic, DbError};
use crate::model::class::{Class, ClassListPage, ClassListReq, LinkState};
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CLASS_SELECT_SQL: &str = "SELECT
    class_id,
    name,
    college,
    major
FROM t_class";

const REQUIRED_TABLES: [&str; 2] = ["t_class", "t_teacher_class"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from class store operations.
#[derive(Debug)]
pub enum RepoError {
    /// Storage engine error, surfaced verbatim.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted value cannot be mapped to the read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "class store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "class store requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted class data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::InvalidData(_) => None,
        }
    }
}

impl RepoError {
    /// Short stable code for `error_code=` log fields.
    pub fn log_code(&self) -> &'static str {
        match self {
            Self::Db(err) => err.log_code(),
            Self::UninitializedConnection { .. } => "uninitialized_connection",
            Self::MissingRequiredTable(_) => "missing_required_table",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence operations over classes and teacher-class links.
pub trait ClassRepository {
    /// Creates a class row and a valid link for `teacher_id` atomically.
    fn insert_class(&mut self, teacher_id: &str, class: &Class) -> RepoResult<()>;
    /// Overwrites name/college/major of the class with `class.class_id`.
    ///
    /// Zero matching rows is not an error.
    fn update_class(&self, class: &Class) -> RepoResult<()>;
    /// Hard-deletes the class row and invalidates this teacher's link atomically.
    fn delete_class(&mut self, teacher_id: &str, class_id: &str) -> RepoResult<()>;
    /// Returns the class, or `Class::default()` when no row matches.
    fn query_class(&self, class_id: &str) -> RepoResult<Class>;
    /// Returns one page of classes validly linked to `teacher_id`.
    fn query_class_list(&self, teacher_id: &str, req: &ClassListReq)
        -> RepoResult<ClassListPage>;
    /// Returns whether a valid link exists for the exact pair.
    fn check_teacher_class(&self, teacher_id: &str, class_id: &str) -> RepoResult<bool>;
    /// Returns whether any class name contains `name`.
    fn check_class_name(&self, name: &str) -> RepoResult<bool>;
}

/// SQLite-backed class store over an injected connection.
pub struct SqliteClassStore<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteClassStore<'conn> {
    /// Constructs a store from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not the latest.
    /// - `MissingRequiredTable` when a class table is absent.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_class_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ClassRepository for SqliteClassStore<'_> {
    fn insert_class(&mut self, teacher_id: &str, class: &Class) -> RepoResult<()> {
        let result = run_atomic(self.conn, |tx| -> RepoResult<()> {
            tx.execute(
                "INSERT INTO t_class (class_id, name, college, major)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    class.class_id.as_str(),
                    class.name.as_str(),
                    class.college.as_str(),
                    class.major.as_str(),
                ],
            )?;
            tx.execute(
                "INSERT INTO t_teacher_class (class_id, teacher_id, is_valid)
                 VALUES (?1, ?2, ?3);",
                params![class.class_id.as_str(), teacher_id, LinkState::Valid.to_db()],
            )?;
            Ok(())
        });

        match &result {
            Ok(()) => debug!(
                "event=class_insert module=repo status=ok class_id={}",
                class.class_id
            ),
            Err(err) => warn!(
                "event=class_insert module=repo status=rolled_back class_id={} error_code={} error={}",
                class.class_id,
                err.log_code(),
                err
            ),
        }
        result
    }

    fn update_class(&self, class: &Class) -> RepoResult<()> {
        self.conn.execute(
            "UPDATE t_class
             SET
                name = ?1,
                college = ?2,
                major = ?3
             WHERE class_id = ?4;",
            params![
                class.name.as_str(),
                class.college.as_str(),
                class.major.as_str(),
                class.class_id.as_str(),
            ],
        )?;
        Ok(())
    }

    fn delete_class(&mut self, teacher_id: &str, class_id: &str) -> RepoResult<()> {
        let result = run_atomic(self.conn, |tx| -> RepoResult<(usize, usize)> {
            let removed = tx.execute("DELETE FROM t_class WHERE class_id = ?1;", [class_id])?;
            let invalidated = tx.execute(
                "UPDATE t_teacher_class
                 SET is_valid = ?1
                 WHERE teacher_id = ?2
                   AND class_id = ?3;",
                params![LinkState::Invalid.to_db(), teacher_id, class_id],
            )?;
            Ok((removed, invalidated))
        });

        match result {
            Ok((removed, invalidated)) => {
                debug!(
                    "event=class_delete module=repo status=ok class_id={} classes_removed={} links_invalidated={}",
                    class_id, removed, invalidated
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=class_delete module=repo status=rolled_back class_id={} error_code={} error={}",
                    class_id,
                    err.log_code(),
                    err
                );
                Err(err)
            }
        }
    }

    fn query_class(&self, class_id: &str) -> RepoResult<Class> {
        let class = self
            .conn
            .query_row(
                &format!("{CLASS_SELECT_SQL} WHERE class_id = ?1;"),
                [class_id],
                parse_class_row,
            )
            .optional()?;
        Ok(class.unwrap_or_default())
    }

    fn query_class_list(
        &self,
        teacher_id: &str,
        req: &ClassListReq,
    ) -> RepoResult<ClassListPage> {
        let valid = LinkState::Valid.to_db();

        let mut stmt = self.conn.prepare(
            "SELECT
                c.class_id,
                c.name,
                c.college,
                c.major
             FROM t_class c
             INNER JOIN t_teacher_class tc ON tc.class_id = c.class_id
             WHERE tc.teacher_id = ?1
               AND tc.is_valid = ?2
             LIMIT ?3 OFFSET ?4;",
        )?;
        let classes = stmt
            .query_map(
                params![teacher_id, valid, req.limit(), req.offset()],
                parse_class_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        // Counts links, not joined rows: dangling valid links are included.
        let total: i64 = self.conn.query_row(
            "SELECT COUNT(id)
             FROM t_teacher_class
             WHERE teacher_id = ?1
               AND is_valid = ?2;",
            params![teacher_id, valid],
            |row| row.get(0),
        )?;
        let total = u64::try_from(total)
            .map_err(|_| RepoError::InvalidData(format!("negative link count `{total}`")))?;

        Ok(ClassListPage { classes, total })
    }

    fn check_teacher_class(&self, teacher_id: &str, class_id: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM t_teacher_class
                WHERE teacher_id = ?1
                  AND class_id = ?2
                  AND is_valid = ?3
            );",
            params![teacher_id, class_id, LinkState::Valid.to_db()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn check_class_name(&self, name: &str) -> RepoResult<bool> {
        let pattern = format!("%{name}%");
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM t_class
                WHERE name LIKE ?1
            );",
            [pattern.as_str()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_class_row(row: &Row<'_>) -> rusqlite::Result<Class> {
    Ok(Class {
        class_id: row.get(0)?,
        name: row.get(1)?,
        college: row.get(2)?,
        major: row.get(3)?,
    })
}

fn ensure_class_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
