//! All-or-nothing execution of multi-table writes.
//!
//! # Invariants
//! - The closure's writes are committed only when it returns `Ok`.
//! - Any error (from the closure or from commit) leaves no partial state;
//!   the transaction is rolled back when dropped uncommitted.
//! - Errors are returned to the caller unchanged.

use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Runs `work` inside one IMMEDIATE transaction on `conn`.
///
/// IMMEDIATE takes the write lock up front, so two concurrent units on the
/// same database file serialize instead of failing mid-way on lock upgrade.
///
/// # Errors
/// - Returns the first error raised by `work`, after rolling back.
/// - Returns begin/commit failures converted through `E: From<rusqlite::Error>`.
pub fn run_atomic<T, E, F>(conn: &mut Connection, work: F) -> Result<T, E>
where
    E: From<rusqlite::Error>,
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
{
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let value = work(&tx)?;
    tx.commit()?;
    Ok(value)
}
