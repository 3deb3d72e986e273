//! Domain model for classes and teacher ownership.
//!
//! # Responsibility
//! - Define the data structures passed across the store boundary.
//!
//! # Invariants
//! - Class deletion is a hard delete; link deletion is a soft flag flip.

pub mod class;
