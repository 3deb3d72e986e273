//! Class domain model.
//!
//! # Responsibility
//! - Define the class record persisted in `t_class`.
//! - Define list/pagination request and response shapes.
//! - Define the teacher-class link validity flag.
//!
//! # Invariants
//! - `class_id` is assigned by the caller and never changes after creation.
//! - A zero-value `Class` (empty `class_id`) stands for "no such class".
//! - A link only moves `Valid -> Invalid`; no code path writes `Valid`
//!   over an existing row.

use serde::{Deserialize, Serialize};

/// Externally assigned class identifier.
pub type ClassId = String;

/// Class record with descriptive attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    #[serde(rename = "classID")]
    pub class_id: ClassId,
    pub name: String,
    pub college: String,
    pub major: String,
}

impl Class {
    pub fn new(
        class_id: impl Into<ClassId>,
        name: impl Into<String>,
        college: impl Into<String>,
        major: impl Into<String>,
    ) -> Self {
        Self {
            class_id: class_id.into(),
            name: name.into(),
            college: college.into(),
            major: major.into(),
        }
    }

    /// Returns whether this is the zero-value class returned for a missing row.
    pub fn is_empty(&self) -> bool {
        self.class_id.is_empty()
    }
}

/// Page request for a teacher's class list.
///
/// `page_num` is 1-based. Callers must pass `page_num >= 1`; a zero page
/// produces a negative offset that is handed to the engine as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassListReq {
    pub page_num: u32,
    pub page_size: u32,
}

impl ClassListReq {
    pub fn new(page_num: u32, page_size: u32) -> Self {
        Self {
            page_num,
            page_size,
        }
    }

    /// Row offset of the first item on this page.
    ///
    /// Saturates at `i64::MAX`, which reads as a page past the end.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page_num) - 1).saturating_mul(i64::from(self.page_size))
    }

    /// Maximum rows on this page.
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

/// One page of classes plus the teacher's total valid link count.
///
/// `total` and `classes` come from two separate reads, so a concurrent
/// write between them can make them disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassListPage {
    pub classes: Vec<Class>,
    pub total: u64,
}

/// Validity flag of a teacher-class link row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkState {
    /// Teacher currently owns the class.
    Valid,
    /// Link was soft-invalidated by a class deletion.
    Invalid,
}

impl LinkState {
    /// Integer stored in `t_teacher_class.is_valid`.
    pub fn to_db(self) -> i64 {
        match self {
            Self::Valid => 1,
            Self::Invalid => 0,
        }
    }
}
