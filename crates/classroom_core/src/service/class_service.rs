//! Class use-case service.
//!
//! # Responsibility
//! - Provide stable class entry points for core callers.
//! - Delegate persistence to a `ClassRepository` implementation.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::class::{Class, ClassListPage, ClassListReq};
use crate::repo::class_repo::{ClassRepository, RepoResult};

/// Use-case service wrapper for class operations.
pub struct ClassService<R: ClassRepository> {
    repo: R,
}

impl<R: ClassRepository> ClassService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a class owned by `teacher_id`.
    pub fn create_class(&mut self, teacher_id: &str, class: &Class) -> RepoResult<()> {
        self.repo.insert_class(teacher_id, class)
    }

    pub fn update_class(&self, class: &Class) -> RepoResult<()> {
        self.repo.update_class(class)
    }

    /// Deletes a class on behalf of `teacher_id`.
    ///
    /// Other teachers' links to the class are left untouched.
    pub fn delete_class(&mut self, teacher_id: &str, class_id: &str) -> RepoResult<()> {
        self.repo.delete_class(teacher_id, class_id)
    }

    /// Gets one class; a missing class comes back as `Class::default()`.
    pub fn get_class(&self, class_id: &str) -> RepoResult<Class> {
        self.repo.query_class(class_id)
    }

    /// Gets one class with absence made explicit.
    ///
    /// Same read as `get_class`; the zero-value class maps to `None`.
    pub fn find_class(&self, class_id: &str) -> RepoResult<Option<Class>> {
        let class = self.repo.query_class(class_id)?;
        Ok((!class.is_empty()).then_some(class))
    }

    /// Lists classes validly owned by `teacher_id`, one page at a time.
    pub fn list_classes(&self, teacher_id: &str, req: &ClassListReq) -> RepoResult<ClassListPage> {
        self.repo.query_class_list(teacher_id, req)
    }

    pub fn teacher_owns_class(&self, teacher_id: &str, class_id: &str) -> RepoResult<bool> {
        self.repo.check_teacher_class(teacher_id, class_id)
    }

    /// Returns whether any class name contains `name`.
    pub fn class_name_taken(&self, name: &str) -> RepoResult<bool> {
        self.repo.check_class_name(name)
    }

    /// Releases the wrapped repository.
    pub fn into_inner(self) -> R {
        self.repo
    }
}
