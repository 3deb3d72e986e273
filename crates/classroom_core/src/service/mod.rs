//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep outer layers decoupled from storage details.

pub mod class_service;
