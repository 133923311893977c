//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, hashing and repository calls into the
//!   operations a presentation shell consumes.
//! - Keep shells decoupled from storage details.

pub mod user_service;
