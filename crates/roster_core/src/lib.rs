//! Core domain logic for the operator user registry.
//! This crate is the single source of truth for record validation and
//! persistence invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod password;
pub mod repo;
pub mod service;
pub mod validate;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::user::{IdType, User, UserDraft, UserId, UserSummary};
pub use password::{hash_password, verify_password, PasswordHashError};
pub use repo::user_repo::{RepoError, RepoResult, SqliteUserRepository, UserRepository};
pub use service::user_service::{ServiceResult, StoreConfig, UserService, UserServiceError};
pub use validate::{validate_draft, validate_email, validate_phone, ValidationError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
