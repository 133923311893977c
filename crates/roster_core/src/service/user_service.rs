//! User gateway service.
//!
//! # Responsibility
//! - Provide the create/list/get/update/delete/authenticate operations a
//!   presentation shell drives.
//! - Acquire one scoped database connection per operation and release it
//!   on every exit path.
//!
//! # Invariants
//! - The plaintext password is hashed before any SQL is issued and is
//!   dropped with the operation's stack frame.
//! - An update without a new password leaves the stored hash untouched.
//! - Authentication failures are indistinguishable between unknown email
//!   and wrong password.

use crate::db::{open_db, DbError};
use crate::model::user::{IdType, User, UserDraft, UserId, UserSummary};
use crate::password::{hash_password, verify_password, PasswordHashError};
use crate::repo::user_repo::{RepoError, SqliteUserRepository, UserRepository};
use crate::validate::{validate_draft, validate_new_password, ValidationError};
use log::info;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Storage location handed to the gateway at construction time.
///
/// Connectivity knobs live in this value, not in process-wide state, so
/// two gateways over different files can coexist in one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the SQLite database file.
    pub db_path: PathBuf,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

pub type ServiceResult<T> = Result<T, UserServiceError>;

/// Gateway error surfaced to presentation shells.
#[derive(Debug)]
pub enum UserServiceError {
    /// Field input rejected before any write was attempted.
    Validation(ValidationError),
    /// Password hash derivation failed.
    Password(PasswordHashError),
    /// Target record does not exist.
    UserNotFound(UserId),
    /// Persistence-layer failure; the driver message is preserved.
    Repo(RepoError),
}

impl Display for UserServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Password(err) => write!(f, "{err}"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UserServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Password(err) => Some(err),
            Self::UserNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for UserServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PasswordHashError> for UserServiceError {
    fn from(value: PasswordHashError) -> Self {
        Self::Password(value)
    }
}

impl From<RepoError> for UserServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::UserNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<DbError> for UserServiceError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

/// Gateway facade over user persistence.
///
/// Every operation opens its own connection against the configured file
/// and drops it when the operation returns, success or failure.
pub struct UserService {
    config: StoreConfig,
}

impl UserService {
    /// Creates a gateway for the given storage location.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Returns the storage configuration this gateway was built with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Validates the draft, hashes the password and inserts a new record.
    ///
    /// Returns the storage-assigned identifier.
    pub fn create_user(&self, draft: &UserDraft, password: &str) -> ServiceResult<UserId> {
        validate_draft(draft)?;
        validate_new_password(password)?;
        let hash = hash_password(password)?;

        let conn = self.connect()?;
        let id = SqliteUserRepository::new(&conn).create_user(draft, &hash)?;
        info!("event=user_create module=service status=ok user_id={id}");
        Ok(id)
    }

    /// Lists display summaries for every record.
    pub fn list_users(&self) -> ServiceResult<Vec<UserSummary>> {
        let conn = self.connect()?;
        Ok(SqliteUserRepository::new(&conn).list_users()?)
    }

    /// Gets the full record for one identifier, or `None`.
    pub fn get_user(&self, id: UserId) -> ServiceResult<Option<User>> {
        let conn = self.connect()?;
        Ok(SqliteUserRepository::new(&conn).get_user(id)?)
    }

    /// Looks up one record by its identification document, or `None`.
    pub fn find_by_identification(
        &self,
        id_type: IdType,
        id_number: &str,
    ) -> ServiceResult<Option<User>> {
        let conn = self.connect()?;
        Ok(SqliteUserRepository::new(&conn).find_by_identification(id_type, id_number)?)
    }

    /// Replaces all mutable fields of an existing record.
    ///
    /// When `new_password` is supplied it is re-hashed and overwrites the
    /// stored hash; otherwise the stored hash is preserved untouched.
    pub fn update_user(
        &self,
        id: UserId,
        draft: &UserDraft,
        new_password: Option<&str>,
    ) -> ServiceResult<()> {
        validate_draft(draft)?;
        let new_hash = match new_password {
            Some(password) => {
                validate_new_password(password)?;
                Some(hash_password(password)?)
            }
            None => None,
        };

        let conn = self.connect()?;
        SqliteUserRepository::new(&conn).update_user(id, draft, new_hash.as_deref())?;
        info!(
            "event=user_update module=service status=ok user_id={id} password_changed={}",
            new_hash.is_some()
        );
        Ok(())
    }

    /// Removes one record. `UserNotFound` when the identifier is unknown.
    ///
    /// Operator confirmation stays in the shell; this call is unconditional.
    pub fn delete_user(&self, id: UserId) -> ServiceResult<()> {
        let conn = self.connect()?;
        SqliteUserRepository::new(&conn).delete_user(id)?;
        info!("event=user_delete module=service status=ok user_id={id}");
        Ok(())
    }

    /// Verifies a credential pair and returns the record's public fields.
    ///
    /// Unknown email and wrong password both yield `None`; the error
    /// channel is reserved for storage faults.
    pub fn authenticate(&self, email: &str, password: &str) -> ServiceResult<Option<UserSummary>> {
        let conn = self.connect()?;
        let Some(user) = SqliteUserRepository::new(&conn).find_by_email(email)? else {
            info!("event=user_auth module=service status=denied");
            return Ok(None);
        };

        if verify_password(password, &user.password_hash) {
            info!(
                "event=user_auth module=service status=ok user_id={}",
                user.id
            );
            Ok(Some(user.summary()))
        } else {
            info!("event=user_auth module=service status=denied");
            Ok(None)
        }
    }

    fn connect(&self) -> ServiceResult<Connection> {
        Ok(open_db(&self.config.db_path)?)
    }
}
