//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `users` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate the submitted draft before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Every operation is a single statement, one round trip, no batching.

use crate::db::DbError;
use crate::model::user::{IdType, User, UserDraft, UserId, UserSummary};
use crate::validate::{validate_draft, ValidationError};
use rusqlite::{params, Connection, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const USER_SELECT_SQL: &str = "SELECT
    id,
    id_type,
    id_number,
    given_name,
    surname,
    address,
    birth_date,
    email,
    password_hash,
    phone
FROM users";

const SUMMARY_SELECT_SQL: &str = "SELECT
    id,
    id_type,
    id_number,
    given_name,
    surname,
    address,
    birth_date,
    email,
    phone
FROM users";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for user persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound(UserId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "user not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted user data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
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

/// Repository interface for user CRUD operations.
pub trait UserRepository {
    /// Inserts one record and returns the storage-assigned identifier.
    fn create_user(&self, draft: &UserDraft, password_hash: &str) -> RepoResult<UserId>;
    /// Replaces all mutable fields; overwrites the stored hash only when a
    /// new one is supplied.
    fn update_user(
        &self,
        id: UserId,
        draft: &UserDraft,
        new_password_hash: Option<&str>,
    ) -> RepoResult<()>;
    /// Gets the full record, including the password hash.
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Looks up one record by its identification document.
    fn find_by_identification(&self, id_type: IdType, id_number: &str)
        -> RepoResult<Option<User>>;
    /// Looks up one record by email. Feeds credential verification.
    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    /// Lists display summaries for every record. The hash is never selected.
    fn list_users(&self) -> RepoResult<Vec<UserSummary>>;
    /// Removes one row. `NotFound` when the identifier does not exist.
    fn delete_user(&self, id: UserId) -> RepoResult<()>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository over a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn fetch_user(&self, where_sql: &str, bind: impl Params) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE {where_sql};"))?;
        let mut rows = stmt.query(bind)?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, draft: &UserDraft, password_hash: &str) -> RepoResult<UserId> {
        validate_draft(draft)?;

        self.conn.execute(
            "INSERT INTO users (
                id_type,
                id_number,
                given_name,
                surname,
                address,
                birth_date,
                email,
                password_hash,
                phone
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                id_type_to_db(draft.id_type),
                draft.id_number.trim(),
                draft.given_name.trim(),
                draft.surname.trim(),
                draft.address.as_deref(),
                draft.birth_date,
                draft.email.trim(),
                password_hash,
                draft.phone.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_user(
        &self,
        id: UserId,
        draft: &UserDraft,
        new_password_hash: Option<&str>,
    ) -> RepoResult<()> {
        validate_draft(draft)?;

        let changed = match new_password_hash {
            Some(hash) => self.conn.execute(
                "UPDATE users
                 SET
                    id_type = ?1,
                    id_number = ?2,
                    given_name = ?3,
                    surname = ?4,
                    address = ?5,
                    birth_date = ?6,
                    email = ?7,
                    phone = ?8,
                    password_hash = ?9,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?10;",
                params![
                    id_type_to_db(draft.id_type),
                    draft.id_number.trim(),
                    draft.given_name.trim(),
                    draft.surname.trim(),
                    draft.address.as_deref(),
                    draft.birth_date,
                    draft.email.trim(),
                    draft.phone.as_deref(),
                    hash,
                    id,
                ],
            )?,
            None => self.conn.execute(
                "UPDATE users
                 SET
                    id_type = ?1,
                    id_number = ?2,
                    given_name = ?3,
                    surname = ?4,
                    address = ?5,
                    birth_date = ?6,
                    email = ?7,
                    phone = ?8,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?9;",
                params![
                    id_type_to_db(draft.id_type),
                    draft.id_number.trim(),
                    draft.given_name.trim(),
                    draft.surname.trim(),
                    draft.address.as_deref(),
                    draft.birth_date,
                    draft.email.trim(),
                    draft.phone.as_deref(),
                    id,
                ],
            )?,
        };

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.fetch_user("id = ?1", params![id])
    }

    fn find_by_identification(
        &self,
        id_type: IdType,
        id_number: &str,
    ) -> RepoResult<Option<User>> {
        self.fetch_user(
            "id_type = ?1 AND id_number = ?2",
            params![id_type_to_db(id_type), id_number.trim()],
        )
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.fetch_user("email = ?1", params![email.trim()])
    }

    fn list_users(&self) -> RepoResult<Vec<UserSummary>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SUMMARY_SELECT_SQL} ORDER BY surname ASC, given_name ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();

        while let Some(row) = rows.next()? {
            users.push(parse_summary_row(row)?);
        }

        Ok(users)
    }

    fn delete_user(&self, id: UserId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    Ok(User {
        id: row.get("id")?,
        id_type: parse_id_type_column(row)?,
        id_number: row.get("id_number")?,
        given_name: row.get("given_name")?,
        surname: row.get("surname")?,
        address: row.get("address")?,
        birth_date: row.get("birth_date")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
        phone: row.get("phone")?,
    })
}

fn parse_summary_row(row: &Row<'_>) -> RepoResult<UserSummary> {
    Ok(UserSummary {
        id: row.get("id")?,
        id_type: parse_id_type_column(row)?,
        id_number: row.get("id_number")?,
        given_name: row.get("given_name")?,
        surname: row.get("surname")?,
        address: row.get("address")?,
        birth_date: row.get("birth_date")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
    })
}

fn parse_id_type_column(row: &Row<'_>) -> RepoResult<IdType> {
    let text: String = row.get("id_type")?;
    parse_id_type(&text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid identification type `{text}` in users.id_type"
        ))
    })
}

fn id_type_to_db(id_type: IdType) -> &'static str {
    match id_type {
        IdType::Cc => "cc",
        IdType::Nit => "nit",
        IdType::Pas => "pas",
        IdType::Ce => "ce",
    }
}

fn parse_id_type(value: &str) -> Option<IdType> {
    match value {
        "cc" => Some(IdType::Cc),
        "nit" => Some(IdType::Nit),
        "pas" => Some(IdType::Pas),
        "ce" => Some(IdType::Ce),
        _ => None,
    }
}
