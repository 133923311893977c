//! User record model.
//!
//! # Responsibility
//! - Define the stored record, the raw draft submitted by a shell, and the
//!   display read model.
//!
//! # Invariants
//! - `id` is assigned by storage on create and never reused afterwards.
//! - `password_hash` is a PHC-format string; plaintext never enters the model.
//! - `UserSummary` must not carry the password hash.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable surrogate identifier assigned by storage on create.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type UserId = i64;

/// Identification document category accepted by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdType {
    /// Citizen identity card.
    Cc,
    /// Tax identification number.
    Nit,
    /// Passport.
    Pas,
    /// Foreigner identity card.
    Ce,
}

/// Full stored record, including the password hash.
///
/// Only lookup paths that feed credential verification should handle this
/// shape; anything display-bound goes through [`UserSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Storage-assigned surrogate key.
    pub id: UserId,
    /// Serialized as `id_type` on the wire.
    pub id_type: IdType,
    /// Identification document number. Required, non-empty.
    pub id_number: String,
    /// Given name. Required, non-empty.
    pub given_name: String,
    /// Surname. Required, non-empty.
    pub surname: String,
    /// Postal address, free-form.
    pub address: Option<String>,
    /// Calendar birth date, stored as ISO `YYYY-MM-DD`.
    pub birth_date: Option<NaiveDate>,
    /// Contact and login email. Required, unique in storage.
    pub email: String,
    /// Salted one-way hash in PHC string format.
    pub password_hash: String,
    /// Dialing-friendly phone number with optional extension suffix.
    pub phone: Option<String>,
}

/// Raw field values as submitted by a presentation shell.
///
/// A draft has no identity and no credential hash; it is what the record
/// validator checks and what write operations consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub id_type: IdType,
    pub id_number: String,
    pub given_name: String,
    pub surname: String,
    pub address: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    pub phone: Option<String>,
}

/// Display read model: every public field, never the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub id_type: IdType,
    pub id_number: String,
    pub given_name: String,
    pub surname: String,
    pub address: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    pub phone: Option<String>,
}

impl User {
    /// Projects the stored record onto its display shape.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            id_type: self.id_type,
            id_number: self.id_number.clone(),
            given_name: self.given_name.clone(),
            surname: self.surname.clone(),
            address: self.address.clone(),
            birth_date: self.birth_date,
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    /// Returns the mutable field values of this record as a draft.
    ///
    /// Used by update flows that re-submit a loaded record with edits.
    pub fn draft(&self) -> UserDraft {
        UserDraft {
            id_type: self.id_type,
            id_number: self.id_number.clone(),
            given_name: self.given_name.clone(),
            surname: self.surname.clone(),
            address: self.address.clone(),
            birth_date: self.birth_date,
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}
