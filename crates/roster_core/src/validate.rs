//! Record validator for user field input.
//!
//! # Responsibility
//! - Check raw field values before any write is attempted.
//! - Surface the failing rule to the caller; never perform I/O.
//!
//! # Invariants
//! - Required fields are judged after trimming surrounding whitespace.
//! - Optional fields are only shape-checked when a value is present.

use crate::model::user::UserDraft;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\+\d{1,3}[ .-]?)?\d{7,15}(?:\s*(?:ext\.?|extensión|x)\s*\d{1,6})?$")
        .expect("valid phone regex")
});

pub type ValidationResult = Result<(), ValidationError>;

/// Field-level acceptance failure reported to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty or whitespace-only.
    MissingField(&'static str),
    /// Email does not match the `local@domain.tld` shape.
    InvalidEmail(String),
    /// Phone does not match the dialing-friendly pattern.
    InvalidPhone(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is empty"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
            Self::InvalidPhone(value) => write!(f, "invalid phone number: `{value}`"),
        }
    }
}

impl Error for ValidationError {}

/// Checks every field rule for a submitted draft.
///
/// # Contract
/// - Required: `id_number`, `given_name`, `surname`, `email`.
/// - Email must match one `@`, a dotted domain, no embedded whitespace.
/// - Phone is checked only when present and non-blank.
///
/// Password presence is a create-time rule and is checked separately via
/// [`validate_new_password`], since updates may legitimately omit it.
pub fn validate_draft(draft: &UserDraft) -> ValidationResult {
    require_non_blank("id_number", &draft.id_number)?;
    require_non_blank("given_name", &draft.given_name)?;
    require_non_blank("surname", &draft.surname)?;
    require_non_blank("email", &draft.email)?;
    validate_email(&draft.email)?;

    if let Some(phone) = draft.phone.as_deref() {
        if !phone.trim().is_empty() {
            validate_phone(phone)?;
        }
    }

    Ok(())
}

/// Checks that a newly supplied password credential is non-empty.
pub fn validate_new_password(password: &str) -> ValidationResult {
    require_non_blank("password", password)
}

/// Checks one value against the email shape rule.
pub fn validate_email(value: &str) -> ValidationResult {
    let trimmed = value.trim();
    if EMAIL_RE.is_match(trimmed) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(trimmed.to_string()))
    }
}

/// Checks one value against the phone shape rule.
///
/// Accepts an optional `+` with 1-3 country-code digits, 7-15 subscriber
/// digits, and an optional `ext`/`ext.`/`extensión`/`x` suffix with digits.
pub fn validate_phone(value: &str) -> ValidationResult {
    let trimmed = value.trim();
    if PHONE_RE.is_match(trimmed) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone(trimmed.to_string()))
    }
}

fn require_non_blank(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        validate_draft, validate_email, validate_new_password, validate_phone, ValidationError,
    };
    use crate::model::user::{IdType, UserDraft};

    fn valid_draft() -> UserDraft {
        UserDraft {
            id_type: IdType::Cc,
            id_number: "1002003000".to_string(),
            given_name: "Ana".to_string(),
            surname: "Rojas".to_string(),
            address: Some("Calle 12 #3-45".to_string()),
            birth_date: None,
            email: "ana.rojas@example.com".to_string(),
            phone: Some("+57 3001234567".to_string()),
        }
    }

    #[test]
    fn valid_draft_passes_every_rule() {
        assert_eq!(validate_draft(&valid_draft()), Ok(()));
    }

    #[test]
    fn blank_required_fields_name_the_field() {
        let mut draft = valid_draft();
        draft.id_number = "   ".to_string();
        assert_eq!(
            validate_draft(&draft),
            Err(ValidationError::MissingField("id_number"))
        );

        let mut draft = valid_draft();
        draft.given_name = String::new();
        assert_eq!(
            validate_draft(&draft),
            Err(ValidationError::MissingField("given_name"))
        );

        let mut draft = valid_draft();
        draft.surname = "\t".to_string();
        assert_eq!(
            validate_draft(&draft),
            Err(ValidationError::MissingField("surname"))
        );

        let mut draft = valid_draft();
        draft.email = String::new();
        assert_eq!(
            validate_draft(&draft),
            Err(ValidationError::MissingField("email"))
        );
    }

    #[test]
    fn email_rule_accepts_conventional_shapes() {
        assert_eq!(validate_email("a@b.co"), Ok(()));
        assert_eq!(validate_email("first.last@sub.domain.org"), Ok(()));
    }

    #[test]
    fn email_rule_rejects_malformed_values() {
        for value in ["a@b", "a.b.com", "a b@c.com", "a@@b.co", "@b.co"] {
            assert_eq!(
                validate_email(value),
                Err(ValidationError::InvalidEmail(value.to_string())),
                "value {value}"
            );
        }
    }

    #[test]
    fn phone_rule_accepts_dialing_friendly_values() {
        for value in [
            "+57 3001234567",
            "3001234567 ext 123",
            "+1-5551234567",
            "3001234567 extensión 9",
            "3001234567 x42",
        ] {
            assert_eq!(validate_phone(value), Ok(()), "value {value}");
        }
    }

    #[test]
    fn phone_rule_rejects_short_or_non_numeric_values() {
        for value in ["abc", "123", "300-123", "3001234567 ext"] {
            assert_eq!(
                validate_phone(value),
                Err(ValidationError::InvalidPhone(value.to_string())),
                "value {value}"
            );
        }
    }

    #[test]
    fn blank_phone_is_skipped_but_malformed_phone_fails() {
        let mut draft = valid_draft();
        draft.phone = Some("   ".to_string());
        assert_eq!(validate_draft(&draft), Ok(()));

        draft.phone = Some("abc".to_string());
        assert_eq!(
            validate_draft(&draft),
            Err(ValidationError::InvalidPhone("abc".to_string()))
        );
    }

    #[test]
    fn new_password_must_be_non_blank() {
        assert_eq!(validate_new_password("hunter2"), Ok(()));
        assert_eq!(
            validate_new_password("   "),
            Err(ValidationError::MissingField("password"))
        );
    }
}
