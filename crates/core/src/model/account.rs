use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::LanguageId;

const USERNAME_CHARS: std::ops::RangeInclusive<usize> = 3..=20;
const PASSWORD_CHARS: std::ops::RangeInclusive<usize> = 8..=16;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccountError {
    #[error("username is required")]
    UsernameRequired,

    #[error("username must be between 3 and 20 characters")]
    UsernameLength,

    #[error("password is required")]
    PasswordRequired,

    #[error("password must be between 8 and 16 characters")]
    PasswordLength,

    #[error("email address is not valid")]
    InvalidEmail,

    #[error("a language must be chosen")]
    LanguageRequired,
}

impl AccountError {
    /// Form field the error belongs to, using the backend's field names.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            AccountError::UsernameRequired | AccountError::UsernameLength => "username",
            AccountError::PasswordRequired | AccountError::PasswordLength => "password",
            AccountError::InvalidEmail => "email",
            AccountError::LanguageRequired => "language",
        }
    }
}

//
// ─── FIELD RULES ───────────────────────────────────────────────────────────────
//

/// # Errors
///
/// Returns `AccountError` if the username is blank or its length is out of range.
pub fn validate_username(username: &str) -> Result<(), AccountError> {
    if username.trim().is_empty() {
        return Err(AccountError::UsernameRequired);
    }
    if !USERNAME_CHARS.contains(&username.chars().count()) {
        return Err(AccountError::UsernameLength);
    }
    Ok(())
}

/// An empty password is accepted when `required` is false (profile edits keep
/// the old password).
///
/// # Errors
///
/// Returns `AccountError` if the password is missing or its length is out of range.
pub fn validate_password(password: &str, required: bool) -> Result<(), AccountError> {
    if password.is_empty() {
        return if required {
            Err(AccountError::PasswordRequired)
        } else {
            Ok(())
        };
    }
    if !PASSWORD_CHARS.contains(&password.chars().count()) {
        return Err(AccountError::PasswordLength);
    }
    Ok(())
}

/// Accepts `local@domain.tld` with no whitespace and exactly one `@`.
///
/// # Errors
///
/// Returns `AccountError::InvalidEmail` otherwise.
pub fn validate_email(email: &str) -> Result<(), AccountError> {
    let valid = !email.chars().any(char::is_whitespace)
        && email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .rsplit_once('.')
                    .is_some_and(|(name, tld)| !name.is_empty() && !tld.is_empty())
        });
    if valid {
        Ok(())
    } else {
        Err(AccountError::InvalidEmail)
    }
}

/// # Errors
///
/// Returns `AccountError::LanguageRequired` for the "nothing selected" id 0.
pub fn validate_language(id: LanguageId) -> Result<(), AccountError> {
    if id.value() == 0 {
        return Err(AccountError::LanguageRequired);
    }
    Ok(())
}

//
// ─── REQUEST / RESPONSE SHAPES ─────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// # Errors
    ///
    /// Returns the first failing field rule.
    pub fn validate(&self) -> Result<(), AccountError> {
        validate_username(&self.username)?;
        validate_password(&self.password, true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub learning_language_id: LanguageId,
    pub native_language_id: LanguageId,
}

impl Registration {
    /// # Errors
    ///
    /// Returns the first failing field rule.
    pub fn validate(&self) -> Result<(), AccountError> {
        validate_username(&self.username)?;
        validate_email(&self.email)?;
        validate_password(&self.password, true)?;
        validate_language(self.learning_language_id)?;
        validate_language(self.native_language_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub username: String,
    pub email: String,
    pub learning_language: String,
    pub native_language: String,
    pub learning_language_id: LanguageId,
    pub native_language_id: LanguageId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub learning_language_id: LanguageId,
    pub native_language_id: LanguageId,
}

impl ProfileUpdate {
    /// # Errors
    ///
    /// Returns the first failing field rule.
    pub fn validate(&self) -> Result<(), AccountError> {
        validate_username(&self.username)?;
        validate_email(&self.email)?;
        validate_password(self.password.as_deref().unwrap_or_default(), false)?;
        validate_language(self.learning_language_id)?;
        validate_language(self.native_language_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert_eq!(validate_username("  "), Err(AccountError::UsernameRequired));
        assert_eq!(validate_username("ab"), Err(AccountError::UsernameLength));
        assert_eq!(
            validate_username(&"x".repeat(21)),
            Err(AccountError::UsernameLength)
        );
        assert!(validate_username("anna").is_ok());
    }

    #[test]
    fn password_optional_on_profile_update() {
        assert!(validate_password("", false).is_ok());
        assert_eq!(validate_password("", true), Err(AccountError::PasswordRequired));
        assert_eq!(validate_password("short", false), Err(AccountError::PasswordLength));
        assert!(validate_password("longenough", true).is_ok());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a b@c.de").is_err());
        assert!(validate_email("@c.de").is_err());
        assert!(validate_email("a@@c.de").is_err());
    }

    #[test]
    fn registration_requires_languages() {
        let registration = Registration {
            username: "anna".into(),
            email: "anna@example.com".into(),
            password: "secret123".into(),
            learning_language_id: LanguageId::new(2),
            native_language_id: LanguageId::new(0),
        };
        let err = registration.validate().unwrap_err();
        assert_eq!(err, AccountError::LanguageRequired);
        assert_eq!(err.field(), "language");
    }

    #[test]
    fn profile_update_omits_empty_password_from_payload() {
        let update = ProfileUpdate {
            username: "anna".into(),
            email: "anna@example.com".into(),
            password: None,
            learning_language_id: LanguageId::new(1),
            native_language_id: LanguageId::new(2),
        };
        assert!(update.validate().is_ok());
        let value = serde_json::to_value(&update).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["learningLanguageId"], 1);
    }
}
