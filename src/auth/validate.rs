//! Client-side form validation.
//!
//! Rules run in a fixed order and the first failure wins, so the user
//! always sees one specific, actionable message. Nothing here touches
//! the network.

use regex::Regex;
use thiserror::Error;

/// Minimum username length in characters
const MIN_USERNAME_LENGTH: usize = 3;

/// Minimum password length in characters
const MIN_PASSWORD_LENGTH: usize = 8;

/// Symbols the password policy accepts (and requires one of)
const PASSWORD_SYMBOLS: &str = "@$!%*?&#";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username must be at least 3 characters long.")]
    UsernameTooShort,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Password must be at least 8 characters long and include uppercase, lowercase, number, and special character (@, $, !, %, *, ?, &, #).")]
    WeakPassword,
}

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// Password policy: length, one of each character class, and no
/// characters outside the allowed alphabet.
pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
        && password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c))
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

/// Validate a registration form. Order: username, email, password.
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), ValidationError> {
    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooShort);
    }
    validate_login(email, password)
}

/// Validate a login form. The password rule is re-checked even though
/// the account was created under the same policy; a failure here saves
/// a round trip the server would reject anyway.
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if !valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !valid_password(password) {
        return Err(ValidationError::WeakPassword);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email_accepts_normal_addresses() {
        assert!(valid_email("a@b.com"));
        assert!(valid_email("first.last@sub.example.org"));
        assert!(valid_email("user+tag@domain.tld"));
    }

    #[test]
    fn test_valid_email_rejects_bad_shapes() {
        assert!(!valid_email(""));
        assert!(!valid_email("plainaddress"));
        assert!(!valid_email("@no-local.com"));
        assert!(!valid_email("no-domain@"));
        assert!(!valid_email("no-tld@domain"));
        assert!(!valid_email("spaces in@domain.com"));
        assert!(!valid_email("two@@signs.com"));
    }

    #[test]
    fn test_valid_password_accepts_policy_match() {
        assert!(valid_password("Abcdef1!"));
        assert!(valid_password("Xy9#aaaa"));
        assert!(valid_password("LongerPassw0rd?"));
    }

    #[test]
    fn test_valid_password_rejects_missing_classes() {
        assert!(!valid_password("abcdef1!")); // no uppercase
        assert!(!valid_password("ABCDEF1!")); // no lowercase
        assert!(!valid_password("Abcdefg!")); // no digit
        assert!(!valid_password("Abcdefg1")); // no symbol
    }

    #[test]
    fn test_valid_password_rejects_short() {
        assert!(!valid_password("Abc1!ab")); // 7 chars
        assert!(!valid_password(""));
    }

    #[test]
    fn test_valid_password_rejects_foreign_symbols() {
        // '^' is outside the allowed set even with all classes present
        assert!(!valid_password("Abcdef1^"));
        assert!(!valid_password("Abcdef1! ")); // trailing space
    }

    #[test]
    fn test_registration_order_first_failure_wins() {
        assert_eq!(
            validate_registration("ab", "bad-email", "weak"),
            Err(ValidationError::UsernameTooShort)
        );
        assert_eq!(
            validate_registration("abc", "bad-email", "weak"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_registration("abc", "a@b.com", "weak"),
            Err(ValidationError::WeakPassword)
        );
        assert_eq!(validate_registration("abc", "a@b.com", "Abcdef1!"), Ok(()));
    }

    #[test]
    fn test_login_validation() {
        assert_eq!(
            validate_login("nope", "Abcdef1!"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_login("a@b.com", "short"),
            Err(ValidationError::WeakPassword)
        );
        assert_eq!(validate_login("a@b.com", "Abcdef1!"), Ok(()));
    }
}
