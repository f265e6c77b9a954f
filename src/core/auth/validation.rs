//! Input validation for credential requests
//!
//! Runs before any directory lookup or hashing so malformed input never
//! reaches the service logic.

/// Maximum username length in characters (matches the `users.username` column)
pub const MAX_USERNAME_LENGTH: usize = 64;

/// bcrypt ignores everything past 72 bytes
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Credential validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Username must not be empty")]
    EmptyUsername,

    #[error("Username must be at most 64 characters")]
    UsernameTooLong,

    #[error("Username must not contain control characters")]
    UsernameControlCharacters,

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Password must be at most 72 bytes")]
    PasswordTooLong,
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::EmptyUsername);
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }

    if username.chars().any(char::is_control) {
        return Err(ValidationError::UsernameControlCharacters);
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }

    // Longer passwords would be silently truncated by bcrypt
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::PasswordTooLong);
    }

    Ok(())
}

/// Validate a username/password pair
pub fn validate_credentials(username: &str, password: &str) -> Result<(), ValidationError> {
    validate_username(username)?;
    validate_password(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username_valid() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("a").is_ok());
        assert!(validate_username("user name").is_ok());
        assert!(validate_username("пользователь").is_ok());
        assert!(validate_username(&"a".repeat(MAX_USERNAME_LENGTH)).is_ok());
    }

    #[test]
    fn test_validate_username_invalid() {
        assert_eq!(validate_username(""), Err(ValidationError::EmptyUsername));
        assert_eq!(validate_username("   "), Err(ValidationError::EmptyUsername));
        assert_eq!(
            validate_username(&"a".repeat(MAX_USERNAME_LENGTH + 1)),
            Err(ValidationError::UsernameTooLong)
        );
        assert_eq!(
            validate_username("ali\nce"),
            Err(ValidationError::UsernameControlCharacters)
        );
        assert_eq!(
            validate_username("alice\0"),
            Err(ValidationError::UsernameControlCharacters)
        );
    }

    #[test]
    fn test_username_length_counts_characters_not_bytes() {
        // 64 two-byte characters
        let username = "ж".repeat(MAX_USERNAME_LENGTH);
        assert!(validate_username(&username).is_ok());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret1").is_ok());
        assert!(validate_password(" ").is_ok());
        assert!(validate_password(&"p".repeat(MAX_PASSWORD_BYTES)).is_ok());

        assert_eq!(validate_password(""), Err(ValidationError::EmptyPassword));
        assert_eq!(
            validate_password(&"p".repeat(MAX_PASSWORD_BYTES + 1)),
            Err(ValidationError::PasswordTooLong)
        );
    }

    #[test]
    fn test_password_length_counts_bytes() {
        // 37 two-byte characters = 74 bytes
        assert_eq!(
            validate_password(&"ж".repeat(37)),
            Err(ValidationError::PasswordTooLong)
        );
    }

    #[test]
    fn test_validate_credentials_checks_username_first() {
        assert_eq!(
            validate_credentials("", ""),
            Err(ValidationError::EmptyUsername)
        );
        assert_eq!(
            validate_credentials("alice", ""),
            Err(ValidationError::EmptyPassword)
        );
        assert!(validate_credentials("alice", "secret1").is_ok());
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::UsernameTooLong.to_string(),
            "Username must be at most 64 characters"
        );
        assert_eq!(
            ValidationError::PasswordTooLong.to_string(),
            "Password must be at most 72 bytes"
        );
    }
}
