use crate::error::ValidationError;

pub const MAX_CHIRP_LENGTH: usize = 140;

/// Rejects bodies longer than [`MAX_CHIRP_LENGTH`] characters. Run on the raw
/// body, before sanitizing.
///
/// Counts Unicode scalar values, not UTF-8 bytes: a 140-character body of
/// multi-byte text is accepted even though it is longer than 140 bytes. This
/// differs from the earlier byte-length check on purpose.
pub fn validate_chirp_length(body: &str) -> Result<(), ValidationError> {
    let length = body.chars().count();
    if length > MAX_CHIRP_LENGTH {
        return Err(ValidationError::TooLong {
            length,
            max: MAX_CHIRP_LENGTH,
        });
    }
    Ok(())
}

/// Empty email means "no email": stored as NULL.
pub fn classify_email(email: &str) -> Option<&str> {
    if email.is_empty() { None } else { Some(email) }
}

/// Minimum password length applied at registration. The default (0) accepts
/// anything, including the empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl PasswordPolicy {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    pub fn validate(&self, password: &str) -> Result<(), ValidationError> {
        if password.chars().count() < self.min_length {
            return Err(ValidationError::PasswordTooShort {
                min: self.min_length,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chirp_length_boundary() {
        assert!(validate_chirp_length("").is_ok());
        assert!(validate_chirp_length(&"a".repeat(140)).is_ok());
        assert_eq!(
            validate_chirp_length(&"a".repeat(141)),
            Err(ValidationError::TooLong {
                length: 141,
                max: 140
            })
        );
    }

    #[test]
    fn chirp_length_counts_characters_not_bytes() {
        let body = "é".repeat(140);
        assert_eq!(body.len(), 280);
        assert!(validate_chirp_length(&body).is_ok());
    }

    #[test]
    fn too_long_message() {
        let err = validate_chirp_length(&"x".repeat(200)).unwrap_err();
        assert_eq!(err.to_string(), "Chirp is too long");
    }

    #[test]
    fn email_classification() {
        assert_eq!(classify_email(""), None);
        assert_eq!(classify_email("saul@bettercall.com"), Some("saul@bettercall.com"));
        // No format checks.
        assert_eq!(classify_email("not an email"), Some("not an email"));
    }

    #[test]
    fn default_policy_accepts_everything() {
        let policy = PasswordPolicy::default();
        assert!(policy.validate("").is_ok());
        assert!(policy.validate("x").is_ok());
    }

    #[test]
    fn policy_enforces_minimum() {
        let policy = PasswordPolicy::new(8);
        assert_eq!(
            policy.validate("short"),
            Err(ValidationError::PasswordTooShort { min: 8 })
        );
        assert!(policy.validate("longenough").is_ok());
    }
}
