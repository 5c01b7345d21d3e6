/// User input that breaks a declared constraint. Always recoverable; the API
/// layer turns these into a 400 with the message below.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Chirp is too long")]
    TooLong { length: usize, max: usize },

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The hashing primitive itself failed. Internal, never retried.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Stored hash could not be parsed or evaluated. Callers must treat this
    /// exactly like a mismatch.
    #[error("stored password hash is malformed")]
    MalformedHash,
}
