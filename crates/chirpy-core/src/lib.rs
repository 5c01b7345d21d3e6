//! Chirpy core library
//!
//! The pieces every request passes through before it reaches storage:
//! - `password`: Argon2id credential hashing and verification
//! - `sanitize`: profanity masking for chirp bodies
//! - `validate`: length, email and password-policy checks
//!
//! Nothing in here does I/O or holds state between calls.

pub mod error;
pub mod password;
pub mod sanitize;
pub mod validate;

pub use error::{CredentialError, ValidationError};
pub use password::{CredentialManager, HashParams, check_hashed_password, hash_password};
pub use sanitize::{ProfanityFilter, sanitize};
pub use validate::{MAX_CHIRP_LENGTH, PasswordPolicy, classify_email, validate_chirp_length};
