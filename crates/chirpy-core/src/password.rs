use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{self, SaltString, rand_core::OsRng},
};
use tracing::warn;

use crate::error::CredentialError;

/// Argon2 work factor. `m_cost` is in KiB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    pub m_cost: u32,
    pub t_cost: u32,
    pub p_cost: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            m_cost: Params::DEFAULT_M_COST,
            t_cost: Params::DEFAULT_T_COST,
            p_cost: Params::DEFAULT_P_COST,
        }
    }
}

/// Hashes plaintext passwords for storage and checks plaintext against a
/// stored PHC string. Stateless apart from the configured work factor, so a
/// single instance is shared by every request.
#[derive(Clone)]
pub struct CredentialManager {
    argon2: Argon2<'static>,
}

impl CredentialManager {
    pub fn new(params: HashParams) -> Result<Self, CredentialError> {
        let params = Params::new(params.m_cost, params.t_cost, params.p_cost, None)
            .map_err(|e| CredentialError::Hashing(format!("invalid argon2 params: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Salted Argon2id hash of `plaintext`, encoded as a PHC string.
    /// CPU and memory bound; async callers should run it on a blocking thread.
    pub fn hash_password(&self, plaintext: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| CredentialError::Hashing(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// `Ok(false)` on mismatch, `Err(MalformedHash)` when the stored value is
    /// not a usable hash. Cost parameters are taken from the stored hash.
    pub fn verify_password(&self, plaintext: &str, hash: &str) -> Result<bool, CredentialError> {
        let parsed = PasswordHash::new(hash).map_err(|_| CredentialError::MalformedHash)?;

        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(_) => Err(CredentialError::MalformedHash),
        }
    }

    /// Collapses every failure into "no match" so the caller cannot tell a
    /// wrong password from a corrupt row.
    pub fn check_password(&self, plaintext: &str, hash: &str) -> bool {
        match self.verify_password(plaintext, hash) {
            Ok(matched) => matched,
            Err(e) => {
                warn!("Password check against unusable hash: {}", e);
                false
            }
        }
    }
}

impl Default for CredentialManager {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

/// Hash with the default work factor. Services that need a configured cost
/// hold a [`CredentialManager`] instead.
pub fn hash_password(plaintext: &str) -> Result<String, CredentialError> {
    CredentialManager::default().hash_password(plaintext)
}

/// Same contract as [`CredentialManager::verify_password`].
pub fn check_hashed_password(plaintext: &str, hash: &str) -> Result<bool, CredentialError> {
    CredentialManager::default().verify_password(plaintext, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum argon2 cost keeps the suite fast.
    fn cheap() -> CredentialManager {
        CredentialManager::new(HashParams {
            m_cost: 8,
            t_cost: 1,
            p_cost: 1,
        })
        .unwrap()
    }

    #[test]
    fn hash_then_verify_matches() {
        let creds = cheap();
        let hash = creds.hash_password("04234").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(creds.verify_password("04234", &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_match() {
        let creds = cheap();
        let hash = creds.hash_password("correct horse").unwrap();

        assert!(!creds.verify_password("battery staple", &hash).unwrap());
        assert!(!creds.check_password("battery staple", &hash));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let creds = cheap();
        let first = creds.hash_password("hunter2").unwrap();
        let second = creds.hash_password("hunter2").unwrap();

        assert_ne!(first, second);
        assert!(creds.check_password("hunter2", &first));
        assert!(creds.check_password("hunter2", &second));
    }

    #[test]
    fn empty_password_is_hashable() {
        let creds = cheap();
        let hash = creds.hash_password("").unwrap();

        assert!(creds.check_password("", &hash));
        assert!(!creds.check_password(" ", &hash));
    }

    #[test]
    fn malformed_hash_is_an_error_but_never_a_match() {
        let creds = cheap();

        assert!(matches!(
            creds.verify_password("pw", "not-a-phc-string"),
            Err(CredentialError::MalformedHash)
        ));
        assert!(!creds.check_password("pw", "not-a-phc-string"));
        assert!(!creds.check_password("pw", ""));
    }

    #[test]
    fn hashes_verify_under_a_different_work_factor() {
        let hash = cheap().hash_password("portable").unwrap();
        let stronger = CredentialManager::new(HashParams {
            m_cost: 16,
            t_cost: 2,
            p_cost: 1,
        })
        .unwrap();

        assert!(stronger.check_password("portable", &hash));
    }

    #[test]
    fn free_functions_roundtrip_with_default_cost() {
        let hash = hash_password("saul goodman").unwrap();
        let again = hash_password("saul goodman").unwrap();

        assert_ne!(hash, again);
        assert!(check_hashed_password("saul goodman", &hash).unwrap());
        assert!(check_hashed_password("saul goodman", &again).unwrap());
        assert!(!check_hashed_password("jimmy mcgill", &hash).unwrap());
    }

    #[test]
    fn free_check_reports_malformed_hash() {
        assert!(matches!(
            check_hashed_password("pw", "plaintext-in-the-hash-column"),
            Err(CredentialError::MalformedHash)
        ));
    }

    #[test]
    fn free_check_accepts_hashes_from_a_configured_manager() {
        let hash = cheap().hash_password("interop").unwrap();
        assert!(check_hashed_password("interop", &hash).unwrap());
    }

    #[test]
    fn invalid_params_are_rejected() {
        let result = CredentialManager::new(HashParams {
            m_cost: 8,
            t_cost: 0,
            p_cost: 1,
        });
        assert!(matches!(result, Err(CredentialError::Hashing(_))));
    }
}
