use std::sync::Arc;

use chirpy_core::{CredentialManager, PasswordPolicy, ProfanityFilter};
use chirpy_db::Database;

use crate::metrics::Metrics;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub credentials: CredentialManager,
    pub profanity: ProfanityFilter,
    pub password_policy: PasswordPolicy,
    pub metrics: Metrics,
    pub platform: Platform,
}

impl AppStateInner {
    pub fn new(
        db: Database,
        credentials: CredentialManager,
        profanity: ProfanityFilter,
        password_policy: PasswordPolicy,
        platform: Platform,
    ) -> Self {
        Self {
            db,
            credentials,
            profanity,
            password_policy,
            metrics: Metrics::default(),
            platform,
        }
    }
}

/// Deployment the server believes it runs in. Destructive admin endpoints
/// only work on `Dev`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Dev,
    Other(String),
}

impl Platform {
    pub fn parse(value: &str) -> Self {
        match value {
            "dev" => Self::Dev,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dev => f.write_str("dev"),
            Self::Other(name) => f.write_str(name),
        }
    }
}
