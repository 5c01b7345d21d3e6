use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use chirpy_api::Platform;
use chirpy_core::{HashParams, PasswordPolicy, ProfanityFilter};

/// Server settings, read from `CHIRPY_*` environment variables (after `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub platform: Platform,
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub fileserver_root: PathBuf,
    pub password_policy: PasswordPolicy,
    pub banned_words: Option<Vec<String>>,
    pub hash_params: HashParams,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let platform = lookup("CHIRPY_PLATFORM")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| anyhow!("CHIRPY_PLATFORM must be set (e.g. \"dev\")"))?;

        let defaults = HashParams::default();

        Ok(Self {
            platform: Platform::parse(&platform),
            host: lookup("CHIRPY_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "CHIRPY_PORT", 8080)?,
            db_path: lookup("CHIRPY_DB_PATH")
                .unwrap_or_else(|| "chirpy.db".into())
                .into(),
            fileserver_root: lookup("CHIRPY_FILESERVER_ROOT")
                .unwrap_or_else(|| ".".into())
                .into(),
            password_policy: PasswordPolicy::new(parse_or(&lookup, "CHIRPY_MIN_PASSWORD_LEN", 0)?),
            banned_words: lookup("CHIRPY_BANNED_WORDS").map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|w| !w.is_empty())
                    .map(str::to_string)
                    .collect()
            }),
            hash_params: HashParams {
                m_cost: parse_or(&lookup, "CHIRPY_ARGON2_M_COST", defaults.m_cost)?,
                t_cost: parse_or(&lookup, "CHIRPY_ARGON2_T_COST", defaults.t_cost)?,
                p_cost: parse_or(&lookup, "CHIRPY_ARGON2_P_COST", defaults.p_cost)?,
            },
        })
    }

    pub fn profanity_filter(&self) -> ProfanityFilter {
        match &self.banned_words {
            Some(words) => ProfanityFilter::new(words),
            None => ProfanityFilter::default(),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}
