use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use murmur_db::PoolConfig;

/// Server settings read from `MURMUR_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub pool: PoolConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = PoolConfig::default();
        let acquire_ms: u64 = parse_or(
            &lookup,
            "MURMUR_DB_ACQUIRE_TIMEOUT_MS",
            defaults.acquire_timeout.as_millis() as u64,
        )?;

        Ok(Self {
            host: lookup("MURMUR_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "MURMUR_PORT", 8080)?,
            db_path: lookup("MURMUR_DB_PATH")
                .unwrap_or_else(|| "murmur.db".into())
                .into(),
            pool: PoolConfig {
                readers: parse_or(&lookup, "MURMUR_DB_READERS", defaults.readers)?,
                acquire_timeout: Duration::from_millis(acquire_ms),
            },
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}
