use std::time::Duration;

use vidshare_db::DEFAULT_MAX_CONNECTIONS;

/// Default seconds between subscriber notification passes.
pub const DEFAULT_NOTIFY_INTERVAL_SECS: u64 = 60;

/// Default number of videos handled per notification pass.
pub const DEFAULT_NOTIFY_BATCH_SIZE: i64 = 100;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a positive integer, got '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub notify_interval: Duration,
    pub notify_batch_size: i64,
}

impl WorkerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default  |
    /// |------------------------|----------|
    /// | `DATABASE_URL`         | required |
    /// | `DB_MAX_CONNECTIONS`   | `20`     |
    /// | `NOTIFY_INTERVAL_SECS` | `60`     |
    /// | `NOTIFY_BATCH_SIZE`    | `100`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = positive(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let interval_secs = positive(&lookup, "NOTIFY_INTERVAL_SECS", DEFAULT_NOTIFY_INTERVAL_SECS)?;
        let notify_batch_size = positive(&lookup, "NOTIFY_BATCH_SIZE", DEFAULT_NOTIFY_BATCH_SIZE)?;

        Ok(Self {
            database_url,
            max_connections,
            notify_interval: Duration::from_secs(interval_secs),
            notify_batch_size,
        })
    }
}

fn positive<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(value),
        _ => Err(ConfigError::Invalid { name, value: raw }),
    }
}
