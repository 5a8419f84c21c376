use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite:data.db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "FOODWASTE_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Config {
    /// Read `DATABASE_URL` and `BIND_ADDR`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
        }
    }
}
