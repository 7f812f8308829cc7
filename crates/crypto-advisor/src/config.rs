//! Advisor configuration
//!
//! Loaded from environment variables (a `.env` file is read by the binary
//! before this runs):
//!
//! | variable               | default                            |
//! |------------------------|------------------------------------|
//! | `COINGECKO_API_URL`    | `https://api.coingecko.com/api/v3` |
//! | `COINGECKO_API_KEY`    | unset (public tier)                |
//! | `ADVISOR_TIMEOUT_SECS` | `10`                               |
//! | `ADVISOR_NAME`         | `CryptoBuddy`                      |

use std::time::Duration;

use crate::error::{AdvisorError, Result};

pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_NAME: &str = "CryptoBuddy";

#[derive(Clone, Debug)]
pub struct AdvisorConfig {
    /// CoinGecko API base URL
    pub api_url: String,

    /// Demo API key, sent as `x-cg-demo-api-key`
    pub api_key: Option<String>,

    /// Upper bound on one price fetch, in seconds
    pub timeout_secs: u64,

    /// Name the assistant answers as
    pub name: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            name: DEFAULT_NAME.into(),
        }
    }
}

impl AdvisorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let timeout_secs = match get("ADVISOR_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                AdvisorError::Config(format!("ADVISOR_TIMEOUT_SECS must be a whole number, got '{raw}'"))
            })?,
            None => defaults.timeout_secs,
        };

        let config = Self {
            api_url: get("COINGECKO_API_URL").unwrap_or(defaults.api_url),
            api_key: get("COINGECKO_API_KEY"),
            timeout_secs,
            name: get("ADVISOR_NAME").unwrap_or(defaults.name),
        };
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(AdvisorError::Config("timeout must be at least 1 second".into()));
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(AdvisorError::Config(format!(
                "API URL must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
