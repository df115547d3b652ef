use crate::access::AccessLists;
use crate::constants::env;
use crate::pattern::{PatternError, PatternList};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid pattern in {variable}")]
    InvalidPattern {
        variable: &'static str,
        #[source]
        source: PatternError,
    },
    #[error("{variable} must be a positive number of milliseconds, got `{value}`")]
    InvalidTimeout { variable: &'static str, value: String },
}

/// Settings shared read-only by every request the proxy handles.
#[derive(Clone, Debug, Default)]
pub struct ProxyConfig {
    pub access: AccessLists,
    pub upstream_timeout: Option<Duration>,
}

impl ProxyConfig {
    pub fn new(access: AccessLists) -> Self {
        Self {
            access,
            upstream_timeout: None,
        }
    }

    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = Some(timeout);
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source. Missing or blank list
    /// variables yield empty lists.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access = AccessLists {
            whitelist_origins: pattern_list(&lookup, env::WHITELIST_ORIGINS)?,
            blacklist_origins: pattern_list(&lookup, env::BLACKLIST_ORIGINS)?,
            whitelist_urls: pattern_list(&lookup, env::WHITELIST_URLS)?,
            blacklist_urls: pattern_list(&lookup, env::BLACKLIST_URLS)?,
        };

        Ok(Self {
            access,
            upstream_timeout: upstream_timeout(&lookup)?,
        })
    }
}

fn pattern_list<F>(lookup: &F, variable: &'static str) -> Result<PatternList, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(variable) {
        Some(raw) => PatternList::parse(&raw)
            .map_err(|source| ConfigError::InvalidPattern { variable, source }),
        None => Ok(PatternList::new()),
    }
}

fn upstream_timeout<F>(lookup: &F) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(env::UPSTREAM_TIMEOUT_MS) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<u64>() {
        Ok(millis) if millis > 0 => Ok(Some(Duration::from_millis(millis))),
        _ => Err(ConfigError::InvalidTimeout {
            variable: env::UPSTREAM_TIMEOUT_MS,
            value: raw,
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
