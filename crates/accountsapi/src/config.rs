//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Environment variable holding the service base URL.
pub const ACCOUNTS_ADDRESS_KEY: &str = "ACCOUNTS_ADDRESS";
/// Environment variable holding the organisation id.
pub const ORGANISATION_ID_KEY: &str = "ORGANISATION_ID";
/// Optional environment variable overriding the request timeout, in milliseconds.
pub const TIMEOUT_MS_KEY: &str = "ACCOUNTS_TIMEOUT_MS";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Accounts client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Service base URL, e.g. `http://localhost:8080`.
    pub base_url: Url,
    /// Organisation that owns created accounts.
    pub organisation_id: String,
    /// Upper bound on each request, connection included.
    pub timeout: Duration,
}

impl Config {
    /// Creates a configuration with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or cannot carry a path.
    pub fn new(base_url: impl AsRef<str>, organisation_id: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("base URL '{base_url}' cannot carry a path")));
        }

        Ok(Self {
            base_url,
            organisation_id: organisation_id.into(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads the configuration from the process environment.
    ///
    /// `ACCOUNTS_ADDRESS` and `ORGANISATION_ID` must be set and non-empty;
    /// `ACCOUNTS_TIMEOUT_MS` is optional.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first missing or unusable setting.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::Config(format!("setting with key '{key}' is empty")))
        };

        let base_url = required(ACCOUNTS_ADDRESS_KEY)?;
        let organisation_id = required(ORGANISATION_ID_KEY)?;
        let mut config = Self::new(base_url, organisation_id)?;

        if let Some(raw) = lookup(TIMEOUT_MS_KEY).filter(|value| !value.is_empty()) {
            let millis: u64 = raw.parse().map_err(|_| {
                Error::Config(format!(
                    "setting with key '{TIMEOUT_MS_KEY}' must be milliseconds, got '{raw}'"
                ))
            })?;
            config = config.with_timeout(Duration::from_millis(millis));
        }

        Ok(config)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_new() {
        let config = Config::new("http://accountapi:8080", "orgid").unwrap();
        assert_eq!(config.base_url.as_str(), "http://accountapi:8080/");
        assert_eq!(config.organisation_id, "orgid");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_config_bad_url() {
        assert!(matches!(
            Config::new("htt@ps:bla//", "orgid"),
            Err(Error::Url(_) | Error::Config(_))
        ));
        assert!(Config::new("mailto:someone@example.com", "orgid").is_err());
    }

    #[test]
    fn test_from_lookup() {
        let config = Config::from_lookup(lookup(&[
            (ACCOUNTS_ADDRESS_KEY, "http://localhost:8080"),
            (ORGANISATION_ID_KEY, "an-uuidv4"),
        ]))
        .unwrap();
        assert_eq!(config.organisation_id, "an-uuidv4");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_from_lookup_timeout() {
        let config = Config::from_lookup(lookup(&[
            (ACCOUNTS_ADDRESS_KEY, "http://localhost:8080"),
            (ORGANISATION_ID_KEY, "an-uuidv4"),
            (TIMEOUT_MS_KEY, "500"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Duration::from_millis(500));

        let err = Config::from_lookup(lookup(&[
            (ACCOUNTS_ADDRESS_KEY, "http://localhost:8080"),
            (ORGANISATION_ID_KEY, "an-uuidv4"),
            (TIMEOUT_MS_KEY, "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_MS_KEY));
    }

    #[test]
    fn test_from_lookup_empty_values() {
        let err = Config::from_lookup(lookup(&[
            (ACCOUNTS_ADDRESS_KEY, ""),
            (ORGANISATION_ID_KEY, ""),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(ACCOUNTS_ADDRESS_KEY));
    }

    #[test]
    fn test_from_lookup_missing_values() {
        let err = Config::from_lookup(lookup(&[(ACCOUNTS_ADDRESS_KEY, "http://localhost")]))
            .unwrap_err();
        assert!(err.to_string().contains(ORGANISATION_ID_KEY));
    }
}
