use std::env;

use url::Url;

use crate::errors::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_LOG_FILTER: &str = "info";

pub const API_URL_VAR: &str = "FORUM_API_URL";
pub const LOG_FILTER_VAR: &str = "FORUM_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: Url,
    pub log_filter: String,
}

impl ClientConfig {
    /// Read `FORUM_API_URL` and `FORUM_LOG`, falling back to the defaults.
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(env::var(API_URL_VAR).ok(), env::var(LOG_FILTER_VAR).ok())
    }

    pub fn from_values(
        api_url: Option<String>,
        log_filter: Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_url = api_url
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        Ok(Self {
            api_url: parse_api_url(&api_url)?,
            log_filter: log_filter
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned()),
        })
    }

    /// Replace the base URL, e.g. from a command-line flag.
    pub fn with_api_url(mut self, value: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_api_url(value)?;
        Ok(self)
    }
}

fn parse_api_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|source| ConfigError::InvalidApiUrl {
        value: value.to_owned(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::NotABase(value.to_owned()));
    }
    Ok(url)
}
