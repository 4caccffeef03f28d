use std::env;

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    api_url: String,
    user_agent: String,
}

fn default_user_agent() -> String {
    format!("github_user_search/{}", env!("CARGO_PKG_VERSION"))
}

impl AppConfig {
    /// Build configuration from `GITHUB_API_URL` and `GITHUB_USER_AGENT`.
    /// `.env` is loaded by the binary before this runs.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(
            env::var("GITHUB_API_URL").ok(),
            env::var("GITHUB_USER_AGENT").ok(),
        )
    }

    pub fn new(api_url: Option<String>, user_agent: Option<String>) -> Result<Self, ConfigError> {
        let api_url = api_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let parsed = Url::parse(&api_url).map_err(|err| {
            ConfigError::Invalid(format!("GITHUB_API_URL {api_url:?} is not a valid URL: {err}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
            return Err(ConfigError::Invalid(format!(
                "GITHUB_API_URL must be an http(s) URL, got {api_url:?}"
            )));
        }

        let user_agent = user_agent
            .map(|ua| ua.trim().to_string())
            .filter(|ua| !ua.is_empty())
            .unwrap_or_else(default_user_agent);

        Ok(Self { api_url, user_agent })
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(self, api_url: Option<String>, user_agent: Option<String>) -> Result<Self, ConfigError> {
        Self::new(
            api_url.or(Some(self.api_url)),
            user_agent.or(Some(self.user_agent)),
        )
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
