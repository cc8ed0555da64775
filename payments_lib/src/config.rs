//! Client configuration: defaults, optional TOML file, environment overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::validation;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

pub const ENV_API_URL: &str = "PAYMENTS_API_URL";
pub const ENV_PAGE_SIZE: &str = "PAYMENTS_PAGE_SIZE";
pub const ENV_USER_ID: &str = "PAYMENTS_USER_ID";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Resolved client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Gateway base URL.
    pub api_url: String,
    /// Page size used by list views.
    pub page_size: u32,
    /// Acting user. Commands that need a user fail when this is unset.
    pub user_id: Option<i64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            user_id: None,
        }
    }
}

impl Config {
    /// Defaults, then the file at `path` (if any), then process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_env(|key| std::env::var(key).ok())?.validated()
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Applies overrides from `lookup`, which maps variable names to values.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(size) = lookup(ENV_PAGE_SIZE) {
            self.page_size = size.trim().parse().map_err(|_| ConfigError::Invalid {
                key: ENV_PAGE_SIZE,
                reason: format!("'{}' is not a number", size),
            })?;
        }
        if let Some(user) = lookup(ENV_USER_ID) {
            self.user_id = Some(user.trim().parse().map_err(|_| ConfigError::Invalid {
                key: ENV_USER_ID,
                reason: format!("'{}' is not a number", user),
            })?);
        }
        Ok(self)
    }

    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.api_url =
            validation::validate_api_url(&self.api_url).map_err(|e| ConfigError::Invalid {
                key: "api_url",
                reason: e.to_string(),
            })?;
        validation::validate_page_size(self.page_size).map_err(|e| ConfigError::Invalid {
            key: "page_size",
            reason: e.to_string(),
        })?;
        if let Some(user_id) = self.user_id {
            validation::validate_id(user_id, "user id").map_err(|e| ConfigError::Invalid {
                key: "user_id",
                reason: e.to_string(),
            })?;
        }
        Ok(self)
    }
}
