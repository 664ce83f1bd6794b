//! Configuration module
//!
//! The diary server is configured entirely from environment variables, read
//! once at start-up into a [`DiaryConfig`] value that is then handed to the
//! API client. Nothing reads the environment after that.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::DiaryError;

pub const API_BASE_VAR: &str = "DIARY_API_BASE";
pub const TIMEOUT_VAR: &str = "DIARY_API_TIMEOUT_SECS";
pub const LOG_FILE_VAR: &str = "DIARY_MCP_LOG_FILE";

const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiaryConfig {
    /// Backend base URL without trailing slash, e.g. `http://localhost:8000`
    pub api_base: String,
    pub request_timeout: Duration,
    /// Append logs to this file instead of stderr
    pub log_file: Option<PathBuf>,
}

impl DiaryConfig {
    pub fn new(api_base: &str) -> Result<Self, DiaryError> {
        Ok(Self {
            api_base: normalize_base(api_base)?,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_file: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, DiaryError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DiaryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base = get(API_BASE_VAR).ok_or_else(|| {
            DiaryError::ConfigurationMissing(format!(
                "{} must be set to the diary API base URL",
                API_BASE_VAR
            ))
        })?;

        let request_timeout = match get(TIMEOUT_VAR) {
            Some(raw) => parse_timeout(&raw)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_base: normalize_base(&api_base)?,
            request_timeout,
            log_file: get(LOG_FILE_VAR).map(PathBuf::from),
        })
    }
}

fn normalize_base(raw: &str) -> Result<String, DiaryError> {
    let base = raw.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(DiaryError::ConfigurationMissing(format!(
            "{} must not be empty",
            API_BASE_VAR
        )));
    }
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(DiaryError::ConfigurationInvalid(format!(
            "{} must be an http(s) URL, got '{}'",
            API_BASE_VAR, base
        )));
    }
    Ok(base.to_string())
}

fn parse_timeout(raw: &str) -> Result<Duration, DiaryError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(DiaryError::ConfigurationInvalid(format!(
            "{} must be a positive number of seconds, got '{}'",
            TIMEOUT_VAR, raw
        ))),
    }
}
