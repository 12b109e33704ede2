use crate::error::Result;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:5001";
pub const DEFAULT_LOG_FILE: &str = "taskers.log";

/// Resolved runtime settings for talking to the task service.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    /// No timeout unless one is configured; a hung call keeps the submit control disabled.
    pub request_timeout: Option<Duration>,
    pub log_file: PathBuf,
}

impl Config {
    pub fn new(api_url: &str) -> Result<Self> {
        Ok(Self {
            api_url: base_url(api_url)?,
            request_timeout: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.api_url.join(path.trim_start_matches('/'))?)
    }
}

// `Url::join` replaces the last path segment unless the base ends with '/'.
fn base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
