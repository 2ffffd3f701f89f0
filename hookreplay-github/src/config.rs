use crate::error::{GithubError, Result};
use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Credentials and endpoint for one GitHub App.
#[derive(Clone)]
pub struct AppConfig {
    pub app_id: u64,
    /// PEM-encoded RSA private key
    pub private_key: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl AppConfig {
    pub fn new(app_id: u64, private_key: impl Into<String>) -> Self {
        Self {
            app_id,
            private_key: private_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Load app configuration from environment variables.
    ///
    /// Required: APP_ID, and PRIVATE_KEY or PRIVATE_KEY_PATH
    /// Optional: GITHUB_API_URL (defaults to https://api.github.com)
    /// Optional: HOOKREPLAY_HTTP_TIMEOUT_SECS (defaults to 30)
    pub fn from_env() -> Result<Self> {
        let app_id = env::var("APP_ID")
            .map_err(|_| GithubError::Config("APP_ID is required".into()))?;
        let app_id: u64 = app_id
            .trim()
            .parse()
            .map_err(|_| GithubError::Config(format!("Invalid APP_ID: {}", app_id)))?;

        let private_key = match env::var("PRIVATE_KEY").ok().filter(|k| !k.trim().is_empty()) {
            Some(key) => key,
            None => {
                let path = env::var("PRIVATE_KEY_PATH").map_err(|_| {
                    GithubError::Config("PRIVATE_KEY or PRIVATE_KEY_PATH is required".into())
                })?;
                std::fs::read_to_string(&path).map_err(|e| {
                    GithubError::Config(format!("Failed to read PRIVATE_KEY_PATH {}: {}", path, e))
                })?
            }
        };
        let private_key = normalize_pem(&private_key)?;

        let api_url = env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        if !api_url.starts_with("https://") && !api_url.starts_with("http://") {
            return Err(GithubError::Config(format!(
                "GITHUB_API_URL must be an http(s) URL, got: {}",
                api_url
            )));
        }

        let timeout_secs = match env::var("HOOKREPLAY_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                GithubError::Config(format!("Invalid HOOKREPLAY_HTTP_TIMEOUT_SECS: {}", raw))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let mut config = Self::new(app_id, private_key).with_api_url(api_url);
        config.timeout = Duration::from_secs(timeout_secs);
        Ok(config)
    }
}

// Keep the key out of logs
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("app_id", &self.app_id)
            .field("private_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Keys pasted into CI secrets often arrive with literal `\n` sequences.
fn normalize_pem(raw: &str) -> Result<String> {
    let pem = raw.trim().replace("\\n", "\n");
    if !pem.starts_with("-----BEGIN") {
        return Err(GithubError::Config(
            "private key is not PEM encoded (expected -----BEGIN ... PRIVATE KEY-----)".into(),
        ));
    }
    Ok(pem)
}
