use hookreplay::HookreplayError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GithubError>;

#[derive(Error, Debug)]
pub enum GithubError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid app private key: {0}")]
    Key(String),

    #[error("{endpoint} returned {status}{}", message_suffix(.message))]
    Api {
        endpoint: String,
        status: u16,
        message: Option<String>,
        documentation_url: Option<String>,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode {endpoint} response: {reason}")]
    Decode { endpoint: String, reason: String },
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

impl From<GithubError> for HookreplayError {
    fn from(e: GithubError) -> Self {
        let detail = e.to_string();
        match e {
            GithubError::Config(msg) => HookreplayError::Config(msg),
            GithubError::Key(msg) => HookreplayError::Auth(msg),
            GithubError::Api {
                status, message, ..
            } => HookreplayError::Api {
                status: Some(status),
                message,
                detail,
            },
            GithubError::Http(err) => HookreplayError::Api {
                status: err.status().map(|s| s.as_u16()),
                message: None,
                detail,
            },
            GithubError::Decode { .. } => HookreplayError::Decode(detail),
        }
    }
}
