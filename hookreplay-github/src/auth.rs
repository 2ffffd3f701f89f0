use crate::error::{GithubError, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// Claims of a GitHub App JWT.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppClaims {
    pub iat: i64,
    pub exp: i64,
    /// App id
    pub iss: String,
}

/// Signs short-lived RS256 tokens that authenticate as the app itself.
pub struct AppJwt {
    app_id: u64,
    key: EncodingKey,
}

impl AppJwt {
    /// Backdated to tolerate clock drift between us and GitHub.
    const ISSUED_SKEW_SECS: i64 = 60;
    /// GitHub rejects tokens that live longer than 10 minutes.
    const LIFETIME_SECS: i64 = 9 * 60;

    pub fn new(app_id: u64, private_key_pem: &str) -> Result<Self> {
        let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| GithubError::Key(e.to_string()))?;
        Ok(Self { app_id, key })
    }

    pub fn app_id(&self) -> u64 {
        self.app_id
    }

    pub fn token(&self) -> Result<String> {
        self.token_at(Utc::now())
    }

    pub fn token_at(&self, now: DateTime<Utc>) -> Result<String> {
        let claims = AppClaims {
            iat: (now - Duration::seconds(Self::ISSUED_SKEW_SECS)).timestamp(),
            exp: (now + Duration::seconds(Self::LIFETIME_SECS)).timestamp(),
            iss: self.app_id.to_string(),
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.key)
            .map_err(|e| GithubError::Key(format!("failed to sign app token: {}", e)))
    }
}
