use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::Result;
use crate::types::User;

/// Claims carried by a short-lived access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub email: String,
    pub username: String,
    pub fullname: String,
    pub iat: i64,
    pub exp: i64,
}

/// Claims carried by a refresh token: just the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and validates the two token kinds. Access and refresh tokens are
/// signed with separate secrets so one cannot stand in for the other.
pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl: Duration::minutes(config.access_ttl_minutes),
            refresh_ttl: Duration::days(config.refresh_ttl_days),
        }
    }

    pub fn issue_access_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user.id.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            fullname: user.fullname.clone(),
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.access_encoding)?)
    }

    pub fn issue_refresh_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = RefreshClaims {
            sub: user.id.clone(),
            iat: now.timestamp(),
            exp: (now + self.refresh_ttl).timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.refresh_encoding)?)
    }

    pub fn issue_pair(&self, user: &User) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue_access_token(user)?,
            refresh_token: self.issue_refresh_token(user)?,
        })
    }

    /// Verifies signature and expiry of an access token.
    pub fn decode_access_token(&self, token: &str) -> Result<AccessClaims> {
        let data = decode::<AccessClaims>(token, &self.access_decoding, &Validation::default())?;
        Ok(data.claims)
    }

    /// Verifies signature and expiry of a refresh token. Whether the token is
    /// still the user's current one is a separate store check.
    pub fn decode_refresh_token(&self, token: &str) -> Result<RefreshClaims> {
        let data = decode::<RefreshClaims>(token, &self.refresh_decoding, &Validation::default())?;
        Ok(data.claims)
    }
}
