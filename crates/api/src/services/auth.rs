//! Credential verification and bearer token issuance.
//!
//! There is exactly one configured administrator credential pair and one
//! implicit role. Tokens are stateless HS256 JWTs; validity is determined
//! purely by signature and expiry at verification time - no session store,
//! no revocation list.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::config::{AdminCredentials, TokenConfig};

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username/password pair does not match the configured administrator.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token is malformed, tampered with, or expired.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Token could not be signed.
    #[error("failed to sign token: {0}")]
    TokenCreation(#[source] jsonwebtoken::errors::Error),
}

/// Claims carried by an issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated administrator name.
    pub username: String,
    /// Issued-at timestamp (Unix epoch seconds).
    pub iat: i64,
    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,
}

/// A successful login: the signed token and the authenticated identity.
#[derive(Debug, Clone)]
pub struct Login {
    pub token: String,
    pub username: String,
}

/// Credential verifier and token service.
///
/// Stateless; safe to share across requests.
pub struct AuthService {
    admin_username: String,
    admin_password: SecretString,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_lifetime: Duration,
}

impl AuthService {
    /// Create a verifier for the configured administrator and signing secret.
    #[must_use]
    pub fn new(admin: &AdminCredentials, token: &TokenConfig) -> Self {
        let secret = token.secret.expose_secret().as_bytes();
        Self {
            admin_username: admin.username.clone(),
            admin_password: admin.password.clone(),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_lifetime: Duration::hours(token.expires_hours),
        }
    }

    /// Verify a username/password pair and issue a signed token.
    ///
    /// Both fields are compared in constant time, and both comparisons run
    /// regardless of whether the first already failed.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on any mismatch and
    /// [`AuthError::TokenCreation`] if signing fails.
    pub fn login(&self, username: &str, password: &str) -> Result<Login, AuthError> {
        let username_ok = username
            .as_bytes()
            .ct_eq(self.admin_username.as_bytes());
        let password_ok = password
            .as_bytes()
            .ct_eq(self.admin_password.expose_secret().as_bytes());

        if !bool::from(username_ok & password_ok) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(username)?;
        Ok(Login {
            token,
            username: username.to_owned(),
        })
    }

    /// Validate a token's signature and expiry, returning its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for anything that does not verify:
    /// bad signature, expired, malformed.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }

    fn issue_token(&self, username: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            username: username.to_owned(),
            iat: now.timestamp(),
            exp: (now + self.token_lifetime).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AuthError::TokenCreation)
    }
}
