//! Signed session tokens
//!
//! HS256 JWTs carrying the user id, email and role. Tokens expire after
//! `auth.token_ttl_minutes` and are checked with no clock leeway.

use crate::config::AuthConfig;
use crate::domain::{Result, Role, ShiftSyncError, User, UserId};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Token claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Issued at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

impl Claims {
    /// Parses the subject back into a [`UserId`]
    pub fn user_id(&self) -> Result<UserId> {
        self.sub
            .parse()
            .map_err(|_| ShiftSyncError::Authentication("Invalid token subject".to_string()))
    }
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.token_secret.expose_secret().as_str().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: i64::try_from(config.token_ttl_minutes)
                .ok()
                .and_then(Duration::try_minutes)
                .unwrap_or(Duration::MAX),
        }
    }

    /// Issues a token for a signed-in user
    pub fn issue(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| ShiftSyncError::Other("Token lifetime is out of range".to_string()))?;
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };
        self.sign(&claims)
    }

    /// Signs arbitrary claims with the configured secret
    pub fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| ShiftSyncError::Other(format!("Failed to sign token: {e}")))
    }

    /// Verifies signature and expiry
    ///
    /// # Errors
    ///
    /// Returns [`ShiftSyncError::Authentication`] for a malformed, tampered or
    /// expired token
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        ShiftSyncError::Authentication("Token has expired".to_string())
                    }
                    _ => ShiftSyncError::Authentication("Invalid token".to_string()),
                }
            })
    }

    /// Token lifetime in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }
}
