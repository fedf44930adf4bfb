//! Authentication service - verifies HMAC-signed bearer tokens.

use std::collections::HashSet;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use common::{AppError, AppResult, JwtConfig};
use domain::Principal;

/// The only accepted signing algorithms.
pub const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// JWT claims payload.
///
/// Only `email` is required; `exp` is validated when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Bearer-token verification, injected into the gateway middleware.
pub trait TokenVerifier: Send + Sync {
    /// Verify a raw token and resolve the principal it identifies.
    fn verify(&self, token: &str) -> AppResult<Principal>;
}

/// HMAC JWT verifier and issuer sharing one secret.
pub struct Authenticator {
    secret: String,
}

impl Authenticator {
    /// Create new authenticator from JWT configuration
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
        }
    }

    /// Get JWT secret as bytes
    fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    /// Decode and validate claims, refusing non-HMAC algorithms.
    pub fn decode_claims(&self, token: &str) -> AppResult<Claims> {
        let header = decode_header(token)?;
        if !HMAC_ALGORITHMS.contains(&header.alg) {
            tracing::debug!("Rejected token signed with {:?}", header.alg);
            return Err(AppError::Unauthorized);
        }

        let mut validation = Validation::new(header.alg);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = true;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_bytes()),
            &validation,
        )?;

        Ok(token_data.claims)
    }

    /// Sign a token for `email` valid for `ttl_hours` (HS256).
    pub fn issue_token(&self, email: &str, ttl_hours: i64) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            email: email.to_string(),
            sub: Some(email.to_string()),
            exp: Some((now + Duration::hours(ttl_hours)).timestamp()),
            iat: Some(now.timestamp()),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_bytes()),
        )?;

        Ok(token)
    }
}

impl TokenVerifier for Authenticator {
    fn verify(&self, token: &str) -> AppResult<Principal> {
        let claims = self.decode_claims(token)?;

        if claims.email.trim().is_empty() {
            tracing::debug!("Token has no email claim");
            return Err(AppError::Unauthorized);
        }

        Ok(Principal::new(claims.email, token))
    }
}
