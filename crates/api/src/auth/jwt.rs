//! Access tokens.
//!
//! HS256 JWTs carrying the user id and role. Tokens are stateless: there is
//! no refresh flow and no server-side revocation, so a client logs in again
//! once `exp` passes.

use chrono::Utc;
use equipmart_core::types::DbId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value of the `iss` claim; tokens from any other issuer are rejected.
pub const TOKEN_ISSUER: &str = "equipmart";

const DEFAULT_EXPIRY_MINS: i64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    /// Role at issue time: `customer`, `partner` or `admin`.
    pub role: String,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
    /// Per-token id, logged on issue.
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// `JWT_SECRET` (required, non-empty) and `JWT_ACCESS_EXPIRY_MINS`
    /// (default 60, must be positive).
    ///
    /// # Panics
    ///
    /// On a missing secret or an unusable expiry.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        assert!(!secret.trim().is_empty(), "JWT_SECRET must not be blank");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .map(|v| v.parse().expect("JWT_ACCESS_EXPIRY_MINS must be an integer"))
            .unwrap_or(DEFAULT_EXPIRY_MINS);
        assert!(
            access_token_expiry_mins > 0,
            "JWT_ACCESS_EXPIRY_MINS must be positive"
        );

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    /// Token lifetime in seconds, as reported to clients in `expiresIn`.
    pub fn expires_in_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation
    }
}

/// Sign a token for a freshly authenticated user.
pub fn issue_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        iss: TOKEN_ISSUER.to_string(),
        exp: now + config.expires_in_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    tracing::debug!(user_id, jti = %claims.jti, "Access token issued");
    Ok(token)
}

/// Check signature, issuer, and expiry and return the claims.
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &JwtConfig::validation(),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry_mins: 90,
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(iss: &str, exp_offset: i64) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: 5,
            role: "customer".to_string(),
            iss: iss.to_string(),
            exp: now + exp_offset,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        }
    }

    #[test]
    fn issued_token_verifies_with_configured_lifetime() {
        let config = config("marketplace-signing-key");
        let token = issue_token(42, "partner", &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "partner");
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.exp - claims.iat, 90 * 60);
    }

    #[test]
    fn expired_token_is_rejected() {
        // Past the default 60 second leeway.
        let token = sign(&claims(TOKEN_ISSUER, -300), "marketplace-signing-key");
        assert!(verify_token(&token, &config("marketplace-signing-key")).is_err());
    }

    #[test]
    fn foreign_issuer_is_rejected() {
        let token = sign(&claims("someone-else", 600), "marketplace-signing-key");
        assert!(verify_token(&token, &config("marketplace-signing-key")).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(1, "customer", &config("key-one")).unwrap();
        assert!(verify_token(&token, &config("key-two")).is_err());
    }
}
