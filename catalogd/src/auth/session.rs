//! JWT session token creation and verification.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{api::models::auth::CurrentAdmin, config::Config, errors::Error, types::UserId};

/// JWT session claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: UserId,      // Subject (admin user ID)
    pub username: String, // Username
    pub exp: i64,         // Expiration time
    pub iat: i64,         // Issued at
}

impl SessionClaims {
    /// Create new session claims for an admin user
    pub fn new(admin: &CurrentAdmin, config: &Config) -> Self {
        let now = Utc::now();
        let exp = now + config.token_expiry;

        Self {
            sub: admin.id,
            username: admin.username.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }
}

impl From<SessionClaims> for CurrentAdmin {
    fn from(claims: SessionClaims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
        }
    }
}

/// Create a JWT token for an admin session
pub fn create_session_token(admin: &CurrentAdmin, config: &Config) -> Result<String, Error> {
    let claims = SessionClaims::new(admin, config);
    let secret_key = config.secret_key.as_ref().ok_or_else(|| Error::Internal {
        operation: "JWT sessions: secret_key is required".to_string(),
    })?;

    let key = EncodingKey::from_secret(secret_key.as_bytes());
    encode(&Header::default(), &claims, &key).map_err(|e| Error::Internal {
        operation: format!("create JWT: {e}"),
    })
}

/// Verify and decode a JWT session token
pub fn verify_session_token(token: &str, config: &Config) -> Result<CurrentAdmin, Error> {
    let secret_key = config.secret_key.as_ref().ok_or_else(|| Error::Internal {
        operation: "JWT sessions: secret_key is required".to_string(),
    })?;

    let key = DecodingKey::from_secret(secret_key.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        // Client errors (401) - malformed tokens, invalid claims, expired tokens
        jsonwebtoken::errors::ErrorKind::InvalidToken
        | jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::ExpiredSignature
        | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_)
        | jsonwebtoken::errors::ErrorKind::InvalidIssuer
        | jsonwebtoken::errors::ErrorKind::InvalidAudience
        | jsonwebtoken::errors::ErrorKind::InvalidSubject
        | jsonwebtoken::errors::ErrorKind::ImmatureSignature
        | jsonwebtoken::errors::ErrorKind::Base64(_)
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => Error::TokenInvalid,

        // Server errors (500) - key issues, internal failures
        jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_)
        | jsonwebtoken::errors::ErrorKind::RsaFailedSigning
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithmName
        | jsonwebtoken::errors::ErrorKind::InvalidKeyFormat
        | jsonwebtoken::errors::ErrorKind::MissingAlgorithm
        | jsonwebtoken::errors::ErrorKind::Json(_)
        | jsonwebtoken::errors::ErrorKind::Utf8(_)
        | jsonwebtoken::errors::ErrorKind::Crypto(_) => Error::Internal {
            operation: format!("JWT verification: {e}"),
        },

        // Catch-all for any future error variants (default to server error for safety)
        _ => Error::Internal {
            operation: format!("JWT verification (unknown error): {e}"),
        },
    })?;

    Ok(CurrentAdmin::from(token_data.claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn create_test_config() -> Config {
        Config {
            secret_key: Some("test-secret-key-for-jwt".to_string()),
            token_expiry: Duration::from_secs(24 * 60 * 60),
            ..Default::default()
        }
    }

    fn create_test_admin() -> CurrentAdmin {
        CurrentAdmin {
            id: 1,
            username: "admin".to_string(),
        }
    }

    /// Sign arbitrary claims with the config secret, bypassing `SessionClaims::new`.
    fn sign_claims(claims: &SessionClaims, config: &Config) -> String {
        let key = EncodingKey::from_secret(config.secret_key.as_ref().unwrap().as_bytes());
        encode(&Header::default(), claims, &key).unwrap()
    }

    #[test]
    fn test_create_and_verify_session_token() {
        let config = create_test_config();
        let admin = create_test_admin();

        let token = create_session_token(&admin, &config).unwrap();
        assert!(!token.is_empty());

        let verified = verify_session_token(&token, &config).unwrap();
        assert_eq!(verified.id, admin.id);
        assert_eq!(verified.username, admin.username);
    }

    #[test]
    fn test_claims_carry_configured_expiry() {
        let config = create_test_config();
        let admin = create_test_admin();

        let claims = SessionClaims::new(&admin, &config);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let mut config = create_test_config();
        let admin = create_test_admin();

        let token = create_session_token(&admin, &config).unwrap();

        config.secret_key = Some("different-secret".to_string());
        let result = verify_session_token(&token, &config);
        // Should be TokenInvalid (InvalidSignature), not Internal error
        assert!(matches!(result.unwrap_err(), Error::TokenInvalid));
    }

    #[test]
    fn test_token_accepted_just_before_expiry() {
        let config = create_test_config();
        let now = Utc::now();

        // Issued 23h59m ago with a 24h lifetime: one minute of validity left
        let claims = SessionClaims {
            sub: 1,
            username: "admin".to_string(),
            iat: (now - chrono::Duration::minutes(23 * 60 + 59)).timestamp(),
            exp: (now + chrono::Duration::minutes(1)).timestamp(),
        };
        let token = sign_claims(&claims, &config);

        assert!(verify_session_token(&token, &config).is_ok());
    }

    #[test]
    fn test_token_rejected_after_expiry() {
        let config = create_test_config();
        let now = Utc::now();

        // Expired one minute ago. jsonwebtoken's default Validation applies a
        // 60s leeway, so push past it to get a deterministic rejection.
        let claims = SessionClaims {
            sub: 1,
            username: "admin".to_string(),
            iat: (now - chrono::Duration::hours(24) - chrono::Duration::minutes(2)).timestamp(),
            exp: (now - chrono::Duration::minutes(2)).timestamp(),
        };
        let token = sign_claims(&claims, &config);

        let result = verify_session_token(&token, &config);
        // Should be TokenInvalid (ExpiredSignature), not Internal error
        assert!(matches!(result.unwrap_err(), Error::TokenInvalid));
    }

    #[test]
    fn test_verify_malformed_token() {
        let config = create_test_config();

        let malformed_tokens = vec!["not.a.token", "invalid", "", "too.many.parts.in.this.token"];

        for token in malformed_tokens {
            let result = verify_session_token(token, &config);
            assert!(
                matches!(result.unwrap_err(), Error::TokenInvalid),
                "Expected TokenInvalid error for token: {token}"
            );
        }
    }
}
