//! Session token generation and validation.
//!
//! Session tokens are HS256-signed JWTs containing a [`Claims`] payload.
//! The algorithm is fixed here, never read from the token header, so a
//! token re-signed with another algorithm is rejected. Validation uses no
//! leeway: a token is valid up to and including its `exp` second.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use notes_core::types::UserId;
use serde::{Deserialize, Serialize};

/// Default session lifetime: one day.
pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 86_400;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject -- the user's Telegram id.
    pub sub: UserId,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issuer, present when the server is configured with one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Configuration for session token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Value of the `iss` claim; checked on validation when set.
    pub issuer: Option<String>,
    /// Token lifetime in seconds.
    pub expiry_secs: i64,
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Expiration time (UTC Unix timestamp).
    pub expires_at: i64,
}

/// Why a presented token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("invalid token")]
    Invalid,
}

/// Sign a session token for `user_id`, issued at `now` (Unix seconds).
pub fn issue_token(
    user_id: UserId,
    now: i64,
    config: &JwtConfig,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id,
        iat: now,
        exp: now + config.expiry_secs,
        iss: config.issuer.clone(),
    };

    let token = encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(IssuedToken {
        token,
        expires_at: claims.exp,
    })
}

/// Validate and decode a session token, returning the embedded [`Claims`].
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;
    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);
    }

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Invalid,
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            issuer: None,
            expiry_secs: DEFAULT_TOKEN_EXPIRY_SECS,
        }
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    fn sign_with(claims: &Claims, algorithm: Algorithm, secret: &str) -> String {
        encode(
            &Header::new(algorithm),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn test_issue_and_validate() {
        let config = test_config();
        let issued = issue_token(42, now(), &config).expect("token generation should succeed");

        let claims = validate_token(&issued.token, &config).expect("token should validate");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.exp, claims.iat + 86_400);
        assert_eq!(claims.exp, issued.expires_at);
        assert_eq!(claims.iss, None);
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();
        let now = now();
        let claims = Claims {
            sub: 1,
            iat: now - 86_402,
            exp: now - 2,
            iss: None,
        };
        let token = sign_with(&claims, Algorithm::HS256, &config.secret);

        assert_eq!(validate_token(&token, &config), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_valid_until_expiry() {
        let config = test_config();
        let now = now();
        let claims = Claims {
            sub: 1,
            iat: now - 86_000,
            exp: now + 60,
            iss: None,
        };
        let token = sign_with(&claims, Algorithm::HS256, &config.secret);

        assert!(validate_token(&token, &config).is_ok());
    }

    #[test]
    fn test_different_secrets_fail() {
        let config = test_config();
        let other = JwtConfig {
            secret: "secret-bravo".to_string(),
            ..test_config()
        };
        let issued = issue_token(1, now(), &other).expect("token generation should succeed");

        assert_eq!(
            validate_token(&issued.token, &config),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_algorithm_from_header_is_not_trusted() {
        let config = test_config();
        let now = now();
        let claims = Claims {
            sub: 1,
            iat: now,
            exp: now + 60,
            iss: None,
        };
        // Same secret, but a different HMAC algorithm in the header.
        let token = sign_with(&claims, Algorithm::HS512, &config.secret);

        assert_eq!(validate_token(&token, &config), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        assert_eq!(
            validate_token("not.a.jwt", &test_config()),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_issuer_is_checked_when_configured() {
        let config = JwtConfig {
            issuer: Some("https://notes.example/".to_string()),
            ..test_config()
        };
        let issued = issue_token(7, now(), &config).expect("token generation should succeed");
        let claims = validate_token(&issued.token, &config).expect("token should validate");
        assert_eq!(claims.iss.as_deref(), Some("https://notes.example/"));

        // A token without `iss` is rejected once an issuer is configured.
        let bare = issue_token(7, now(), &test_config()).expect("token generation should succeed");
        assert_eq!(
            validate_token(&bare.token, &config),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let config = JwtConfig {
            issuer: Some("https://notes.example/".to_string()),
            ..test_config()
        };
        let other = JwtConfig {
            issuer: Some("https://elsewhere.example/".to_string()),
            ..test_config()
        };
        let issued = issue_token(7, now(), &other).expect("token generation should succeed");

        assert_eq!(
            validate_token(&issued.token, &config),
            Err(TokenError::Invalid)
        );
    }
}
