//! JWT Token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens (HS256)
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours: 1,
            issuer: "storefront".to_string(),
        }
    }

    /// Token lifetime in seconds. The session cookie uses the same value.
    pub fn expiration_secs(&self) -> i64 {
        self.expiration_hours * 3600
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("expiration_hours", &self.expiration_hours)
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// JWT claims carried by the session cookie
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Authenticated user id (UUID string)
    pub user_id: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Create new claims for a user
    pub fn new(user_id: &str, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            user_id: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }
}

/// Sign arbitrary claims with the configured secret
pub fn sign_claims(
    claims: &Claims,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Create a JWT token for a user
pub fn create_token(user_id: &str, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    sign_claims(&Claims::new(user_id, config), config)
}

/// Verify signature, issuer and expiry, and decode the claims
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig::new("test-secret")
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = config();
        let token = create_token("5f0c7a1e-0000-4000-8000-000000000001", &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.user_id, "5f0c7a1e-0000-4000-8000-000000000001");
        assert!(claims.exp > Utc::now().timestamp());

        let ttl = claims.exp - claims.iat;
        assert_eq!(ttl, 3600);
    }

    #[test]
    fn test_invalid_token() {
        let result = verify_token("invalid-token", &config());
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_token("user", &config()).unwrap();
        let other = JwtConfig::new("another-secret");
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = config();
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: "user".into(),
            iat: now - 7200,
            exp: now - 3600,
            iss: config.issuer.clone(),
        };
        let token = sign_claims(&claims, &config).unwrap();

        let err = verify_token(&token, &config).unwrap_err();
        assert!(matches!(
            err.kind(),
            jsonwebtoken::errors::ErrorKind::ExpiredSignature
        ));
    }

    #[test]
    fn test_secret_is_not_printed() {
        let printed = format!("{:?}", config());
        assert!(!printed.contains("test-secret"));
    }
}
