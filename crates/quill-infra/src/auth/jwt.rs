//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use quill_core::ports::{AuthError, TokenClaims, TokenService};

const DEFAULT_SECRET: &str = "change-me-in-production";

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            expiration_hours: 24,
            issuer: "quill-api".to_string(),
        }
    }
}

impl JwtConfig {
    /// Load from `JWT_SECRET`, `JWT_EXPIRATION_HOURS` and `JWT_ISSUER`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.secret);

        if secret == DEFAULT_SECRET {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        Self {
            secret,
            expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.expiration_hours),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    email: String,
    roles: Vec<String>,
    exp: i64,
    iat: i64,
    iss: String,
}

/// JWT-based token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::new(JwtConfig::from_env())
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(
        &self,
        user_id: i64,
        email: &str,
        roles: Vec<String>,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::hours(self.config.expiration_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            roles,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        let user_id = token_data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(TokenClaims {
            user_id,
            email: token_data.claims.email,
            roles: token_data.claims.roles,
            exp: token_data.claims.exp,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        self.config.expiration_hours * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            expiration_hours: 1,
            issuer: "test-issuer".to_string(),
        }
    }

    #[test]
    fn test_validate_token_roundtrips_claims() {
        let service = JwtTokenService::new(test_config());

        let token = service
            .generate_token(42, "test@example.com", vec!["user".to_string()])
            .unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.roles, vec!["user".to_string()]);
    }

    #[test]
    fn test_validate_invalid_token() {
        let service = JwtTokenService::new(test_config());

        let result = service.validate_token("invalid-token");

        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_validate_expired_token() {
        let service = JwtTokenService::new(JwtConfig {
            expiration_hours: -2,
            ..test_config()
        });

        let token = service.generate_token(1, "old@example.com", vec![]).unwrap();

        assert!(matches!(
            service.validate_token(&token).unwrap_err(),
            AuthError::TokenExpired
        ));
    }

    #[test]
    fn test_validate_wrong_issuer_token() {
        let service1 = JwtTokenService::new(JwtConfig {
            issuer: "issuer1".to_string(),
            ..test_config()
        });
        let service2 = JwtTokenService::new(JwtConfig {
            issuer: "issuer2".to_string(),
            ..test_config()
        });

        let token = service1.generate_token(1, "test@test.com", vec![]).unwrap();

        assert!(service2.validate_token(&token).is_err());
    }

    #[test]
    fn test_validate_wrong_secret_token() {
        let service1 = JwtTokenService::new(test_config());
        let service2 = JwtTokenService::new(JwtConfig {
            secret: "another-secret".to_string(),
            ..test_config()
        });

        let token = service1.generate_token(1, "test@test.com", vec![]).unwrap();

        assert!(matches!(
            service2.validate_token(&token).unwrap_err(),
            AuthError::InvalidToken(_)
        ));
    }

    #[test]
    fn test_expiration_seconds() {
        let service = JwtTokenService::new(JwtConfig {
            expiration_hours: 24,
            ..test_config()
        });

        assert_eq!(service.expiration_seconds(), 86400);
    }
}
