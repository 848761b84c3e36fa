use super::model::AuthenticatedUser;
use crate::core::error::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::time::Duration;

/// Validates the HS256 session tokens issued by the identity provider.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
    #[serde(alias = "preferred_username", default)]
    username: Option<String>,
}

impl JwtValidator {
    pub fn new(secret: &str, issuer: Option<&str>, leeway: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway.as_secs();
        validation.validate_nbf = true;
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        let claims = token_data.claims;
        if claims.sub.trim().is_empty() {
            return Err(AppError::Unauthorized("Token has an empty subject".to_string()));
        }

        Ok(AuthenticatedUser {
            sub: claims.sub,
            username: claims.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{issue_token, TEST_JWT_SECRET};

    fn validator() -> JwtValidator {
        JwtValidator::new(TEST_JWT_SECRET, None, Duration::from_secs(0))
    }

    #[test]
    fn test_valid_token() {
        let token = issue_token(TEST_JWT_SECRET, "user-1", 3600);
        let user = validator().validate_token(&token).unwrap();
        assert_eq!(user.sub, "user-1");
        assert_eq!(user.display_name(), "test");
    }

    #[test]
    fn test_expired_token() {
        let token = issue_token(TEST_JWT_SECRET, "user-1", -3600);
        assert!(matches!(
            validator().validate_token(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_wrong_secret() {
        let token = issue_token("another-secret", "user-1", 3600);
        assert!(validator().validate_token(&token).is_err());
    }

    #[test]
    fn test_issuer_is_checked_when_configured() {
        let validator = JwtValidator::new(
            TEST_JWT_SECRET,
            Some("https://sso.example.org"),
            Duration::from_secs(0),
        );
        let token = issue_token(TEST_JWT_SECRET, "user-1", 3600);
        assert!(validator.validate_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token() {
        assert!(validator().validate_token("not-a-jwt").is_err());
    }
}
