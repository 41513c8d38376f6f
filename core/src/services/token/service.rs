//! Main token service implementation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenPair};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service for issuing and verifying JWT access and refresh tokens.
///
/// Tokens are HS256-signed and stateless; there is no revocation list.
/// The rest of the system treats this as an opaque issue-tokens-for-subject
/// collaborator.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Generates an access + refresh token pair for a user.
    pub fn generate_tokens(&self, user_id: Uuid) -> Result<TokenPair, DomainError> {
        let access_token =
            self.encode_token(user_id, "access", self.config.access_token_expiry)?;
        let refresh_token =
            self.encode_token(user_id, "refresh", self.config.refresh_token_expiry)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.config.access_token_expiry,
        })
    }

    /// Verifies an access token and returns its claims.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.decode_token(token)?;
        if !claims.is_access() {
            return Err(DomainError::Token(TokenError::InvalidClaims));
        }
        Ok(claims)
    }

    /// Verifies a refresh token and issues a fresh token pair for its
    /// subject.
    pub fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let claims = self
            .decode_token(refresh_token)
            .map_err(|_| DomainError::Token(TokenError::InvalidRefreshToken))?;
        if !claims.is_refresh() {
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }
        self.generate_tokens(claims.user_id()?)
    }

    fn encode_token(
        &self,
        user_id: Uuid,
        token_type: &str,
        expiry_seconds: i64,
    ) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(expiry_seconds)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: token_type.to_string(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    fn decode_token(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let token_error = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        TokenError::InvalidSignature
                    }
                    _ => TokenError::InvalidToken,
                };
                DomainError::Token(token_error)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(TokenServiceConfig {
            jwt_secret: "test-secret".to_string(),
            issuer: "authgate".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604800,
        })
    }

    #[test]
    fn test_generate_and_verify_access_token() {
        let svc = service();
        let user_id = Uuid::new_v4();

        let pair = svc.generate_tokens(user_id).unwrap();
        assert_eq!(pair.expires_in, 900);

        let claims = svc.verify_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user_id);
        assert!(claims.is_access());
    }

    #[test]
    fn test_refresh_token_rejected_as_access_token() {
        let svc = service();
        let pair = svc.generate_tokens(Uuid::new_v4()).unwrap();
        assert!(svc.verify_access_token(&pair.refresh_token).is_err());
    }

    #[test]
    fn test_refresh_rotates_pair() {
        let svc = service();
        let user_id = Uuid::new_v4();
        let pair = svc.generate_tokens(user_id).unwrap();

        let rotated = svc.refresh_tokens(&pair.refresh_token).unwrap();
        let claims = svc.verify_access_token(&rotated.access_token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_access_token_rejected_for_refresh() {
        let svc = service();
        let pair = svc.generate_tokens(Uuid::new_v4()).unwrap();
        assert!(svc.refresh_tokens(&pair.access_token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let svc = service();
        let other = TokenService::new(TokenServiceConfig {
            jwt_secret: "different-secret".to_string(),
            issuer: "authgate".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604800,
        });

        let pair = other.generate_tokens(Uuid::new_v4()).unwrap();
        assert!(svc.verify_access_token(&pair.access_token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(service().verify_access_token("not.a.jwt").is_err());
    }
}
