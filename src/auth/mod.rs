use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod password;

/// Claims embedded in the bearer credential.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(subject: Uuid, expiry_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: subject,
            exp: (now + Duration::hours(expiry_hours)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token generation error: {0}")]
    TokenGeneration(String),
    #[error("{0}")]
    InvalidToken(String),
    #[error("hashing error: {0}")]
    Hashing(String),
}

/// Stateless signing and verification of bearer credentials.
///
/// Validity is purely cryptographic plus time-based; nothing is persisted,
/// so issued tokens cannot be revoked before expiry.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: i64,
}

impl TokenService {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    pub fn issue(&self, subject: Uuid) -> Result<String, AuthError> {
        let claims = Claims::new(subject, self.expiry_hours);
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| AuthError::InvalidToken(format!("invalid token: {}", e)))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_then_verify_round_trip() {
        let tokens = TokenService::new("unit-test-secret", 24);
        let subject = Uuid::new_v4();

        let token = tokens.issue(subject).expect("issue");
        let claims = tokens.verify(&token).expect("verify");

        assert_eq!(claims.sub, subject);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_token_rejected() {
        let tokens = TokenService::new("unit-test-secret", 24);
        let token = tokens.issue(Uuid::new_v4()).expect("issue");

        let mut tampered = token.clone();
        tampered.push('x');
        assert!(tokens.verify(&tampered).is_err());
    }

    #[test]
    fn wrong_secret_rejected() {
        let tokens = TokenService::new("unit-test-secret", 24);
        let other = TokenService::new("another-secret", 24);

        let token = tokens.issue(Uuid::new_v4()).expect("issue");
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn expired_token_rejected() {
        let tokens = TokenService::new("unit-test-secret", 24);

        // Encode claims that expired well beyond the default leeway.
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::hours(26)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("unit-test-secret".as_bytes()),
        )
        .expect("encode");

        assert!(tokens.verify(&token).is_err());
    }
}
