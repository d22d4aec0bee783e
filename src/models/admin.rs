use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

use super::{normalize_email, normalize_name};

/// A stored admin record. The password hash never leaves the server: it is
/// skipped on serialization, so every response strips it automatically.
#[derive(Debug, Clone, Serialize)]
pub struct AdminRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for an admin about to be persisted.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Request shape for POST /api/register.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Validate everything except the password hash, which the handler
    /// produces separately on the blocking pool.
    pub fn validated(self) -> Result<(String, String, String), ApiError> {
        let name = normalize_name(&self.name)?;
        let email = normalize_email(&self.email)?;
        if self.password.is_empty() {
            return Err(ApiError::validation_error("password is required"));
        }
        Ok((name, email, self.password))
    }
}

/// Request shape for POST /api/login. Both fields are optional at the parse
/// stage so their absence maps to a 400 rather than a serde error.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_validates_fields() {
        let req = RegisterRequest {
            name: " A ".to_string(),
            email: "A@X.com".to_string(),
            password: "secret1".to_string(),
        };
        let (name, email, password) = req.validated().expect("valid");
        assert_eq!(name, "A");
        assert_eq!(email, "a@x.com");
        assert_eq!(password, "secret1");
    }

    #[test]
    fn register_request_rejects_empty_password() {
        let req = RegisterRequest {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            password: String::new(),
        };
        assert!(req.validated().is_err());
    }

    #[test]
    fn password_hash_never_serialized() {
        let admin = AdminRecord {
            id: Uuid::new_v4(),
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$12$abcdefg".to_string(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&admin).expect("serialize");
        assert!(value.get("password_hash").is_none());
        assert!(value.get("password").is_none());
    }
}
