use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

use super::{normalize_email, normalize_name};

/// A stored user record.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a user about to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: Option<u32>,
}

/// Request shape for POST /api/users. Unknown fields are rejected so
/// malformed payloads fail before any store call.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub age: Option<u32>,
}

impl CreateUserRequest {
    pub fn into_new_user(self) -> Result<NewUser, ApiError> {
        Ok(NewUser {
            name: normalize_name(&self.name)?,
            email: normalize_email(&self.email)?,
            age: self.age,
        })
    }
}

/// Request shape for PUT /api/users/:id. Only the listed fields are
/// replaced; absent fields are left untouched.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
}

impl UpdateUserRequest {
    pub fn into_changes(self) -> Result<UserChanges, ApiError> {
        Ok(UserChanges {
            name: self.name.as_deref().map(normalize_name).transpose()?,
            email: self.email.as_deref().map(normalize_email).transpose()?,
            age: self.age,
        })
    }
}

/// Validated field-set applied to an existing user.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }
}

/// One entry of a PUT /api/users/bulk body.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BulkUpdateItem {
    pub id: Uuid,
    pub data: UpdateUserRequest,
}

/// Body of DELETE /api/users/bulk.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BulkDeleteRequest {
    pub ids: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_normalizes_fields() {
        let req = CreateUserRequest {
            name: " Bob ".to_string(),
            email: "B@X.com".to_string(),
            age: Some(30),
        };
        let user = req.into_new_user().expect("valid");
        assert_eq!(user.name, "Bob");
        assert_eq!(user.email, "b@x.com");
        assert_eq!(user.age, Some(30));
    }

    #[test]
    fn create_request_rejects_blank_name() {
        let req = CreateUserRequest {
            name: "  ".to_string(),
            email: "b@x.com".to_string(),
            age: None,
        };
        assert!(req.into_new_user().is_err());
    }

    #[test]
    fn unknown_fields_rejected() {
        let raw = serde_json::json!({"name": "Bob", "email": "b@x.com", "role": "root"});
        let parsed: Result<CreateUserRequest, _> = serde_json::from_value(raw);
        assert!(parsed.is_err());
    }

    #[test]
    fn negative_age_rejected_by_type() {
        let raw = serde_json::json!({"name": "Bob", "email": "b@x.com", "age": -1});
        let parsed: Result<CreateUserRequest, _> = serde_json::from_value(raw);
        assert!(parsed.is_err());
    }

    #[test]
    fn empty_update_detected() {
        let changes = UpdateUserRequest {
            name: None,
            email: None,
            age: None,
        }
        .into_changes()
        .expect("valid");
        assert!(changes.is_empty());
    }
}
