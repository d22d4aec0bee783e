pub mod admin;
pub mod user;

pub use admin::{AdminRecord, LoginRequest, NewAdmin, RegisterRequest};
pub use user::{
    BulkDeleteRequest, BulkUpdateItem, CreateUserRequest, NewUser, UpdateUserRequest,
    UserChanges, UserRecord,
};

use crate::error::ApiError;

/// Normalize an email for storage and lookup: uniqueness is case-insensitive,
/// so all emails are kept lowercase.
pub fn normalize_email(raw: &str) -> Result<String, ApiError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(ApiError::validation_error("email is required"));
    }
    if !email.contains('@') {
        return Err(ApiError::validation_error(format!(
            "invalid email address: {}",
            email
        )));
    }
    Ok(email)
}

/// Trim and require a non-empty name.
pub fn normalize_name(raw: &str) -> Result<String, ApiError> {
    let name = raw.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::validation_error("name is required"));
    }
    Ok(name)
}
