pub mod auth;
pub mod response;

pub use auth::{require_auth, AuthAdmin};
pub use response::{ApiResponse, ApiResult};
