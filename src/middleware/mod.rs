pub mod admin;
pub mod auth;

pub use admin::require_admin;
pub use auth::{require_authenticated, AuthUser};
