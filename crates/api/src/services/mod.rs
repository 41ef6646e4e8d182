//! Application services used by the route handlers.

pub mod access;
pub mod auth;

pub use access::{require_admin, require_edit, require_view, resolve_list_access, ListAccess};
pub use auth::AuthService;
