//! HTTP middleware.

mod auth;

pub use auth::{auth_middleware, AuthState, CurrentUser, RequireAuth, USER_ID_HEADER};
