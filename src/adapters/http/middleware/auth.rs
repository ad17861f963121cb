//! Identifier-header authentication.
//!
//! Clients present an `X-User-ID` header; unknown identifiers are
//! auto-created on first contact. The middleware injects the loaded user
//! into request extensions and the [`RequireAuth`] extractor enforces its
//! presence per-route.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::user::User;
use crate::ports::UserRepository;

use super::super::dto::ApiError;

/// Header carrying the caller's external identifier.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Auth middleware state - the user repository.
pub type AuthState = Arc<dyn UserRepository>;

/// The authenticated user for this request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Resolves the `X-User-ID` header to a user, creating one when unknown.
///
/// Requests without the header continue unauthenticated; routes that need
/// a user enforce it through [`RequireAuth`].
pub async fn auth_middleware(
    State(users): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let identifier = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    if let Some(identifier) = identifier {
        match load_or_create(&users, &identifier).await {
            Ok(user) => {
                request.extensions_mut().insert(CurrentUser(user));
            }
            Err(error) => return ApiError::internal(error).into_response(),
        }
    }

    next.run(request).await
}

async fn load_or_create(
    users: &AuthState,
    identifier: &str,
) -> Result<User, crate::ports::RepositoryError> {
    if let Some(user) = users.find_by_identifier(identifier).await? {
        users.touch(&user.id).await?;
        return Ok(user);
    }

    let user = User::new(identifier);
    users.create(&user).await?;
    tracing::info!(identifier, "created new user");
    Ok(user)
}

/// Extractor that requires an authenticated user.
pub struct RequireAuth(pub User);

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .map(|current| RequireAuth(current.0.clone()))
            .ok_or(ApiError::Unauthorized)
    }
}
