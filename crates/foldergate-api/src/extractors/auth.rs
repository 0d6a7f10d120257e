//! `AuthUser` extractor — pulls the JWT from the Authorization header,
//! validates it, and resolves the caller's principal.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use foldergate_core::error::{AppError, ErrorKind};
use foldergate_entity::user::Principal;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode_access_token(token)?;

        let team_ids = state
            .team_store
            .team_ids_for_user(claims.org_id(), claims.user_id())
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to resolve team membership", e)
            })?;

        Ok(AuthUser(claims.into_principal(team_ids)))
    }
}
