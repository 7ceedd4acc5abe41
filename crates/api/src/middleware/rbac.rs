//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use volunteer_core::error::CoreError;
use volunteer_core::roles::{ROLE_ADMIN, ROLE_COORDINATOR};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires `coordinator` or `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn manage(RequireCoordinator(user): RequireCoordinator) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireCoordinator(pub AuthUser);

impl FromRequestParts<AppState> for RequireCoordinator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_COORDINATOR {
            return Err(AppError::Core(CoreError::Forbidden(
                "Coordinator or Admin role required".into(),
            )));
        }
        Ok(RequireCoordinator(user))
    }
}

/// Requires any authenticated caller (any valid role).
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
