//! Access control extractors.
//!
//! Each extractor wraps [`AuthUser`]. [`Acting`] and [`RequirePartner`] also
//! look up the caller's partner profile so handlers get a ready
//! [`Principal`] for ownership checks.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use equipmart_core::error::CoreError;
use equipmart_core::principal::Principal;
use equipmart_core::types::DbId;
use equipmart_db::repositories::PartnerRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires any authenticated user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for use in
/// route definitions where "this route requires authentication" should be
/// self-documenting.
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

/// The authenticated caller as a [`Principal`], partner profile or not.
///
/// Used by owner-only endpoints, which must answer 404 for a missing record
/// before deciding 403.
pub struct Acting(pub Principal);

impl FromRequestParts<AppState> for Acting {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let partner = PartnerRepo::find_by_user_id(&state.pool, user.user_id).await?;
        Ok(Acting(Principal {
            user_id: user.user_id,
            role: user.role,
            partner_id: partner.map(|p| p.id),
        }))
    }
}

/// Requires a partner account. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn create(partner: RequirePartner) -> AppResult<Json<()>> {
///     tracing::info!(partner_id = partner.partner_id, "creating listing");
///     Ok(Json(()))
/// }
/// ```
pub struct RequirePartner {
    pub principal: Principal,
    /// The caller's partner profile id; new listings are owned by it.
    pub partner_id: DbId,
}

impl FromRequestParts<AppState> for RequirePartner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Acting(principal) = Acting::from_request_parts(parts, state).await?;
        match principal.partner_id {
            Some(partner_id) if principal.is_partner() => Ok(RequirePartner {
                principal,
                partner_id,
            }),
            _ => Err(AppError::Core(CoreError::Forbidden(
                "Partner account required".into(),
            ))),
        }
    }
}
