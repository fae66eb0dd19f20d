//! Handlers for the `/materials` resource.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use equipmart_core::error::CoreError;
use equipmart_core::listing::{paginate, ListingSchema};
use equipmart_core::principal::ensure_owner;
use equipmart_core::types::DbId;
use equipmart_db::models::availability::Availability;
use equipmart_db::models::material::{CreateMaterial, Material, MaterialCategory, UpdateMaterial};
use equipmart_db::models::partner::WithPartner;
use equipmart_db::repositories::MaterialRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::extract::{parse_json, parse_valid_json, ValidJson, ValidQuery};
use crate::handlers::catalog::{attach_partners, with_partner};
use crate::middleware::rbac::{Acting, RequirePartner};
use crate::query::MaterialListParams;
use crate::response::{DataResponse, MessageResponse, PaginatedResponse};
use crate::state::AppState;

fn not_found() -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: Material::ENTITY,
    })
}

async fn find_material(pool: &PgPool, id: DbId) -> AppResult<Material> {
    MaterialRepo::find_by_id(pool, id).await?.ok_or_else(not_found)
}

/// GET /api/v1/materials
///
/// Available materials only, filtered, sorted, and paginated.
pub async fn list(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<MaterialListParams>,
) -> AppResult<Json<PaginatedResponse<WithPartner<Material>>>> {
    let criteria = params.into_criteria();
    let (materials, total) = MaterialRepo::list(&state.pool, &criteria).await?;
    let data = attach_partners(&state.pool, materials, |m| m.partner_id).await?;

    let pagination = paginate(total, criteria.page, criteria.page_size);
    Ok(Json(PaginatedResponse::new(data, pagination)))
}

/// GET /api/v1/materials/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<WithPartner<Material>>>> {
    let material = find_material(&state.pool, id).await?;
    let partner_id = material.partner_id;
    let data = with_partner(&state.pool, material, partner_id).await?;
    Ok(Json(DataResponse::new(data)))
}

/// POST /api/v1/materials
///
/// The new material is owned by the caller's partner profile.
pub async fn create(
    State(state): State<AppState>,
    partner: RequirePartner,
    ValidJson(input): ValidJson<CreateMaterial>,
) -> AppResult<(StatusCode, Json<DataResponse<WithPartner<Material>>>)> {
    let material = MaterialRepo::create(&state.pool, partner.partner_id, &input).await?;

    tracing::info!(
        material_id = material.id,
        partner_id = partner.partner_id,
        user_id = partner.principal.user_id,
        "Material created",
    );

    let data = with_partner(&state.pool, material, partner.partner_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(data))))
}

/// PUT /api/v1/materials/{id}
///
/// Owner only. Ownership is checked before the payload is parsed.
pub async fn update(
    State(state): State<AppState>,
    Acting(principal): Acting,
    Path(id): Path<DbId>,
    body: Bytes,
) -> AppResult<Json<DataResponse<WithPartner<Material>>>> {
    let existing = find_material(&state.pool, id).await?;
    ensure_owner(&principal, existing.partner_id, Material::ENTITY)?;

    let input: UpdateMaterial = parse_valid_json(&body)?;
    let material = MaterialRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(material_id = id, user_id = principal.user_id, "Material updated");

    let partner_id = material.partner_id;
    let data = with_partner(&state.pool, material, partner_id).await?;
    Ok(Json(DataResponse::new(data)))
}

/// DELETE /api/v1/materials/{id}
pub async fn delete(
    State(state): State<AppState>,
    Acting(principal): Acting,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let existing = find_material(&state.pool, id).await?;
    ensure_owner(&principal, existing.partner_id, Material::ENTITY)?;

    if !MaterialRepo::delete(&state.pool, id).await? {
        return Err(not_found());
    }

    tracing::info!(material_id = id, user_id = principal.user_id, "Material deleted");
    Ok(Json(MessageResponse::new("Material deleted successfully")))
}

/// POST /api/v1/materials/{id}/availability
///
/// Replaces the whole availability record.
pub async fn set_availability(
    State(state): State<AppState>,
    Acting(principal): Acting,
    Path(id): Path<DbId>,
    body: Bytes,
) -> AppResult<Json<DataResponse<Material>>> {
    let existing = find_material(&state.pool, id).await?;
    ensure_owner(&principal, existing.partner_id, Material::ENTITY)?;

    let availability: Availability = parse_json(&body)?;
    if let Some(violation) = availability.window_violation() {
        return Err(AppError::Core(CoreError::InvalidInput(vec![violation])));
    }

    let material = MaterialRepo::set_availability(&state.pool, id, &availability.normalized())
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(
        material_id = id,
        is_available = material.availability.is_available,
        "Material availability updated",
    );
    Ok(Json(DataResponse::new(material)))
}

/// GET /api/v1/materials/categories/list
pub async fn categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<MaterialCategory>>>> {
    let categories = MaterialRepo::categories(
        &state.pool,
        state.config.category_list_include_unavailable,
    )
    .await?;
    Ok(Json(DataResponse::new(categories)))
}
