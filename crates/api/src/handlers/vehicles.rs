//! Handlers for the `/vehicles` resource.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use equipmart_core::error::CoreError;
use equipmart_core::listing::{paginate, ListingSchema};
use equipmart_core::principal::ensure_owner;
use equipmart_core::types::DbId;
use equipmart_db::models::availability::Availability;
use equipmart_db::models::partner::WithPartner;
use equipmart_db::models::vehicle::{CreateVehicle, UpdateVehicle, Vehicle, VehicleCategory};
use equipmart_db::repositories::VehicleRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::extract::{parse_json, parse_valid_json, ValidJson, ValidQuery};
use crate::handlers::catalog::{attach_partners, with_partner};
use crate::middleware::rbac::{Acting, RequirePartner};
use crate::query::VehicleListParams;
use crate::response::{DataResponse, MessageResponse, PaginatedResponse};
use crate::state::AppState;

fn not_found() -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: Vehicle::ENTITY,
    })
}

async fn find_vehicle(pool: &PgPool, id: DbId) -> AppResult<Vehicle> {
    VehicleRepo::find_by_id(pool, id).await?.ok_or_else(not_found)
}

/// GET /api/v1/vehicles
///
/// Active vehicles only, filtered, sorted, and paginated.
pub async fn list(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<VehicleListParams>,
) -> AppResult<Json<PaginatedResponse<WithPartner<Vehicle>>>> {
    let criteria = params.into_criteria();
    let (vehicles, total) = VehicleRepo::list(&state.pool, &criteria).await?;
    let data = attach_partners(&state.pool, vehicles, |v| v.partner_id).await?;

    let pagination = paginate(total, criteria.page, criteria.page_size);
    Ok(Json(PaginatedResponse::new(data, pagination)))
}

/// GET /api/v1/vehicles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<WithPartner<Vehicle>>>> {
    let vehicle = find_vehicle(&state.pool, id).await?;
    let partner_id = vehicle.partner_id;
    let data = with_partner(&state.pool, vehicle, partner_id).await?;
    Ok(Json(DataResponse::new(data)))
}

/// POST /api/v1/vehicles
///
/// The new vehicle is owned by the caller's partner profile.
pub async fn create(
    State(state): State<AppState>,
    partner: RequirePartner,
    ValidJson(input): ValidJson<CreateVehicle>,
) -> AppResult<(StatusCode, Json<DataResponse<WithPartner<Vehicle>>>)> {
    let vehicle = VehicleRepo::create(&state.pool, partner.partner_id, &input).await?;

    tracing::info!(
        vehicle_id = vehicle.id,
        partner_id = partner.partner_id,
        user_id = partner.principal.user_id,
        "Vehicle created",
    );

    let data = with_partner(&state.pool, vehicle, partner.partner_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(data))))
}

/// PUT /api/v1/vehicles/{id}
///
/// Owner only. Ownership is checked before the payload is parsed.
pub async fn update(
    State(state): State<AppState>,
    Acting(principal): Acting,
    Path(id): Path<DbId>,
    body: Bytes,
) -> AppResult<Json<DataResponse<WithPartner<Vehicle>>>> {
    let existing = find_vehicle(&state.pool, id).await?;
    ensure_owner(&principal, existing.partner_id, Vehicle::ENTITY)?;

    let input: UpdateVehicle = parse_valid_json(&body)?;
    let vehicle = VehicleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(vehicle_id = id, user_id = principal.user_id, "Vehicle updated");

    let partner_id = vehicle.partner_id;
    let data = with_partner(&state.pool, vehicle, partner_id).await?;
    Ok(Json(DataResponse::new(data)))
}

/// DELETE /api/v1/vehicles/{id}
pub async fn delete(
    State(state): State<AppState>,
    Acting(principal): Acting,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let existing = find_vehicle(&state.pool, id).await?;
    ensure_owner(&principal, existing.partner_id, Vehicle::ENTITY)?;

    if !VehicleRepo::delete(&state.pool, id).await? {
        return Err(not_found());
    }

    tracing::info!(vehicle_id = id, user_id = principal.user_id, "Vehicle deleted");
    Ok(Json(MessageResponse::new("Vehicle deleted successfully")))
}

/// POST /api/v1/vehicles/{id}/availability
///
/// Replaces the whole availability record.
pub async fn set_availability(
    State(state): State<AppState>,
    Acting(principal): Acting,
    Path(id): Path<DbId>,
    body: Bytes,
) -> AppResult<Json<DataResponse<Vehicle>>> {
    let existing = find_vehicle(&state.pool, id).await?;
    ensure_owner(&principal, existing.partner_id, Vehicle::ENTITY)?;

    let availability: Availability = parse_json(&body)?;
    if let Some(violation) = availability.window_violation() {
        return Err(AppError::Core(CoreError::InvalidInput(vec![violation])));
    }

    let vehicle = VehicleRepo::set_availability(&state.pool, id, &availability.normalized())
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(
        vehicle_id = id,
        is_available = vehicle.availability.is_available,
        "Vehicle availability updated",
    );
    Ok(Json(DataResponse::new(vehicle)))
}

/// GET /api/v1/vehicles/categories/list
pub async fn categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<VehicleCategory>>>> {
    let categories = VehicleRepo::categories(
        &state.pool,
        state.config.category_list_include_unavailable,
    )
    .await?;
    Ok(Json(DataResponse::new(categories)))
}
