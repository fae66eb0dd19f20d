//! Handlers for the authenticated user's own account (`/users/me`).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use equipmart_core::error::CoreError;
use equipmart_core::validation::FieldViolation;
use equipmart_db::models::material::MaterialStatus;
use equipmart_db::models::order::{
    CreateMaterialOrder, CreateRentalRequest, MaterialOrder, OrderHistory, RentalRequest,
};
use equipmart_db::models::user::{UpdateProfile, UserResponse};
use equipmart_db::models::vehicle::VehicleStatus;
use equipmart_db::repositories::{MaterialRepo, OrderRepo, PartnerRepo, UserRepo, VehicleRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::rbac::RequireAuth;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

fn user_not_found() -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User" })
}

fn invalid_field(field: &str, message: impl Into<String>) -> AppError {
    AppError::Core(CoreError::InvalidInput(vec![FieldViolation::new(
        field, message,
    )]))
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// GET /api/v1/users/me
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(user_not_found)?;
    let partner = PartnerRepo::find_by_user_id(&state.pool, user.id).await?;
    Ok(Json(DataResponse::new(UserResponse::new(user, partner))))
}

/// PUT /api/v1/users/me
///
/// Partial update of name, email, and phone.
pub async fn update_me(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    ValidJson(input): ValidJson<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if let Some(email) = input.email.as_deref() {
        let holder = UserRepo::find_by_email(&state.pool, email).await?;
        if holder.is_some_and(|other| other.id != auth.user_id) {
            return Err(AppError::Core(CoreError::Conflict(
                "Email is already registered to another account".into(),
            )));
        }
    }

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or_else(user_not_found)?;

    tracing::info!(user_id = user.id, "Profile updated");

    let partner = PartnerRepo::find_by_user_id(&state.pool, user.id).await?;
    Ok(Json(DataResponse::new(UserResponse::new(user, partner))))
}

/// DELETE /api/v1/users/me
///
/// Removes the account with its orders. A partner's listings go with it.
pub async fn delete_me(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
) -> AppResult<Json<MessageResponse>> {
    if !UserRepo::delete_with_dependents(&state.pool, auth.user_id).await? {
        return Err(user_not_found());
    }

    tracing::info!(user_id = auth.user_id, "Account deleted");
    Ok(Json(MessageResponse::new("Account deleted successfully")))
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// GET /api/v1/users/me/orders
pub async fn orders(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
) -> AppResult<Json<DataResponse<OrderHistory>>> {
    let history = OrderRepo::history(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse::new(history)))
}

/// POST /api/v1/users/me/rental-requests
///
/// Estimated total is the inclusive day count times the daily rate.
pub async fn create_rental_request(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    ValidJson(input): ValidJson<CreateRentalRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<RentalRequest>>)> {
    let days = input
        .rental_days()
        .ok_or_else(|| invalid_field("endDate", "endDate must not be before startDate"))?;

    let vehicle = VehicleRepo::find_by_id(&state.pool, input.vehicle_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Vehicle" }))?;
    if vehicle.status != VehicleStatus::Active || !vehicle.availability.is_available {
        return Err(AppError::Core(CoreError::Validation(
            "Vehicle is not available for rent".into(),
        )));
    }

    let estimated_total = days as f64 * vehicle.price_per_day;
    let request =
        OrderRepo::create_rental_request(&state.pool, auth.user_id, &input, estimated_total)
            .await?;

    tracing::info!(
        rental_request_id = request.id,
        vehicle_id = vehicle.id,
        user_id = auth.user_id,
        days,
        "Rental request created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(request))))
}

/// POST /api/v1/users/me/material-orders
///
/// Quantity must reach the material's minimum order quantity.
pub async fn create_material_order(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    ValidJson(input): ValidJson<CreateMaterialOrder>,
) -> AppResult<(StatusCode, Json<DataResponse<MaterialOrder>>)> {
    let material = MaterialRepo::find_by_id(&state.pool, input.material_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Material" }))?;
    if material.status != MaterialStatus::Available || !material.availability.is_available {
        return Err(AppError::Core(CoreError::Validation(
            "Material is not available for order".into(),
        )));
    }
    if input.quantity < material.min_order_quantity {
        return Err(invalid_field(
            "quantity",
            format!(
                "quantity must be at least {}",
                material.min_order_quantity
            ),
        ));
    }

    let total_price = f64::from(input.quantity) * material.price_per_unit;
    let order =
        OrderRepo::create_material_order(&state.pool, auth.user_id, &input, total_price).await?;

    tracing::info!(
        material_order_id = order.id,
        material_id = material.id,
        user_id = auth.user_id,
        quantity = input.quantity,
        "Material order created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(order))))
}
