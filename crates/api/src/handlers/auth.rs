//! Handlers for the `/auth` resource (register, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use equipmart_core::error::CoreError;
use equipmart_core::roles::{is_self_assignable, ROLE_CUSTOMER, ROLE_PARTNER};
use equipmart_core::validation::FieldViolation;
use equipmart_db::models::partner::{CreatePartner, Partner};
use equipmart_db::models::user::{CreateUser, User, UserResponse};
use equipmart_db::repositories::{PartnerRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::issue_token;
use crate::auth::password::{check_password_rules, hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    pub password: String,
    #[validate(length(max = 30, message = "phone must be at most 30 characters"))]
    pub phone: Option<String>,
    /// `customer` (default) or `partner`.
    pub account_type: Option<String>,
    /// Required when `account_type` is `partner`.
    #[validate(length(min = 1, max = 200, message = "companyName must be 1-200 characters"))]
    pub company_name: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Partner accounts get their partner profile in the same transaction.
pub async fn register(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AuthResponse>>)> {
    check_password_rules(&input.password).map_err(|msg| {
        AppError::Core(CoreError::InvalidInput(vec![FieldViolation::new(
            "password", msg,
        )]))
    })?;

    let role = input.account_type.as_deref().unwrap_or(ROLE_CUSTOMER);
    if !is_self_assignable(role) {
        return Err(AppError::Core(CoreError::InvalidInput(vec![
            FieldViolation::new("accountType", "accountType must be customer or partner"),
        ])));
    }

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let new_user = CreateUser {
        name: input.name.trim().to_string(),
        email: input.email.trim().to_string(),
        password_hash,
        phone: input.phone.clone(),
        role: role.to_string(),
    };

    let (user, partner) = if role == ROLE_PARTNER {
        let company_name = input.company_name.clone().ok_or_else(|| {
            AppError::Core(CoreError::InvalidInput(vec![FieldViolation::new(
                "companyName",
                "companyName is required for partner accounts",
            )]))
        })?;
        let new_partner = CreatePartner {
            company_name,
            contact_phone: input.phone.clone(),
            city: None,
            state: None,
        };
        let (user, partner) =
            UserRepo::create_with_partner(&state.pool, &new_user, &new_partner).await?;
        (user, Some(partner))
    } else {
        (UserRepo::create(&state.pool, &new_user).await?, None)
    };

    tracing::info!(user_id = user.id, role = %user.role, "User registered");

    let response = auth_response(&state, user, partner)?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(response))))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        ))
    };

    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    let partner = PartnerRepo::find_by_user_id(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(DataResponse::new(auth_response(&state, user, partner)?)))
}

fn auth_response(
    state: &AppState,
    user: User,
    partner: Option<Partner>,
) -> AppResult<AuthResponse> {
    let token = issue_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: UserResponse::new(user, partner),
    })
}
