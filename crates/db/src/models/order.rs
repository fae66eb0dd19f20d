//! Rental requests (vehicles) and material orders placed by users.

use equipmart_core::types::{CalendarDate, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Status every new request or order starts in.
pub const STATUS_PENDING: &str = "pending";

/// A row from the `rental_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalRequest {
    pub id: DbId,
    pub user_id: DbId,
    pub vehicle_id: DbId,
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
    pub notes: Option<String>,
    pub estimated_total: f64,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `material_orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialOrder {
    pub id: DbId,
    pub user_id: DbId,
    pub material_id: DbId,
    pub quantity: i32,
    pub delivery_address: String,
    pub total_price: f64,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /users/me/rental-requests`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalRequest {
    pub vehicle_id: DbId,
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
    #[validate(length(max = 1000, message = "notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

impl CreateRentalRequest {
    /// Rental length in days, counting both ends. `None` when the range is inverted.
    pub fn rental_days(&self) -> Option<i64> {
        let days = (self.end_date - self.start_date).num_days() + 1;
        (days > 0).then_some(days)
    }
}

/// Body of `POST /users/me/material-orders`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterialOrder {
    pub material_id: DbId,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    #[validate(length(min = 1, max = 500, message = "deliveryAddress is required"))]
    pub delivery_address: String,
}

/// Everything a user has ordered, newest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistory {
    pub rental_requests: Vec<RentalRequest>,
    pub material_orders: Vec<MaterialOrder>,
}
