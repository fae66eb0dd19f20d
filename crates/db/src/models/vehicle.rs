//! Vehicle (rental equipment) model and DTOs.

use equipmart_core::listing::ListingSchema;
use equipmart_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use crate::listing::ListingTable;
use crate::models::availability::Availability;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Closed set of equipment categories (`vehicle_category` enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "vehicle_category", rename_all = "snake_case")]
pub enum VehicleCategory {
    Excavator,
    Bulldozer,
    Crane,
    Loader,
    DumpTruck,
    Forklift,
    Backhoe,
    Compactor,
    Grader,
    Other,
}

impl VehicleCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleCategory::Excavator => "excavator",
            VehicleCategory::Bulldozer => "bulldozer",
            VehicleCategory::Crane => "crane",
            VehicleCategory::Loader => "loader",
            VehicleCategory::DumpTruck => "dump_truck",
            VehicleCategory::Forklift => "forklift",
            VehicleCategory::Backhoe => "backhoe",
            VehicleCategory::Compactor => "compactor",
            VehicleCategory::Grader => "grader",
            VehicleCategory::Other => "other",
        }
    }
}

/// Lifecycle status (`vehicle_status` enum). Only `active` vehicles are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
pub enum VehicleStatus {
    Active,
    Inactive,
    Maintenance,
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `vehicles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: DbId,
    pub partner_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub category: VehicleCategory,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price_per_hour: f64,
    pub price_per_day: f64,
    pub city: String,
    pub state: String,
    pub status: VehicleStatus,
    pub is_featured: bool,
    pub rating: f64,
    pub review_count: i32,
    pub availability: Json<Availability>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Column names of the filterable vehicle fields.
pub mod fields {
    pub const PRICE_PER_HOUR: &str = "price_per_hour";
    pub const PRICE_PER_DAY: &str = "price_per_day";
    pub const CITY: &str = "city";
    pub const STATE: &str = "state";
}

impl ListingSchema for Vehicle {
    const ENTITY: &'static str = "Vehicle";
    const ACTIVE_STATUS: &'static str = "active";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "description", "brand", "model"];
    const SORT_PRICE_FIELD: &'static str = fields::PRICE_PER_DAY;
}

impl ListingTable for Vehicle {
    const TABLE: &'static str = "vehicles";
    const COLUMNS: &'static str = "id, partner_id, name, description, category, brand, model, \
        year, price_per_hour, price_per_day, city, state, status, is_featured, rating, \
        review_count, availability, created_at, updated_at";
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Body of `POST /vehicles`. The owner comes from the acting principal.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicle {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(max = 5000, message = "description must be at most 5000 characters"))]
    pub description: Option<String>,
    pub category: VehicleCategory,
    #[validate(length(max = 100))]
    pub brand: Option<String>,
    #[validate(length(max = 100))]
    pub model: Option<String>,
    #[validate(range(min = 1900, max = 2100, message = "year must be between 1900 and 2100"))]
    pub year: Option<i32>,
    #[validate(range(min = 0.0, message = "pricePerHour must not be negative"))]
    pub price_per_hour: f64,
    #[validate(range(min = 0.0, message = "pricePerDay must not be negative"))]
    pub price_per_day: f64,
    #[validate(length(min = 1, max = 100, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, max = 100, message = "state is required"))]
    pub state: String,
    pub status: Option<VehicleStatus>,
}

/// Body of `PUT /vehicles/{id}`. Only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicle {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 5000, message = "description must be at most 5000 characters"))]
    pub description: Option<String>,
    pub category: Option<VehicleCategory>,
    #[validate(length(max = 100))]
    pub brand: Option<String>,
    #[validate(length(max = 100))]
    pub model: Option<String>,
    #[validate(range(min = 1900, max = 2100, message = "year must be between 1900 and 2100"))]
    pub year: Option<i32>,
    #[validate(range(min = 0.0, message = "pricePerHour must not be negative"))]
    pub price_per_hour: Option<f64>,
    #[validate(range(min = 0.0, message = "pricePerDay must not be negative"))]
    pub price_per_day: Option<f64>,
    #[validate(length(min = 1, max = 100, message = "city must not be empty"))]
    pub city: Option<String>,
    #[validate(length(min = 1, max = 100, message = "state must not be empty"))]
    pub state: Option<String>,
    pub status: Option<VehicleStatus>,
}
