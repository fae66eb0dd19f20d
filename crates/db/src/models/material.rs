//! Construction material model and DTOs.

use equipmart_core::listing::ListingSchema;
use equipmart_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use crate::listing::ListingTable;
use crate::models::availability::Availability;

/// Closed set of material categories (`material_category` enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "material_category", rename_all = "snake_case")]
pub enum MaterialCategory {
    Cement,
    Sand,
    Gravel,
    Steel,
    Bricks,
    Timber,
    Tiles,
    Paint,
    Plumbing,
    Electrical,
    Other,
}

impl MaterialCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            MaterialCategory::Cement => "cement",
            MaterialCategory::Sand => "sand",
            MaterialCategory::Gravel => "gravel",
            MaterialCategory::Steel => "steel",
            MaterialCategory::Bricks => "bricks",
            MaterialCategory::Timber => "timber",
            MaterialCategory::Tiles => "tiles",
            MaterialCategory::Paint => "paint",
            MaterialCategory::Plumbing => "plumbing",
            MaterialCategory::Electrical => "electrical",
            MaterialCategory::Other => "other",
        }
    }
}

/// Selling unit (`material_unit` enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "material_unit", rename_all = "snake_case")]
pub enum MaterialUnit {
    Kg,
    Ton,
    Bag,
    Piece,
    CubicMeter,
    SquareMeter,
    Liter,
}

/// Lifecycle status (`material_status` enum). Only `available` materials are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "material_status", rename_all = "snake_case")]
pub enum MaterialStatus {
    Available,
    OutOfStock,
    Discontinued,
}

/// A row from the `materials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: DbId,
    pub partner_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub category: MaterialCategory,
    pub unit: MaterialUnit,
    pub price_per_unit: f64,
    pub stock_quantity: i32,
    pub min_order_quantity: i32,
    pub city: String,
    pub state: String,
    pub status: MaterialStatus,
    pub is_featured: bool,
    pub rating: f64,
    pub review_count: i32,
    pub availability: Json<Availability>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

pub mod fields {
    pub const PRICE_PER_UNIT: &str = "price_per_unit";
}

impl ListingSchema for Material {
    const ENTITY: &'static str = "Material";
    const ACTIVE_STATUS: &'static str = "available";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "description"];
    const SORT_PRICE_FIELD: &'static str = fields::PRICE_PER_UNIT;
}

impl ListingTable for Material {
    const TABLE: &'static str = "materials";
    const COLUMNS: &'static str = "id, partner_id, name, description, category, unit, \
        price_per_unit, stock_quantity, min_order_quantity, city, state, status, is_featured, \
        rating, review_count, availability, created_at, updated_at";
}

/// Body of `POST /materials`. The owner comes from the acting principal.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterial {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(max = 5000, message = "description must be at most 5000 characters"))]
    pub description: Option<String>,
    pub category: MaterialCategory,
    pub unit: MaterialUnit,
    #[validate(range(min = 0.0, message = "pricePerUnit must not be negative"))]
    pub price_per_unit: f64,
    #[validate(range(min = 0, message = "stockQuantity must not be negative"))]
    pub stock_quantity: Option<i32>,
    #[validate(range(min = 1, message = "minOrderQuantity must be at least 1"))]
    pub min_order_quantity: Option<i32>,
    #[validate(length(min = 1, max = 100, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, max = 100, message = "state is required"))]
    pub state: String,
    pub status: Option<MaterialStatus>,
}

/// Body of `PUT /materials/{id}`. Only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaterial {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 5000, message = "description must be at most 5000 characters"))]
    pub description: Option<String>,
    pub category: Option<MaterialCategory>,
    pub unit: Option<MaterialUnit>,
    #[validate(range(min = 0.0, message = "pricePerUnit must not be negative"))]
    pub price_per_unit: Option<f64>,
    #[validate(range(min = 0, message = "stockQuantity must not be negative"))]
    pub stock_quantity: Option<i32>,
    #[validate(range(min = 1, message = "minOrderQuantity must be at least 1"))]
    pub min_order_quantity: Option<i32>,
    #[validate(length(min = 1, max = 100, message = "city must not be empty"))]
    pub city: Option<String>,
    #[validate(length(min = 1, max = 100, message = "state must not be empty"))]
    pub state: Option<String>,
    pub status: Option<MaterialStatus>,
}
