//! Partner (listing owner) model and DTOs.

use equipmart_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `partners` table. One per partner user.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: DbId,
    pub user_id: DbId,
    pub company_name: String,
    pub contact_phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub rating: f64,
    pub is_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Owner summary attached to catalog responses.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerSummary {
    pub id: DbId,
    pub company_name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub rating: f64,
    pub is_verified: bool,
}

/// A catalog record with its owner's summary inlined under `partner`.
#[derive(Debug, Clone, Serialize)]
pub struct WithPartner<T: Serialize> {
    #[serde(flatten)]
    pub item: T,
    pub partner: Option<PartnerSummary>,
}

/// DTO for creating a partner profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePartner {
    pub company_name: String,
    pub contact_phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}
