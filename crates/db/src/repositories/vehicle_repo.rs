//! Repository for the `vehicles` table.

use equipmart_core::listing::ListingCriteria;
use equipmart_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::listing::{self, ListingTable};
use crate::models::availability::Availability;
use crate::models::vehicle::{CreateVehicle, UpdateVehicle, Vehicle, VehicleCategory};

const COLUMNS: &str = <Vehicle as ListingTable>::COLUMNS;

/// Provides CRUD and listing operations for vehicles.
pub struct VehicleRepo;

impl VehicleRepo {
    /// Insert a vehicle owned by `partner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        partner_id: DbId,
        input: &CreateVehicle,
    ) -> Result<Vehicle, sqlx::Error> {
        let query = format!(
            "INSERT INTO vehicles (partner_id, name, description, category, brand, model, year,
                                   price_per_hour, price_per_day, city, state, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, COALESCE($12, 'active'::vehicle_status))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(partner_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.category)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(input.year)
            .bind(input.price_per_hour)
            .bind(input.price_per_day)
            .bind(&input.city)
            .bind(&input.state)
            .bind(input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a vehicle by ID regardless of status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicles WHERE id = $1");
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of active vehicles matching `criteria`, plus the total match count.
    pub async fn list(
        pool: &PgPool,
        criteria: &ListingCriteria,
    ) -> Result<(Vec<Vehicle>, i64), sqlx::Error> {
        listing::list::<Vehicle>(pool, criteria).await
    }

    /// Update a vehicle. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVehicle,
    ) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!(
            "UPDATE vehicles SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                brand = COALESCE($5, brand),
                model = COALESCE($6, model),
                year = COALESCE($7, year),
                price_per_hour = COALESCE($8, price_per_hour),
                price_per_day = COALESCE($9, price_per_day),
                city = COALESCE($10, city),
                state = COALESCE($11, state),
                status = COALESCE($12, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.category)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(input.year)
            .bind(input.price_per_hour)
            .bind(input.price_per_day)
            .bind(&input.city)
            .bind(&input.state)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Replace the availability sub-record.
    pub async fn set_availability(
        pool: &PgPool,
        id: DbId,
        availability: &Availability,
    ) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!(
            "UPDATE vehicles SET availability = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(id)
            .bind(Json(availability))
            .fetch_optional(pool)
            .await
    }

    /// Delete a vehicle by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Distinct categories in use, in enum order.
    pub async fn categories(
        pool: &PgPool,
        include_unavailable: bool,
    ) -> Result<Vec<VehicleCategory>, sqlx::Error> {
        listing::distinct_categories::<Vehicle, VehicleCategory>(pool, include_unavailable).await
    }
}
