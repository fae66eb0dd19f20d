//! Repository for the `materials` table.

use equipmart_core::listing::ListingCriteria;
use equipmart_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::listing::{self, ListingTable};
use crate::models::availability::Availability;
use crate::models::material::{CreateMaterial, Material, MaterialCategory, UpdateMaterial};

const COLUMNS: &str = <Material as ListingTable>::COLUMNS;

/// Provides CRUD and listing operations for materials.
pub struct MaterialRepo;

impl MaterialRepo {
    /// Insert a material owned by `partner_id`, returning the created row.
    ///
    /// Omitted stock defaults to 0 and omitted minimum order to 1.
    pub async fn create(
        pool: &PgPool,
        partner_id: DbId,
        input: &CreateMaterial,
    ) -> Result<Material, sqlx::Error> {
        let query = format!(
            "INSERT INTO materials (partner_id, name, description, category, unit, price_per_unit,
                                    stock_quantity, min_order_quantity, city, state, status)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), COALESCE($8, 1), $9, $10,
                     COALESCE($11, 'available'::material_status))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(partner_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.category)
            .bind(input.unit)
            .bind(input.price_per_unit)
            .bind(input.stock_quantity)
            .bind(input.min_order_quantity)
            .bind(&input.city)
            .bind(&input.state)
            .bind(input.status)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Material>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM materials WHERE id = $1");
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of available materials matching `criteria`, plus the total match count.
    pub async fn list(
        pool: &PgPool,
        criteria: &ListingCriteria,
    ) -> Result<(Vec<Material>, i64), sqlx::Error> {
        listing::list::<Material>(pool, criteria).await
    }

    /// Update a material. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMaterial,
    ) -> Result<Option<Material>, sqlx::Error> {
        let query = format!(
            "UPDATE materials SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                unit = COALESCE($5, unit),
                price_per_unit = COALESCE($6, price_per_unit),
                stock_quantity = COALESCE($7, stock_quantity),
                min_order_quantity = COALESCE($8, min_order_quantity),
                city = COALESCE($9, city),
                state = COALESCE($10, state),
                status = COALESCE($11, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.category)
            .bind(input.unit)
            .bind(input.price_per_unit)
            .bind(input.stock_quantity)
            .bind(input.min_order_quantity)
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
    ) -> Result<Option<Material>, sqlx::Error> {
        let query = format!(
            "UPDATE materials SET availability = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .bind(Json(availability))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM materials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Distinct categories in use, in enum order.
    pub async fn categories(
        pool: &PgPool,
        include_unavailable: bool,
    ) -> Result<Vec<MaterialCategory>, sqlx::Error> {
        listing::distinct_categories::<Material, MaterialCategory>(pool, include_unavailable)
            .await
    }
}
