//! Repository for the `rental_requests` and `material_orders` tables.

use equipmart_core::types::DbId;
use sqlx::PgPool;

use crate::models::order::{
    CreateMaterialOrder, CreateRentalRequest, MaterialOrder, OrderHistory, RentalRequest,
    STATUS_PENDING,
};

const RENTAL_COLUMNS: &str = "id, user_id, vehicle_id, start_date, end_date, notes, \
                              estimated_total, status, created_at, updated_at";

const ORDER_COLUMNS: &str = "id, user_id, material_id, quantity, delivery_address, \
                             total_price, status, created_at, updated_at";

/// Provides order placement and history for users.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a pending rental request with a precomputed estimate.
    pub async fn create_rental_request(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateRentalRequest,
        estimated_total: f64,
    ) -> Result<RentalRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO rental_requests (user_id, vehicle_id, start_date, end_date, notes,
                                          estimated_total, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {RENTAL_COLUMNS}"
        );
        sqlx::query_as::<_, RentalRequest>(&query)
            .bind(user_id)
            .bind(input.vehicle_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.notes)
            .bind(estimated_total)
            .bind(STATUS_PENDING)
            .fetch_one(pool)
            .await
    }

    /// Insert a pending material order with a precomputed total.
    pub async fn create_material_order(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateMaterialOrder,
        total_price: f64,
    ) -> Result<MaterialOrder, sqlx::Error> {
        let query = format!(
            "INSERT INTO material_orders (user_id, material_id, quantity, delivery_address,
                                          total_price, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {ORDER_COLUMNS}"
        );
        sqlx::query_as::<_, MaterialOrder>(&query)
            .bind(user_id)
            .bind(input.material_id)
            .bind(input.quantity)
            .bind(&input.delivery_address)
            .bind(total_price)
            .bind(STATUS_PENDING)
            .fetch_one(pool)
            .await
    }

    pub async fn list_rental_requests(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<RentalRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {RENTAL_COLUMNS} FROM rental_requests
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, RentalRequest>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_material_orders(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<MaterialOrder>, sqlx::Error> {
        let query = format!(
            "SELECT {ORDER_COLUMNS} FROM material_orders
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, MaterialOrder>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Both order kinds for a user, newest first.
    pub async fn history(pool: &PgPool, user_id: DbId) -> Result<OrderHistory, sqlx::Error> {
        Ok(OrderHistory {
            rental_requests: Self::list_rental_requests(pool, user_id).await?,
            material_orders: Self::list_material_orders(pool, user_id).await?,
        })
    }
}
