//! Repository for the `partners` table.

use equipmart_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::partner::{CreatePartner, Partner, PartnerSummary};

const COLUMNS: &str = "id, user_id, company_name, contact_phone, city, state, rating, \
                       is_verified, created_at, updated_at";

const SUMMARY_COLUMNS: &str = "id, company_name, city, state, rating, is_verified";

/// Provides lookups of partner (listing owner) profiles.
pub struct PartnerRepo;

impl PartnerRepo {
    /// Insert a partner profile for `user_id`.
    ///
    /// Takes any executor so registration can run it inside its transaction.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        input: &CreatePartner,
    ) -> Result<Partner, sqlx::Error> {
        let query = format!(
            "INSERT INTO partners (user_id, company_name, contact_phone, city, state)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Partner>(&query)
            .bind(user_id)
            .bind(&input.company_name)
            .bind(&input.contact_phone)
            .bind(&input.city)
            .bind(&input.state)
            .fetch_one(executor)
            .await
    }

    /// The partner profile belonging to a user, if any.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Partner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM partners WHERE user_id = $1");
        sqlx::query_as::<_, Partner>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PartnerSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM partners WHERE id = $1");
        sqlx::query_as::<_, PartnerSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Summaries for a batch of partner IDs, in no particular order.
    pub async fn summaries_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<PartnerSummary>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM partners WHERE id = ANY($1)");
        sqlx::query_as::<_, PartnerSummary>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
