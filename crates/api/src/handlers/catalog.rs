//! Helpers shared by the vehicle and material handlers.

use std::collections::HashMap;

use equipmart_core::types::DbId;
use equipmart_db::models::partner::WithPartner;
use equipmart_db::repositories::PartnerRepo;
use serde::Serialize;
use sqlx::PgPool;

/// Attach each record's owner summary with one batched partner lookup.
pub async fn attach_partners<T, F>(
    pool: &PgPool,
    items: Vec<T>,
    owner_of: F,
) -> Result<Vec<WithPartner<T>>, sqlx::Error>
where
    T: Serialize,
    F: Fn(&T) -> DbId,
{
    let mut ids: Vec<DbId> = items.iter().map(&owner_of).collect();
    ids.sort_unstable();
    ids.dedup();

    let summaries: HashMap<DbId, _> = PartnerRepo::summaries_by_ids(pool, &ids)
        .await?
        .into_iter()
        .map(|summary| (summary.id, summary))
        .collect();

    Ok(items
        .into_iter()
        .map(|item| {
            let partner = summaries.get(&owner_of(&item)).cloned();
            WithPartner { item, partner }
        })
        .collect())
}

/// Attach the owner summary to a single record.
pub async fn with_partner<T: Serialize>(
    pool: &PgPool,
    item: T,
    owner_id: DbId,
) -> Result<WithPartner<T>, sqlx::Error> {
    let partner = PartnerRepo::find_summary(pool, owner_id).await?;
    Ok(WithPartner { item, partner })
}
