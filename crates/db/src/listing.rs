//! Execution of listing [`QueryPlan`]s against PostgreSQL.
//!
//! Predicates are rendered into a `WHERE` clause with every value bound as a
//! parameter. Column names only ever come from `&'static str` schema
//! constants, never from request input.
//!
//! [`fetch_page`] runs the count and the page as two separate statements.
//! They are not wrapped in a snapshot transaction, so a concurrent write can
//! make `total` and the returned rows disagree by a few records. Catalog data
//! is read-mostly and this is accepted.

use equipmart_core::listing::{
    availability_predicate, build_query, ListingCriteria, ListingSchema, Predicate, QueryPlan,
};
use equipmart_core::search::SEARCH_CONFIG;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

/// A listing entity backed by a table.
pub trait ListingTable: ListingSchema + for<'r> FromRow<'r, PgRow> + Send + Unpin {
    const TABLE: &'static str;
    /// Column list selected for a full row.
    const COLUMNS: &'static str;
}

/// The `tsvector` expression over the given columns.
///
/// Must stay byte-identical to the expression in the GIN index migrations
/// for the index to be used.
pub fn search_document(fields: &[&str]) -> String {
    let joined = fields
        .iter()
        .map(|f| format!("coalesce({f}, '')"))
        .collect::<Vec<_>>()
        .join(" || ' ' || ");
    format!("to_tsvector('{SEARCH_CONFIG}', {joined})")
}

/// Append `WHERE a AND b AND ...` for the given predicates.
pub fn push_where(qb: &mut QueryBuilder<'_, Postgres>, predicates: &[Predicate]) {
    for (i, predicate) in predicates.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });

        match predicate {
            Predicate::Equals { field, value } => {
                qb.push(format!("{field}::text = "))
                    .push_bind(value.clone());
            }
            Predicate::AtLeast { field, value } => {
                qb.push(format!("{field} >= ")).push_bind(*value);
            }
            Predicate::AtMost { field, value } => {
                qb.push(format!("{field} <= ")).push_bind(*value);
            }
            Predicate::Contains { field, pattern } => {
                qb.push(format!("{field} ILIKE "))
                    .push_bind(pattern.clone());
            }
            Predicate::FullText { fields, tsquery } => {
                qb.push(format!(
                    "{} @@ to_tsquery('{SEARCH_CONFIG}', ",
                    search_document(fields)
                ))
                .push_bind(tsquery.clone())
                .push(")");
            }
        }
    }
}

/// Append `ORDER BY ... LIMIT $n OFFSET $m`.
fn push_window(qb: &mut QueryBuilder<'_, Postgres>, plan: &QueryPlan) {
    if !plan.ordering.is_empty() {
        let order = plan
            .ordering
            .iter()
            .map(|term| format!("{} {}", term.field, term.direction.as_sql()))
            .collect::<Vec<_>>()
            .join(", ");
        qb.push(format!(" ORDER BY {order}"));
    }
    qb.push(" LIMIT ")
        .push_bind(plan.limit)
        .push(" OFFSET ")
        .push_bind(plan.offset);
}

/// Execute a plan: total matches ignoring pagination, then the requested page.
pub async fn fetch_page<T: ListingTable>(
    pool: &PgPool,
    plan: &QueryPlan,
) -> Result<(Vec<T>, i64), sqlx::Error> {
    let mut count_qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", T::TABLE));
    push_where(&mut count_qb, &plan.predicates);
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let mut page_qb = QueryBuilder::new(format!("SELECT {} FROM {}", T::COLUMNS, T::TABLE));
    push_where(&mut page_qb, &plan.predicates);
    push_window(&mut page_qb, plan);
    let rows = page_qb.build_query_as::<T>().fetch_all(pool).await?;

    tracing::debug!(
        table = T::TABLE,
        predicates = plan.predicates.len(),
        total,
        returned = rows.len(),
        "Listing query executed",
    );

    Ok((rows, total))
}

/// Build and execute the listing query for `criteria`.
pub async fn list<T: ListingTable>(
    pool: &PgPool,
    criteria: &ListingCriteria,
) -> Result<(Vec<T>, i64), sqlx::Error> {
    fetch_page::<T>(pool, &build_query::<T>(criteria)).await
}

/// Distinct category values of a table, in enum declaration order.
///
/// With `include_unavailable` every row contributes; otherwise only rows
/// passing the availability constraint do.
pub async fn distinct_categories<T, C>(
    pool: &PgPool,
    include_unavailable: bool,
) -> Result<Vec<C>, sqlx::Error>
where
    T: ListingTable,
    C: for<'r> sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres> + Send + Unpin,
{
    let mut qb = QueryBuilder::new(format!(
        "SELECT DISTINCT {} FROM {}",
        T::CATEGORY_FIELD,
        T::TABLE
    ));
    if !include_unavailable {
        push_where(&mut qb, &[availability_predicate::<T>()]);
    }
    qb.push(format!(" ORDER BY {}", T::CATEGORY_FIELD));

    qb.build_query_scalar::<C>().fetch_all(pool).await
}
