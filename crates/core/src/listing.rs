//! Filter-and-page query builder for catalog listings.
//!
//! [`build_query`] folds a [`ListingCriteria`] into a [`QueryPlan`]: a list of
//! independent [`Predicate`] terms (combined with AND by the storage layer),
//! exactly one fixed ordering, and an offset/limit window. [`paginate`] turns
//! the total match count into [`PaginationResult`] metadata.
//!
//! Everything here is pure. Entity specifics (status column, searchable
//! text, price column used for sorting) come from a [`ListingSchema`]
//! implementation, so vehicles and materials share one engine.

use serde::Serialize;

use crate::search::{build_tsquery, contains_pattern};

// ---------------------------------------------------------------------------
// Page window defaults
// ---------------------------------------------------------------------------

/// Page requested when the caller omits `page`.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller omits `limit`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Per-entity description consumed by [`build_query`].
///
/// Field names are column names of the entity's table.
pub trait ListingSchema {
    /// Human-readable entity name (`"Vehicle"`), used in error messages.
    const ENTITY: &'static str;

    /// Column holding the lifecycle status.
    const STATUS_FIELD: &'static str = "status";

    /// Status value that makes a record eligible for listing.
    const ACTIVE_STATUS: &'static str;

    /// Column holding the category enum.
    const CATEGORY_FIELD: &'static str = "category";

    /// Text columns covered by the full-text index.
    const SEARCH_FIELDS: &'static [&'static str];

    /// Price column used by the price sort orders.
    const SORT_PRICE_FIELD: &'static str;
}

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// Optional inclusive bounds on one price column.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRange {
    pub field: &'static str,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Case-insensitive partial match on one text column.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFilter {
    pub field: &'static str,
    pub term: String,
}

/// Selectable result orderings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Featured listings first, then highest rated.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    Rating,
    Newest,
}

impl SortKey {
    /// Resolve the `sort` query parameter. Absent or unknown values fall back
    /// to [`SortKey::Featured`].
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("price_asc") | Some("price_low") => SortKey::PriceAsc,
            Some("price_desc") | Some("price_high") => SortKey::PriceDesc,
            Some("rating") => SortKey::Rating,
            Some("newest") => SortKey::Newest,
            _ => SortKey::Featured,
        }
    }
}

/// Everything a listing request can constrain. Built fresh per request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCriteria {
    pub category: Option<String>,
    pub price_ranges: Vec<PriceRange>,
    pub location_filters: Vec<LocationFilter>,
    pub search_term: Option<String>,
    pub sort: SortKey,
    pub page: i64,
    pub page_size: i64,
}

impl Default for ListingCriteria {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

impl ListingCriteria {
    /// Criteria with no filters for the given page window.
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            category: None,
            price_ranges: Vec::new(),
            location_filters: Vec::new(),
            search_term: None,
            sort: SortKey::default(),
            page,
            page_size,
        }
    }

    pub fn with_category(mut self, category: Option<impl Into<String>>) -> Self {
        self.category = category.map(Into::into);
        self
    }

    /// Add bounds for a price column. A range with neither bound is dropped.
    pub fn with_price_range(
        mut self,
        field: &'static str,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Self {
        if min.is_some() || max.is_some() {
            self.price_ranges.push(PriceRange { field, min, max });
        }
        self
    }

    /// Add a partial-match filter. Blank terms are dropped.
    pub fn with_location(mut self, field: &'static str, term: Option<&str>) -> Self {
        if let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) {
            self.location_filters.push(LocationFilter {
                field,
                term: term.to_string(),
            });
        }
        self
    }

    pub fn with_search(mut self, term: Option<impl Into<String>>) -> Self {
        self.search_term = term.map(Into::into);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

// ---------------------------------------------------------------------------
// Query plan
// ---------------------------------------------------------------------------

/// One AND-combined constraint on the storage query.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `field = value` (compared as text).
    Equals { field: &'static str, value: String },
    /// `field >= value`.
    AtLeast { field: &'static str, value: f64 },
    /// `field <= value`.
    AtMost { field: &'static str, value: f64 },
    /// `field ILIKE pattern`; the pattern is already escaped and wrapped.
    Contains { field: &'static str, pattern: String },
    /// Full-text match of `tsquery` against the concatenated `fields`.
    FullText {
        fields: &'static [&'static str],
        tsquery: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTerm {
    pub field: &'static str,
    pub direction: Direction,
}

impl OrderTerm {
    const fn new(field: &'static str, direction: Direction) -> Self {
        Self { field, direction }
    }
}

/// Executable description of a listing query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub predicates: Vec<Predicate>,
    pub ordering: Vec<OrderTerm>,
    pub offset: i64,
    pub limit: i64,
}

/// The status constraint every listing query starts with.
pub fn availability_predicate<S: ListingSchema>() -> Predicate {
    Predicate::Equals {
        field: S::STATUS_FIELD,
        value: S::ACTIVE_STATUS.to_string(),
    }
}

/// The fixed ordering for a sort key.
pub fn ordering_for<S: ListingSchema>(sort: SortKey) -> Vec<OrderTerm> {
    use Direction::{Asc, Desc};

    match sort {
        SortKey::Featured => vec![
            OrderTerm::new("is_featured", Desc),
            OrderTerm::new("rating", Desc),
        ],
        SortKey::PriceAsc => vec![OrderTerm::new(S::SORT_PRICE_FIELD, Asc)],
        SortKey::PriceDesc => vec![OrderTerm::new(S::SORT_PRICE_FIELD, Desc)],
        SortKey::Rating => vec![
            OrderTerm::new("rating", Desc),
            OrderTerm::new("review_count", Desc),
        ],
        SortKey::Newest => vec![OrderTerm::new("created_at", Desc)],
    }
}

/// Translate criteria into a query plan.
///
/// The availability constraint always comes first and cannot be removed by
/// any criteria. Each remaining active filter contributes its own terms, so
/// a min and a max on the same column never overwrite each other.
pub fn build_query<S: ListingSchema>(criteria: &ListingCriteria) -> QueryPlan {
    let availability = std::iter::once(availability_predicate::<S>());

    let category = criteria
        .category
        .iter()
        .map(|value| Predicate::Equals {
            field: S::CATEGORY_FIELD,
            value: value.clone(),
        });

    let prices = criteria.price_ranges.iter().flat_map(|range| {
        let lower = range.min.map(|value| Predicate::AtLeast {
            field: range.field,
            value,
        });
        let upper = range.max.map(|value| Predicate::AtMost {
            field: range.field,
            value,
        });
        lower.into_iter().chain(upper)
    });

    let locations = criteria
        .location_filters
        .iter()
        .map(|filter| Predicate::Contains {
            field: filter.field,
            pattern: contains_pattern(&filter.term),
        });

    let search = criteria
        .search_term
        .as_deref()
        .and_then(build_tsquery)
        .map(|tsquery| Predicate::FullText {
            fields: S::SEARCH_FIELDS,
            tsquery,
        });

    let predicates = availability
        .chain(category)
        .chain(prices)
        .chain(locations)
        .chain(search)
        .collect();

    QueryPlan {
        predicates,
        ordering: ordering_for::<S>(criteria.sort),
        offset: (criteria.page - 1).saturating_mul(criteria.page_size),
        limit: criteria.page_size,
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Pagination summary returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationResult {
    pub page: i64,
    #[serde(rename = "limit")]
    pub page_size: i64,
    #[serde(rename = "total")]
    pub total_count: i64,
    #[serde(rename = "pages")]
    pub total_pages: i64,
}

/// Compute pagination metadata from the total match count.
///
/// The requested page is reported as-is, even past the last page.
pub fn paginate(total_count: i64, page: i64, page_size: i64) -> PaginationResult {
    let total_pages = if total_count <= 0 || page_size <= 0 {
        0
    } else {
        (total_count + page_size - 1) / page_size
    };

    PaginationResult {
        page,
        page_size,
        total_count: total_count.max(0),
        total_pages,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
