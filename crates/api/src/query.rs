//! Query parameter types for the catalog list endpoints.
//!
//! Each type validates the page window and that price bounds are finite,
//! then converts into a [`ListingCriteria`]. Values are otherwise passed
//! through unchecked: an
//! unknown category matches nothing, `min > max` matches nothing, and an
//! unknown `sort` falls back to the default ordering.

use equipmart_core::listing::{ListingCriteria, SortKey, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use equipmart_db::models::material::fields as material_fields;
use equipmart_db::models::vehicle::fields as vehicle_fields;
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// `?category=&minPriceHour=&...` for `GET /vehicles`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleListParams {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<i64>,
    pub category: Option<String>,
    #[validate(custom(function = "finite_price"))]
    pub min_price_hour: Option<f64>,
    #[validate(custom(function = "finite_price"))]
    pub max_price_hour: Option<f64>,
    #[validate(custom(function = "finite_price"))]
    pub min_price_day: Option<f64>,
    #[validate(custom(function = "finite_price"))]
    pub max_price_day: Option<f64>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl VehicleListParams {
    pub fn into_criteria(self) -> ListingCriteria {
        window(self.page, self.limit)
            .with_category(non_blank(self.category))
            .with_price_range(
                vehicle_fields::PRICE_PER_HOUR,
                self.min_price_hour,
                self.max_price_hour,
            )
            .with_price_range(
                vehicle_fields::PRICE_PER_DAY,
                self.min_price_day,
                self.max_price_day,
            )
            .with_location(vehicle_fields::CITY, self.city.as_deref())
            .with_location(vehicle_fields::STATE, self.state.as_deref())
            .with_search(non_blank(self.search))
            .with_sort(SortKey::from_param(self.sort.as_deref()))
    }
}

/// `?category=&minPrice=&maxPrice=&...` for `GET /materials`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MaterialListParams {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<i64>,
    pub category: Option<String>,
    #[validate(custom(function = "finite_price"))]
    pub min_price: Option<f64>,
    #[validate(custom(function = "finite_price"))]
    pub max_price: Option<f64>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl MaterialListParams {
    pub fn into_criteria(self) -> ListingCriteria {
        window(self.page, self.limit)
            .with_category(non_blank(self.category))
            .with_price_range(
                material_fields::PRICE_PER_UNIT,
                self.min_price,
                self.max_price,
            )
            .with_search(non_blank(self.search))
            .with_sort(SortKey::from_param(self.sort.as_deref()))
    }
}

/// `f64` parsing accepts `NaN` and `inf`, which would reach the price
/// comparison as bind values.
fn finite_price(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite")
            .with_message("price bounds must be finite numbers".into()))
    }
}

fn window(page: Option<i64>, limit: Option<i64>) -> ListingCriteria {
    ListingCriteria::new(
        page.unwrap_or(DEFAULT_PAGE),
        limit.unwrap_or(DEFAULT_PAGE_SIZE),
    )
}

/// Treat `?category=` (present but empty) the same as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
