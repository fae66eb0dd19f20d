//! Route definitions for the `/materials` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::materials;
use crate::state::AppState;

/// Routes mounted at `/materials`.
///
/// ```text
/// GET    /                   -> list
/// POST   /                   -> create
/// GET    /categories/list    -> categories
/// GET    /{id}               -> get_by_id
/// PUT    /{id}               -> update
/// DELETE /{id}               -> delete
/// POST   /{id}/availability  -> set_availability
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(materials::list).post(materials::create))
        .route("/categories/list", get(materials::categories))
        .route(
            "/{id}",
            get(materials::get_by_id)
                .put(materials::update)
                .delete(materials::delete),
        )
        .route("/{id}/availability", post(materials::set_availability))
}
