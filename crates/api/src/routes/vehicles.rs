//! Route definitions for the `/vehicles` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::vehicles;
use crate::state::AppState;

/// Routes mounted at `/vehicles`.
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
        .route("/", get(vehicles::list).post(vehicles::create))
        .route("/categories/list", get(vehicles::categories))
        .route(
            "/{id}",
            get(vehicles::get_by_id)
                .put(vehicles::update)
                .delete(vehicles::delete),
        )
        .route("/{id}/availability", post(vehicles::set_availability))
}
