use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`. All require authentication.
///
/// ```text
/// GET    /me                   -> me
/// PUT    /me                   -> update_me
/// DELETE /me                   -> delete_me
/// GET    /me/orders            -> orders
/// POST   /me/rental-requests   -> create_rental_request
/// POST   /me/material-orders   -> create_material_order
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(users::me).put(users::update_me).delete(users::delete_me),
        )
        .route("/me/orders", get(users::orders))
        .route("/me/rental-requests", post(users::create_rental_request))
        .route("/me/material-orders", post(users::create_material_order))
}
