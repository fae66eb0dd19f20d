pub mod auth;
pub mod health;
pub mod materials;
pub mod users;
pub mod vehicles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
///
/// /vehicles                                        list (public), create (partner)
/// /vehicles/categories/list                        distinct categories (public)
/// /vehicles/{id}                                   get (public), update, delete (owner)
/// /vehicles/{id}/availability                      replace availability (owner)
///
/// /materials                                       list (public), create (partner)
/// /materials/categories/list                       distinct categories (public)
/// /materials/{id}                                  get (public), update, delete (owner)
/// /materials/{id}/availability                     replace availability (owner)
///
/// /users/me                                        get, update, delete (auth)
/// /users/me/orders                                 order history (auth)
/// /users/me/rental-requests                        request a vehicle (auth)
/// /users/me/material-orders                        order a material (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login).
        .nest("/auth", auth::router())
        // Catalog.
        .nest("/vehicles", vehicles::router())
        .nest("/materials", materials::router())
        // The caller's own account and orders.
        .nest("/users", users::router())
}
