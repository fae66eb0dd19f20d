//! HTTP-level integration tests for the `/vehicles` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, post_json, post_json_auth, put_json_auth};
use equipmart_db::models::vehicle::{CreateVehicle, VehicleCategory, VehicleStatus};
use equipmart_db::repositories::VehicleRepo;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_vehicle(category: VehicleCategory, per_hour: f64) -> CreateVehicle {
    CreateVehicle {
        name: "Hydraulic excavator".to_string(),
        description: Some("20 ton class".to_string()),
        category,
        brand: Some("Komatsu".to_string()),
        model: Some("PC210".to_string()),
        year: Some(2021),
        price_per_hour: per_hour,
        price_per_day: per_hour * 8.0,
        city: "Denver".to_string(),
        state: "CO".to_string(),
        status: None,
    }
}

fn create_body() -> serde_json::Value {
    json!({
        "name": "Wheel loader",
        "category": "loader",
        "pricePerHour": 80.0,
        "pricePerDay": 600.0,
        "city": "Austin",
        "state": "TX"
    })
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_empty_has_zero_pages(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/vehicles").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], json!([]));
    assert_eq!(
        json["pagination"],
        json!({"page": 1, "limit": 10, "total": 0, "pages": 0})
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filtered_second_page(pool: PgPool) {
    let (_, partner, _) = common::seed_partner(&pool, "owner@example.com", "Rocky Rentals").await;
    for i in 0..25 {
        let input = new_vehicle(VehicleCategory::Excavator, 60.0 + i as f64);
        VehicleRepo::create(&pool, partner.id, &input).await.unwrap();
    }
    VehicleRepo::create(&pool, partner.id, &new_vehicle(VehicleCategory::Crane, 100.0))
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = get(
        app,
        "/api/v1/vehicles?category=excavator&minPriceHour=50&maxPriceHour=200&page=2&limit=10",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["pagination"],
        json!({"page": 2, "limit": 10, "total": 25, "pages": 3})
    );
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 10);
    assert!(data.iter().all(|v| v["category"] == "excavator"));
    assert_eq!(data[0]["partner"]["companyName"], "Rocky Rentals");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_hides_inactive_and_sorts_by_price(pool: PgPool) {
    let (_, partner, _) = common::seed_partner(&pool, "owner@example.com", "Acme").await;
    for per_hour in [30.0, 10.0, 20.0] {
        VehicleRepo::create(&pool, partner.id, &new_vehicle(VehicleCategory::Loader, per_hour))
            .await
            .unwrap();
    }
    let mut parked = new_vehicle(VehicleCategory::Loader, 5.0);
    parked.status = Some(VehicleStatus::Maintenance);
    VehicleRepo::create(&pool, partner.id, &parked).await.unwrap();

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/vehicles?sort=price_asc").await).await;

    let hourly: Vec<f64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["pricePerHour"].as_f64().unwrap())
        .collect();
    assert_eq!(hourly, vec![10.0, 20.0, 30.0]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_sort_falls_back(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/vehicles?sort=cheapest-first").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bad_query_params_return_400_with_errors(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/vehicles?limit=500").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["errors"][0]["field"], "limit");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/vehicles?page=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["field"], "query");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_finite_price_bounds_return_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/vehicles?maxPriceHour=NaN").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["errors"][0]["field"], "maxPriceHour");
    assert_eq!(json["errors"][0]["message"], "price bounds must be finite numbers");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/vehicles?minPriceDay=inf").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["field"], "minPriceDay");
}

// ---------------------------------------------------------------------------
// Single record
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_missing_vehicle_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/vehicles/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Vehicle not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_assigns_callers_partner(pool: PgPool) {
    let (_, partner, token) = common::seed_partner(&pool, "owner@example.com", "Acme").await;

    let mut body = create_body();
    body["partnerId"] = json!(999_999);

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/vehicles", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["partnerId"], partner.id);
    assert_eq!(json["data"]["status"], "active");
    assert_eq!(json["data"]["availability"]["isAvailable"], true);
    assert_eq!(json["data"]["partner"]["companyName"], "Acme");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_requires_partner(pool: PgPool) {
    let (_, customer_token) = common::seed_customer(&pool, "c@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/vehicles", create_body()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/vehicles", create_body(), &customer_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_owner_update_is_forbidden_even_with_bad_payload(pool: PgPool) {
    let (_, owner, _) = common::seed_partner(&pool, "owner@example.com", "Owner Co").await;
    let (_, _, other_token) = common::seed_partner(&pool, "other@example.com", "Other Co").await;
    let vehicle = VehicleRepo::create(&pool, owner.id, &new_vehicle(VehicleCategory::Crane, 90.0))
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/vehicles/{}", vehicle.id),
        json!({"pricePerHour": -1}),
        &other_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_owner_update_is_partial(pool: PgPool) {
    let (_, owner, token) = common::seed_partner(&pool, "owner@example.com", "Owner Co").await;
    let vehicle = VehicleRepo::create(&pool, owner.id, &new_vehicle(VehicleCategory::Crane, 90.0))
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/vehicles/{}", vehicle.id),
        json!({"pricePerDay": 650.0}),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["pricePerDay"], 650.0);
    assert_eq!(json["data"]["pricePerHour"], 90.0);
    assert_eq!(json["data"]["name"], "Hydraulic excavator");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_owner_update_with_invalid_payload_returns_400(pool: PgPool) {
    let (_, owner, token) = common::seed_partner(&pool, "owner@example.com", "Owner Co").await;
    let vehicle = VehicleRepo::create(&pool, owner.id, &new_vehicle(VehicleCategory::Crane, 90.0))
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/vehicles/{}", vehicle.id),
        json!({"pricePerHour": -1}),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["field"], "pricePerHour");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_owner_delete_is_forbidden_and_record_remains(pool: PgPool) {
    let (_, owner, owner_token) = common::seed_partner(&pool, "owner@example.com", "Owner Co").await;
    let (_, _, other_token) = common::seed_partner(&pool, "other@example.com", "Other Co").await;
    let vehicle = VehicleRepo::create(&pool, owner.id, &new_vehicle(VehicleCategory::Crane, 90.0))
        .await
        .unwrap();
    let uri = format!("/api/v1/vehicles/{}", vehicle.id);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &other_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(VehicleRepo::find_by_id(&pool, vehicle.id).await.unwrap().is_some());

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &owner_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);

    let app = common::build_test_app(pool);
    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_missing_vehicle_is_404_not_403(pool: PgPool) {
    let (_, token) = common::seed_customer(&pool, "c@example.com").await;

    let app = common::build_test_app(pool);
    let response = delete_auth(app, "/api/v1/vehicles/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_owner_replaces_availability(pool: PgPool) {
    let (_, owner, token) = common::seed_partner(&pool, "owner@example.com", "Owner Co").await;
    let vehicle = VehicleRepo::create(&pool, owner.id, &new_vehicle(VehicleCategory::Crane, 90.0))
        .await
        .unwrap();
    let uri = format!("/api/v1/vehicles/{}/availability", vehicle.id);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &uri,
        json!({
            "isAvailable": false,
            "blockedDates": ["2026-08-02", "2026-08-01", "2026-08-02"]
        }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["availability"]["isAvailable"], false);
    assert_eq!(
        json["data"]["availability"]["blockedDates"],
        json!(["2026-08-01", "2026-08-02"])
    );

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &uri,
        json!({
            "isAvailable": true,
            "availableFrom": "2026-09-10T00:00:00Z",
            "availableUntil": "2026-09-01T00:00:00Z"
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["field"], "availableUntil");
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_category_list_follows_config(pool: PgPool) {
    let (_, partner, _) = common::seed_partner(&pool, "owner@example.com", "Acme").await;
    VehicleRepo::create(&pool, partner.id, &new_vehicle(VehicleCategory::Crane, 90.0))
        .await
        .unwrap();
    let mut parked = new_vehicle(VehicleCategory::Bulldozer, 70.0);
    parked.status = Some(VehicleStatus::Inactive);
    VehicleRepo::create(&pool, partner.id, &parked).await.unwrap();

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/vehicles/categories/list").await).await;
    assert_eq!(json["data"], json!(["bulldozer", "crane"]));

    let mut config = common::test_config();
    config.category_list_include_unavailable = false;
    let app = common::build_test_app_with(pool, config);
    let json = body_json(get(app, "/api/v1/vehicles/categories/list").await).await;
    assert_eq!(json["data"], json!(["crane"]));
}
