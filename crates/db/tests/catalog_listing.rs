//! Integration tests for catalog listing against a real database.
//!
//! - Filter combination and page window (count and page share one WHERE)
//! - Range monotonicity
//! - Location and full-text matching
//! - Category enumeration with and without the availability constraint

use equipmart_core::listing::{paginate, ListingCriteria, SortKey};
use equipmart_db::models::material::{CreateMaterial, MaterialCategory, MaterialStatus, MaterialUnit};
use equipmart_db::models::partner::CreatePartner;
use equipmart_db::models::user::CreateUser;
use equipmart_db::models::vehicle::{fields, CreateVehicle, VehicleCategory, VehicleStatus};
use equipmart_db::repositories::{MaterialRepo, UserRepo, VehicleRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_partner(pool: &PgPool, email: &str) -> i64 {
    let user = CreateUser {
        name: "Owner".to_string(),
        email: email.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        phone: None,
        role: "partner".to_string(),
    };
    let partner = CreatePartner {
        company_name: "Heavy Rentals".to_string(),
        contact_phone: None,
        city: Some("Denver".to_string()),
        state: Some("CO".to_string()),
    };
    let (_, partner) = UserRepo::create_with_partner(pool, &user, &partner)
        .await
        .unwrap();
    partner.id
}

fn new_vehicle(name: &str, category: VehicleCategory, per_hour: f64) -> CreateVehicle {
    CreateVehicle {
        name: name.to_string(),
        description: None,
        category,
        brand: None,
        model: None,
        year: None,
        price_per_hour: per_hour,
        price_per_day: per_hour * 8.0,
        city: "Denver".to_string(),
        state: "CO".to_string(),
        status: None,
    }
}

fn new_material(name: &str, category: MaterialCategory, status: MaterialStatus) -> CreateMaterial {
    CreateMaterial {
        name: name.to_string(),
        description: None,
        category,
        unit: MaterialUnit::Bag,
        price_per_unit: 12.5,
        stock_quantity: Some(100),
        min_order_quantity: None,
        city: "Austin".to_string(),
        state: "TX".to_string(),
        status: Some(status),
    }
}

fn excavators_50_to_200(page: i64) -> ListingCriteria {
    ListingCriteria::new(page, 10)
        .with_category(Some("excavator"))
        .with_price_range(fields::PRICE_PER_HOUR, Some(50.0), Some(200.0))
}

// ---------------------------------------------------------------------------
// Filtering and paging
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_excavator_page_two_of_three(pool: PgPool) {
    let partner_id = seed_partner(&pool, "owner@example.com").await;

    for i in 0..25 {
        let input = new_vehicle(&format!("Excavator {i}"), VehicleCategory::Excavator, 50.0 + i as f64 * 6.0);
        VehicleRepo::create(&pool, partner_id, &input).await.unwrap();
    }
    // Non-matching rows: wrong category, out of range, not active.
    VehicleRepo::create(&pool, partner_id, &new_vehicle("Dozer", VehicleCategory::Bulldozer, 100.0))
        .await
        .unwrap();
    VehicleRepo::create(&pool, partner_id, &new_vehicle("Big dig", VehicleCategory::Excavator, 350.0))
        .await
        .unwrap();
    let mut parked = new_vehicle("Parked", VehicleCategory::Excavator, 100.0);
    parked.status = Some(VehicleStatus::Maintenance);
    VehicleRepo::create(&pool, partner_id, &parked).await.unwrap();

    let (rows, total) = VehicleRepo::list(&pool, &excavators_50_to_200(2)).await.unwrap();

    assert_eq!(total, 25);
    assert_eq!(rows.len(), 10);
    assert!(rows.iter().all(|v| v.category == VehicleCategory::Excavator
        && v.status == VehicleStatus::Active
        && (50.0..=200.0).contains(&v.price_per_hour)));

    let pagination = paginate(total, 2, 10);
    assert_eq!(pagination.total_pages, 3);

    let (last, _) = VehicleRepo::list(&pool, &excavators_50_to_200(3)).await.unwrap();
    assert_eq!(last.len(), 5);

    let (beyond, total) = VehicleRepo::list(&pool, &excavators_50_to_200(9)).await.unwrap();
    assert!(beyond.is_empty());
    assert_eq!(total, 25);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_widening_a_bound_never_shrinks_results(pool: PgPool) {
    let partner_id = seed_partner(&pool, "owner@example.com").await;
    for per_hour in [10.0, 40.0, 80.0, 120.0, 400.0] {
        let input = new_vehicle("Loader", VehicleCategory::Loader, per_hour);
        VehicleRepo::create(&pool, partner_id, &input).await.unwrap();
    }

    let mut previous = 0;
    for max in [50.0, 100.0, 150.0, 500.0] {
        let criteria = ListingCriteria::default().with_price_range(
            fields::PRICE_PER_HOUR,
            Some(20.0),
            Some(max),
        );
        let (_, total) = VehicleRepo::list(&pool, &criteria).await.unwrap();
        assert!(total >= previous, "max={max} shrank results");
        previous = total;
    }
    assert_eq!(previous, 4);

    // min > max is accepted and simply matches nothing.
    let inverted = ListingCriteria::default().with_price_range(
        fields::PRICE_PER_HOUR,
        Some(200.0),
        Some(100.0),
    );
    let (rows, total) = VehicleRepo::list(&pool, &inverted).await.unwrap();
    assert!(rows.is_empty());
    assert_eq!(total, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_price_sort_orders_by_day_rate(pool: PgPool) {
    let partner_id = seed_partner(&pool, "owner@example.com").await;
    for per_hour in [30.0, 10.0, 20.0] {
        VehicleRepo::create(&pool, partner_id, &new_vehicle("Crane", VehicleCategory::Crane, per_hour))
            .await
            .unwrap();
    }

    let criteria = ListingCriteria::default().with_sort(SortKey::PriceAsc);
    let (rows, _) = VehicleRepo::list(&pool, &criteria).await.unwrap();
    let prices: Vec<f64> = rows.iter().map(|v| v.price_per_day).collect();
    assert_eq!(prices, vec![80.0, 160.0, 240.0]);

    let criteria = ListingCriteria::default().with_sort(SortKey::PriceDesc);
    let (rows, _) = VehicleRepo::list(&pool, &criteria).await.unwrap();
    assert_eq!(rows[0].price_per_day, 240.0);
}

// ---------------------------------------------------------------------------
// Location and search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_location_is_case_insensitive_partial_match(pool: PgPool) {
    let partner_id = seed_partner(&pool, "owner@example.com").await;
    let mut boulder = new_vehicle("Forklift", VehicleCategory::Forklift, 25.0);
    boulder.city = "Boulder".to_string();
    VehicleRepo::create(&pool, partner_id, &boulder).await.unwrap();
    VehicleRepo::create(&pool, partner_id, &new_vehicle("Forklift", VehicleCategory::Forklift, 25.0))
        .await
        .unwrap();

    let criteria = ListingCriteria::default().with_location(fields::CITY, Some("bould"));
    let (rows, total) = VehicleRepo::list(&pool, &criteria).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].city, "Boulder");

    // Wildcards in the term are literal.
    let criteria = ListingCriteria::default().with_location(fields::CITY, Some("%"));
    let (_, total) = VehicleRepo::list(&pool, &criteria).await.unwrap();
    assert_eq!(total, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_spans_brand_and_description(pool: PgPool) {
    let partner_id = seed_partner(&pool, "owner@example.com").await;
    let mut cat = new_vehicle("Mini excavator", VehicleCategory::Excavator, 60.0);
    cat.brand = Some("Caterpillar".to_string());
    VehicleRepo::create(&pool, partner_id, &cat).await.unwrap();
    let mut grader = new_vehicle("Road grader", VehicleCategory::Grader, 90.0);
    grader.description = Some("Ideal for highway grading work".to_string());
    VehicleRepo::create(&pool, partner_id, &grader).await.unwrap();

    let criteria = ListingCriteria::default().with_search(Some("caterpillar"));
    let (rows, _) = VehicleRepo::list(&pool, &criteria).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Mini excavator");

    let criteria = ListingCriteria::default().with_search(Some("highway grading"));
    let (rows, _) = VehicleRepo::list(&pool, &criteria).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Road grader");

    // Punctuation-only input yields no search term at all.
    let criteria = ListingCriteria::default().with_search(Some("&&!"));
    let (_, total) = VehicleRepo::list(&pool, &criteria).await.unwrap();
    assert_eq!(total, 2);

    // So does a query made only of stop words.
    let criteria = ListingCriteria::default().with_search(Some("the"));
    let (_, total) = VehicleRepo::list(&pool, &criteria).await.unwrap();
    assert_eq!(total, 2);

    let criteria = ListingCriteria::default().with_search(Some("the grader"));
    let (rows, _) = VehicleRepo::list(&pool, &criteria).await.unwrap();
    assert_eq!(rows.len(), 1);
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_categories_honor_include_unavailable(pool: PgPool) {
    let partner_id = seed_partner(&pool, "owner@example.com").await;
    for (name, category, status) in [
        ("Portland", MaterialCategory::Cement, MaterialStatus::Available),
        ("River sand", MaterialCategory::Sand, MaterialStatus::OutOfStock),
        ("Rebar", MaterialCategory::Steel, MaterialStatus::Available),
        ("Rebar 2", MaterialCategory::Steel, MaterialStatus::Available),
    ] {
        MaterialRepo::create(&pool, partner_id, &new_material(name, category, status))
            .await
            .unwrap();
    }

    let all = MaterialRepo::categories(&pool, true).await.unwrap();
    assert_eq!(
        all,
        vec![MaterialCategory::Cement, MaterialCategory::Sand, MaterialCategory::Steel]
    );

    let listed = MaterialRepo::categories(&pool, false).await.unwrap();
    assert_eq!(listed, vec![MaterialCategory::Cement, MaterialCategory::Steel]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_categories_empty_table(pool: PgPool) {
    assert!(VehicleRepo::categories(&pool, true).await.unwrap().is_empty());
}
