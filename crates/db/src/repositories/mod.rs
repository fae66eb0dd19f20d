//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod material_repo;
pub mod order_repo;
pub mod partner_repo;
pub mod user_repo;
pub mod vehicle_repo;

pub use material_repo::MaterialRepo;
pub use order_repo::OrderRepo;
pub use partner_repo::PartnerRepo;
pub use user_repo::UserRepo;
pub use vehicle_repo::VehicleRepo;
