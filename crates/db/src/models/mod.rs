//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches
//!
//! Wire names are camelCase throughout.

pub mod availability;
pub mod material;
pub mod order;
pub mod partner;
pub mod user;
pub mod vehicle;
