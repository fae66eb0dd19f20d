//! Domain core for the equipment & materials marketplace.
//!
//! Pure, I/O-free building blocks shared by the repository and HTTP layers:
//! the error taxonomy, the acting principal and ownership predicate, and the
//! filter-and-page query builder used by every catalog listing.

pub mod error;
pub mod listing;
pub mod principal;
pub mod roles;
pub mod search;
pub mod types;
pub mod validation;
