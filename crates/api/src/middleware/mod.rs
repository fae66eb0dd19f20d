//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.
//! - [`rbac::Acting`] -- Authenticated user resolved to a [`Principal`](equipmart_core::principal::Principal).
//! - [`rbac::RequirePartner`] -- Requires a user with a partner profile.

pub mod auth;
pub mod rbac;
