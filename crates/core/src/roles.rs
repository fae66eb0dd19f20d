//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint in the users migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_PARTNER: &str = "partner";
pub const ROLE_CUSTOMER: &str = "customer";

/// Roles a user may pick for themselves at registration.
pub const SELF_ASSIGNABLE_ROLES: &[&str] = &[ROLE_CUSTOMER, ROLE_PARTNER];

/// Check whether a role may be chosen at registration.
pub fn is_self_assignable(role: &str) -> bool {
    SELF_ASSIGNABLE_ROLES.contains(&role)
}
