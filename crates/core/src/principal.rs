//! The acting principal and the ownership predicate used by every mutating
//! catalog endpoint.

use crate::error::CoreError;
use crate::roles::ROLE_PARTNER;
use crate::types::DbId;

/// The authenticated identity making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: DbId,
    pub role: String,
    /// Partner profile id, present only for users who own listings.
    pub partner_id: Option<DbId>,
}

impl Principal {
    /// Whether this principal may create catalog listings.
    pub fn is_partner(&self) -> bool {
        self.partner_id.is_some() && self.role == ROLE_PARTNER
    }
}

/// True when the principal's partner identity owns the record.
pub fn is_owner(principal: &Principal, owner_partner_id: DbId) -> bool {
    principal.partner_id == Some(owner_partner_id)
}

/// [`is_owner`] as a guard: `Forbidden` when the principal is not the owner.
pub fn ensure_owner(
    principal: &Principal,
    owner_partner_id: DbId,
    entity: &'static str,
) -> Result<(), CoreError> {
    if is_owner(principal, owner_partner_id) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "You do not have permission to modify this {}",
            entity.to_lowercase()
        )))
    }
}
