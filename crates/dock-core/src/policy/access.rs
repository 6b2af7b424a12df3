//! Access gate shared by every service operation

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::UserId;

/// The authenticated caller of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub is_staff: bool,
}

impl Principal {
    pub fn new(user_id: UserId, is_staff: bool) -> Self {
        Self { user_id, is_staff }
    }

    #[inline]
    pub fn owns(&self, owner: UserId) -> bool {
        self.user_id == owner
    }
}

/// What an operation requires of its caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Public,
    Authenticated,
    /// Caller must be the resource owner. Staff get no bypass.
    Owner,
    OwnerOrStaff,
    Staff,
}

/// Check `principal` against `capability`.
///
/// `owner` is the owner of the resource being touched and is only consulted
/// by the owner capabilities; a missing owner never matches.
pub fn authorize(
    principal: Option<&Principal>,
    capability: Capability,
    owner: Option<UserId>,
) -> Result<(), DomainError> {
    if capability == Capability::Public {
        return Ok(());
    }

    let principal = principal.ok_or(DomainError::Unauthenticated)?;
    let is_owner = owner.is_some_and(|owner| principal.owns(owner));

    match capability {
        Capability::Public | Capability::Authenticated => Ok(()),
        Capability::Owner if is_owner => Ok(()),
        Capability::Owner => Err(DomainError::NotOwner),
        Capability::OwnerOrStaff if is_owner || principal.is_staff => Ok(()),
        Capability::OwnerOrStaff => Err(DomainError::NotOwner),
        Capability::Staff if principal.is_staff => Ok(()),
        Capability::Staff => Err(DomainError::StaffOnly),
    }
}

/// Shorthand for operations that only need a signed-in caller.
pub fn require_principal(principal: Option<&Principal>) -> Result<&Principal, DomainError> {
    authorize(principal, Capability::Authenticated, None)?;
    principal.ok_or(DomainError::Unauthenticated)
}
