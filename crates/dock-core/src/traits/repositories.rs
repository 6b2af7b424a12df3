//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::entities::{
    AttachedShip, DraftSummary, NewShip, NewUser, Parking, ParkingShip, Ship, User,
};
use crate::error::DomainError;
use crate::value_objects::{ParkingId, ParkingStatus, ShipId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Update profile fields
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Grant or revoke moderator rights
    async fn set_staff(&self, id: UserId, is_staff: bool) -> RepoResult<()>;
}

// ============================================================================
// Ship Repository
// ============================================================================

/// Filters for listing ships
#[derive(Debug, Clone, Default)]
pub struct ShipQuery {
    /// Case-insensitive substring of `class_name`
    pub class_name: Option<String>,
    pub active_only: bool,
}

#[async_trait]
pub trait ShipRepository: Send + Sync {
    /// Find ship by ID
    async fn find_by_id(&self, id: ShipId) -> RepoResult<Option<Ship>>;

    /// List ships ordered by ID
    async fn list(&self, query: &ShipQuery) -> RepoResult<Vec<Ship>>;

    /// Create a new ship
    async fn create(&self, ship: &NewShip) -> RepoResult<Ship>;

    /// Update an existing ship (including soft delete)
    async fn update(&self, ship: &Ship) -> RepoResult<()>;
}

// ============================================================================
// Parking Repository
// ============================================================================

/// Filters for listing parkings. Drafts that were never formed are never
/// returned.
#[derive(Debug, Clone, Default)]
pub struct ParkingQuery {
    /// Restrict to one owner; `None` lists every owner
    pub user_id: Option<UserId>,
    /// `formed_at` on or after this date
    pub formed_since: Option<NaiveDate>,
    pub status: Option<ParkingStatus>,
}

#[async_trait]
pub trait ParkingRepository: Send + Sync {
    /// Find parking by ID
    async fn find_by_id(&self, id: ParkingId) -> RepoResult<Option<Parking>>;

    /// Draft ID and ship count for the owner's current draft
    async fn draft_summary(&self, user_id: UserId) -> RepoResult<Option<DraftSummary>>;

    /// List parkings ordered by ID
    async fn list(&self, query: &ParkingQuery) -> RepoResult<Vec<Parking>>;

    /// Persist every field of a patched parking only if the stored status is
    /// still `expected`. Returns `false` when the parking moved on meanwhile.
    async fn update(&self, parking: &Parking, expected: ParkingStatus) -> RepoResult<bool>;

    /// Persist a lifecycle transition only if the stored status is still
    /// `expected`. Returns `false` when another request got there first.
    async fn update_transition(&self, parking: &Parking, expected: ParkingStatus)
        -> RepoResult<bool>;

    /// Lock the parking, hand it to `transition` with its current ship count,
    /// and persist the result in the same transaction.
    ///
    /// Attach and detach wait on the lock, so the count cannot drift between
    /// the read and the write.
    async fn transition_with_ship_count(
        &self,
        id: ParkingId,
        transition: &CountedTransition<'_>,
    ) -> RepoResult<Parking>;
}

/// Mutation applied to a locked parking and its attached ship count
pub type CountedTransition<'a> =
    dyn Fn(&mut Parking, i64) -> Result<(), DomainError> + Send + Sync + 'a;

// ============================================================================
// Parking Ship Repository
// ============================================================================

#[async_trait]
pub trait ParkingShipRepository: Send + Sync {
    /// Get-or-create the owner's draft and attach the ship to it, atomically.
    ///
    /// A freshly created draft is rolled back if the link cannot be created.
    async fn attach_to_draft(
        &self,
        user_id: UserId,
        ship_id: ShipId,
        captain: Option<&str>,
    ) -> RepoResult<(Parking, ParkingShip)>;

    /// Attach a ship to an existing parking that must still be a draft.
    async fn attach(
        &self,
        parking_id: ParkingId,
        ship_id: ShipId,
        captain: Option<&str>,
    ) -> RepoResult<ParkingShip>;

    /// Remove a link. Returns `false` if it did not exist.
    async fn detach(&self, parking_id: ParkingId, ship_id: ShipId) -> RepoResult<bool>;

    /// Set the captain on a link. Returns `false` if it did not exist.
    async fn set_captain(
        &self,
        parking_id: ParkingId,
        ship_id: ShipId,
        captain: &str,
    ) -> RepoResult<bool>;

    /// Ships attached to a parking, ordered by ship ID
    async fn list_ships(&self, parking_id: ParkingId) -> RepoResult<Vec<AttachedShip>>;
}
