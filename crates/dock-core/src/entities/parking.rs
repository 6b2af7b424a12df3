//! Parking entity - a dock reservation and its lifecycle
//!
//! ```text
//! draft --form--> formed --moderate(accept)--> completed
//!                        --moderate(reject)--> cancelled
//! any (not deleted) --delete--> deleted
//! ```

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::error::DomainError;
use crate::policy::{authorize, Capability, CrewCostEstimator, Principal};
use crate::value_objects::{ParkingId, ParkingStatus, UserId};

/// Parking reservation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parking {
    pub id: ParkingId,
    pub status: ParkingStatus,
    pub created_at: DateTime<Utc>,
    pub formed_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub date_of_parking: Option<NaiveDate>,
    pub port: Option<String>,
    pub user_id: UserId,
    pub moderator_id: Option<UserId>,
    pub spendings_of_crew: Option<i64>,
}

/// Partial update of a parking
///
/// `date_of_parking` and `port` are editable by the owner while drafting.
/// Everything else is administrative and needs staff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParkingPatch {
    pub date_of_parking: Option<NaiveDate>,
    pub port: Option<String>,
    pub status: Option<ParkingStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub formed_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub moderator_id: Option<UserId>,
    pub spendings_of_crew: Option<i64>,
}

impl ParkingPatch {
    pub fn touches_admin_fields(&self) -> bool {
        self.status.is_some()
            || self.created_at.is_some()
            || self.formed_at.is_some()
            || self.ended_at.is_some()
            || self.moderator_id.is_some()
            || self.spendings_of_crew.is_some()
    }

    pub fn touches_request_fields(&self) -> bool {
        self.date_of_parking.is_some() || self.port.is_some()
    }
}

impl Parking {
    /// Requested date used when a draft is created: the day after creation.
    pub fn default_date_of_parking(created_at: DateTime<Utc>) -> NaiveDate {
        let today = created_at.date_naive();
        today.checked_add_days(Days::new(1)).unwrap_or(today)
    }

    #[inline]
    pub fn is_draft(&self) -> bool {
        self.status == ParkingStatus::Draft
    }

    /// Owner submits the draft: `draft -> formed`.
    pub fn form(&mut self, actor: &Principal, now: DateTime<Utc>) -> Result<(), DomainError> {
        authorize(Some(actor), Capability::Owner, Some(self.user_id))?;

        if self.status != ParkingStatus::Draft || self.ended_at.is_some() {
            return Err(self.invalid("form"));
        }

        self.status = ParkingStatus::Formed;
        self.formed_at = Some(now);
        Ok(())
    }

    /// Staff decision on a formed parking: `formed -> completed | cancelled`.
    ///
    /// On approval the crew spending is `ship_count` times the estimator's
    /// per-ship cost.
    pub fn moderate(
        &mut self,
        actor: &Principal,
        accept: bool,
        ship_count: i64,
        estimator: &dyn CrewCostEstimator,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        authorize(Some(actor), Capability::Staff, None)?;

        if self.status != ParkingStatus::Formed {
            return Err(self.invalid("moderate"));
        }

        self.moderator_id = Some(actor.user_id);
        self.ended_at = Some(now);
        if accept {
            self.status = ParkingStatus::Completed;
            self.spendings_of_crew = Some(estimator.total(ship_count));
        } else {
            self.status = ParkingStatus::Cancelled;
        }
        Ok(())
    }

    /// Staff removal from any non-deleted state.
    ///
    /// `ended_at` keeps its first value if the parking already ended.
    pub fn mark_deleted(&mut self, actor: &Principal, now: DateTime<Utc>) -> Result<(), DomainError> {
        authorize(Some(actor), Capability::Staff, None)?;

        if self.status == ParkingStatus::Deleted {
            return Err(self.invalid("delete"));
        }

        self.status = ParkingStatus::Deleted;
        if self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
        Ok(())
    }

    /// Apply a partial update on behalf of `actor`.
    pub fn apply_patch(&mut self, actor: &Principal, patch: ParkingPatch) -> Result<(), DomainError> {
        authorize(Some(actor), Capability::OwnerOrStaff, Some(self.user_id))?;

        if patch.touches_admin_fields() {
            authorize(Some(actor), Capability::Staff, None)?;
        }
        if patch.touches_request_fields() && !actor.is_staff && !self.is_draft() {
            return Err(self.invalid("edit"));
        }

        let ParkingPatch {
            date_of_parking,
            port,
            status,
            created_at,
            formed_at,
            ended_at,
            moderator_id,
            spendings_of_crew,
        } = patch;

        if let Some(date) = date_of_parking {
            self.date_of_parking = Some(date);
        }
        if let Some(port) = port {
            self.port = Some(port);
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(created_at) = created_at {
            self.created_at = created_at;
        }
        if let Some(formed_at) = formed_at {
            self.formed_at = Some(formed_at);
        }
        if let Some(ended_at) = ended_at {
            self.ended_at = Some(ended_at);
        }
        if let Some(moderator_id) = moderator_id {
            self.moderator_id = Some(moderator_id);
        }
        if let Some(spendings) = spendings_of_crew {
            self.spendings_of_crew = Some(spendings);
        }
        Ok(())
    }

    fn invalid(&self, action: &'static str) -> DomainError {
        DomainError::InvalidTransition {
            status: self.status,
            action,
        }
    }
}
