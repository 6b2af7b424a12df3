//! Ship entity - a reservable vessel in the catalog

use crate::value_objects::{ShipId, ShipStatus};

/// Ship catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    pub id: ShipId,
    pub ship_name: String,
    pub class_name: String,
    pub description: String,
    pub status: ShipStatus,
    pub img_url: String,
}

impl Ship {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == ShipStatus::Active
    }

    /// Soft delete: the row stays, only the status flips.
    pub fn soft_delete(&mut self) {
        self.status = ShipStatus::Deleted;
    }

    pub fn set_image(&mut self, img_url: String) {
        self.img_url = img_url;
    }
}

/// Fields for a ship that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShip {
    pub ship_name: String,
    pub class_name: String,
    pub description: String,
    pub status: ShipStatus,
    pub img_url: String,
}
