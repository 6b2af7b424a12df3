//! Ship entity <-> model mapper
//!
//! Status columns are constrained in SQL, but an unknown value still surfaces
//! as a `DomainError` instead of being coerced.

use dock_core::entities::{AttachedShip, Ship};
use dock_core::error::DomainError;
use dock_core::value_objects::{ShipId, ShipStatus};

use crate::models::{AttachedShipModel, ShipModel};

fn parse_status(raw: &str) -> Result<ShipStatus, DomainError> {
    raw.parse()
        .map_err(|e: dock_core::StatusParseError| DomainError::DatabaseError(e.to_string()))
}

impl TryFrom<ShipModel> for Ship {
    type Error = DomainError;

    fn try_from(model: ShipModel) -> Result<Self, Self::Error> {
        Ok(Ship {
            id: ShipId::new(model.id),
            status: parse_status(&model.status)?,
            ship_name: model.ship_name,
            class_name: model.class_name,
            description: model.description,
            img_url: model.img_url,
        })
    }
}

impl TryFrom<AttachedShipModel> for AttachedShip {
    type Error = DomainError;

    fn try_from(model: AttachedShipModel) -> Result<Self, Self::Error> {
        let ship = Ship {
            id: ShipId::new(model.id),
            status: parse_status(&model.status)?,
            ship_name: model.ship_name,
            class_name: model.class_name,
            description: model.description,
            img_url: model.img_url,
        };
        Ok(AttachedShip {
            ship,
            captain: model.captain,
        })
    }
}
