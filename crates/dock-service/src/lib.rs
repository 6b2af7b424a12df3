//! # dock-service
//!
//! Application layer containing the parking workflow services and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, ParkingService, ParkingShipService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, ShipService, UserService,
};
