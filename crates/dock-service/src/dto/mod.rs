//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers between domain entities and DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AttachShipRequest, CreateShipRequest, DetachShipRequest, LoginRequest, LogoutRequest,
    ModerateParkingRequest, ParkingListQuery, PatchParkingRequest, RefreshTokenRequest,
    RegisterRequest, SetCaptainRequest, SetShipImageRequest, ShipListQuery, UpdateProfileRequest,
    UpdateShipRequest,
};

pub use responses::{
    AttachShipResponse, AuthResponse, DraftSummaryResponse, HealthChecks, HealthResponse,
    LoginOutcome, ParkingDetailResponse, ParkingResponse, ParkingShipResponse,
    ReadinessResponse, ShipImageResponse, ShipListResponse, ShipResponse, UserResponse,
};
