//! # evt-core
//!
//! Core types and rules shared by every evt crate.
//!
//! - Entity structs for events, pending registrations, and the four-slot
//!   verification code
//! - The navigation surface (`Route`, `RedirectTarget`)
//! - The auth state machine enum consumed by the route guard
//! - Relay global id decoding
//! - Validation errors raised before anything is sent to the remote API

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod routes;

pub use entities::{
    EventSummary, MAX_PARTY_SIZE, MIN_PARTY_SIZE, PartySize, PendingRegistration,
    VerificationCode, CODE_LENGTH, valid_email,
};
pub use enums::AuthState;
pub use errors::ValidationError;
pub use ids::GlobalId;
pub use routes::{RedirectTarget, Route};
