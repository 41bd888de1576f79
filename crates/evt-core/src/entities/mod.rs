//! Entity structs for the event-signup domain.
//!
//! Events are read from the remote API, registrations and verification codes
//! are client-side form state that is validated before submission.

mod event;
mod registration;
mod verification;

pub use event::EventSummary;
pub use registration::{MAX_PARTY_SIZE, MIN_PARTY_SIZE, PartySize, PendingRegistration, valid_email};
pub use verification::{CODE_LENGTH, VerificationCode};
