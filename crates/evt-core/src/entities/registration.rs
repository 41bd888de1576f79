use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entities::EventSummary;
use crate::errors::ValidationError;

pub const MIN_PARTY_SIZE: u8 = 1;
pub const MAX_PARTY_SIZE: u8 = 10;

/// Number of people registering together, always within
/// [`MIN_PARTY_SIZE`]..=[`MAX_PARTY_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PartySize(u8);

impl PartySize {
    /// # Errors
    ///
    /// Returns [`ValidationError::PartySizeOutOfRange`] outside 1..=10.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|size| (MIN_PARTY_SIZE..=MAX_PARTY_SIZE).contains(size))
            .map(Self)
            .ok_or(ValidationError::PartySizeOutOfRange {
                value,
                min: MIN_PARTY_SIZE,
                max: MAX_PARTY_SIZE,
            })
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for PartySize {
    fn default() -> Self {
        Self(MIN_PARTY_SIZE)
    }
}

impl TryFrom<i64> for PartySize {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PartySize> for i64 {
    fn from(size: PartySize) -> Self {
        Self::from(size.0)
    }
}

/// A registration that passed client-side validation and is ready to be sent.
///
/// Lives only between the sign-in form and a successful `createParticipant`
/// call; the flow drops it once control passes to verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRegistration {
    pub name: String,
    pub email: String,
    pub party_size: PartySize,
    pub event_id: String,
}

impl PendingRegistration {
    /// Validate raw form input against the currently loaded event list.
    ///
    /// The list may be stale. Passing here does not guarantee the remote side
    /// accepts the registration; it only rejects what is already known to be
    /// wrong.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, checking name, email,
    /// party size, then the chosen event.
    pub fn validate(
        name: &str,
        email: &str,
        party_size: i64,
        event_id: Option<&str>,
        events: &[EventSummary],
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required { field: "name" });
        }

        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::Required { field: "email" });
        }
        if !valid_email(email) {
            return Err(ValidationError::InvalidEmail(email.to_string()));
        }

        let party_size = PartySize::new(party_size)?;

        let event_id = event_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(ValidationError::NoEventSelected)?;
        let event = events
            .iter()
            .find(|event| event.id == event_id)
            .ok_or_else(|| ValidationError::UnknownEvent(event_id.to_string()))?;
        if !event.accepts(party_size.get()) {
            return Err(ValidationError::InsufficientCapacity {
                name: event.name.clone(),
                remaining: event.capacity_remaining(),
                requested: party_size.get(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            party_size,
            event_id: event_id.to_string(),
        })
    }
}

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

/// `local@domain.tld`, no whitespace, exactly one `@`.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}
