//! Validation errors raised before a form is submitted.
//!
//! Remote failures are not represented here; they belong to the transport and
//! flow crates. Every variant names the field the user has to fix.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// The email address does not look like `local@domain.tld`.
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    /// Party size outside the accepted range.
    #[error("party size must be between {min} and {max}, got {value}")]
    PartySizeOutOfRange { value: i64, min: u8, max: u8 },

    /// No event was chosen.
    #[error("choose an event")]
    NoEventSelected,

    /// The chosen event is not in the currently loaded list.
    #[error("event '{0}' is not in the loaded event list")]
    UnknownEvent(String),

    /// The chosen event has fewer places left than the party needs.
    #[error("event '{name}' has {remaining} place(s) left, party needs {requested}")]
    InsufficientCapacity {
        name: String,
        remaining: i64,
        requested: u8,
    },

    /// A verification slot received something other than one digit.
    #[error("verification slot {slot} only accepts a single digit 0-9, got '{value}'")]
    InvalidDigit { slot: usize, value: String },

    /// A verification slot index past the last slot.
    #[error("verification slot {0} does not exist")]
    SlotOutOfRange(usize),

    /// The verification code still has empty slots.
    #[error("verification code is incomplete")]
    IncompleteCode,

    /// A numeric field must be at least `min`.
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        value: i64,
        min: i64,
    },
}
