//! # evt-flow
//!
//! Screen flow controllers for the event-signup client.
//!
//! Each screen is a plain struct that owns its form state and is driven by
//! method calls: field edits, `submit`, `unmount`. Every remote call goes
//! through the screen's [`ScreenScope`], so closing a screen deterministically
//! drops in-flight results instead of applying them to stale state.
//!
//! - [`SignInFlow`]: browse events, register a party
//! - [`VerificationFlow`]: four-slot code entry
//! - [`LoginFlow`]: staff sign-in and stored-token verification
//! - [`ManageFlow`]: live event board, event creation, export links
//! - [`Navigator`]: route history with guard checks

pub mod error;
pub mod login;
pub mod manage;
pub mod navigator;
pub mod scope;
pub mod sign_in;
pub mod status;
pub mod verification;

#[cfg(test)]
mod test_support;

pub use error::FlowError;
pub use login::LoginFlow;
pub use manage::{EventBoard, ManageFlow};
pub use navigator::{Navigation, Navigator};
pub use scope::ScreenScope;
pub use sign_in::{EventOption, SignInFlow};
pub use status::Status;
pub use verification::VerificationFlow;
