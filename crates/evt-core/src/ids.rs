//! Relay global ids.
//!
//! The remote API identifies nodes by `base64("<TypeName>:<pk>")`. The public
//! event listing only exposes these ids, while the participant export needs
//! the numeric pk, so the client decodes them locally.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlobalId {
    pub type_name: String,
    pub pk: String,
}

impl GlobalId {
    #[must_use]
    pub fn new(type_name: impl Into<String>, pk: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            pk: pk.into(),
        }
    }

    /// Decode a relay id. Returns `None` for anything that is not base64 of
    /// `Type:pk` with both halves non-empty.
    #[must_use]
    pub fn decode(id: &str) -> Option<Self> {
        let id = id.trim();
        let bytes = STANDARD
            .decode(id)
            .or_else(|_| STANDARD_NO_PAD.decode(id))
            .ok()?;
        let text = String::from_utf8(bytes).ok()?;
        let (type_name, pk) = text.split_once(':')?;
        if type_name.is_empty() || pk.is_empty() {
            return None;
        }
        Some(Self::new(type_name, pk))
    }

    #[must_use]
    pub fn encode(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.type_name, self.pk))
    }
}
