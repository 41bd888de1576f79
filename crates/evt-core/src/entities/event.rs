use serde::{Deserialize, Serialize};

/// One event as listed by the remote API.
///
/// `uid` is the numeric primary key. Only the management listing asks for it;
/// the public listing carries the relay `id` alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: String,
    #[serde(
        default,
        deserialize_with = "uid_from_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub uid: Option<String>,
    pub name: String,
    pub max_participants: i64,
    pub participants_count: i64,
}

impl EventSummary {
    /// Places left, never negative.
    #[must_use]
    pub fn capacity_remaining(&self) -> i64 {
        (self.max_participants - self.participants_count).max(0)
    }

    /// Whether a party of `party_size` still fits.
    #[must_use]
    pub fn accepts(&self, party_size: u8) -> bool {
        self.capacity_remaining() >= i64::from(party_size)
    }

    /// Whether no place is left at all.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity_remaining() == 0
    }
}

/// `uid` is an `ID` scalar; accept it as a string or a bare number.
fn uid_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Uid {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Uid>::deserialize(deserializer)?.map(|uid| match uid {
        Uid::Text(text) => text,
        Uid::Number(number) => number.to_string(),
    }))
}
