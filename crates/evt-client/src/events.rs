//! Event listing and creation.

use evt_core::EventSummary;
use serde::Deserialize;
use serde_json::json;

use crate::{GraphqlClient, error::ClientError, graphql::Connection};

pub(crate) const LIST_EVENTS: &str = r"
query GetEvents {
  allEvents {
    edges {
      node {
        id
        name
        maxParticipants
        participantsCount
      }
    }
  }
}";

pub(crate) const LIST_EVENTS_WITH_COUNTS: &str = r"
query AllEvents {
  allEvents {
    edges {
      node {
        id
        uid
        name
        maxParticipants
        participantsCount
      }
    }
  }
}";

pub(crate) const CREATE_EVENT: &str = r"
mutation CreateEvent($name: String!, $maxParticipants: Int!) {
  createEvent(input: { name: $name, maxParticipants: $maxParticipants }) {
    ok
  }
}";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AllEventsData {
    pub all_events: Connection<EventSummary>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateEventData {
    create_event: Option<OkPayload>,
}

#[derive(Deserialize)]
struct OkPayload {
    ok: Option<bool>,
}

impl GraphqlClient {
    /// Events for the public registration form.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the response cannot be parsed.
    pub async fn fetch_events(&self) -> Result<Vec<EventSummary>, ClientError> {
        let data: AllEventsData = self.execute("GetEvents", LIST_EVENTS, json!({})).await?;
        Ok(data.all_events.into_nodes())
    }

    /// Events with their numeric `uid`, for the management screen.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the response cannot be parsed.
    pub async fn fetch_events_with_counts(&self) -> Result<Vec<EventSummary>, ClientError> {
        let data: AllEventsData = self
            .execute("AllEvents", LIST_EVENTS_WITH_COUNTS, json!({}))
            .await?;
        Ok(data.all_events.into_nodes())
    }

    /// Create an event. Requires an authenticated session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] when the server answers `ok: false`.
    pub async fn post_event(&self, name: &str, max_participants: i64) -> Result<(), ClientError> {
        let data: CreateEventData = self
            .execute(
                "CreateEvent",
                CREATE_EVENT,
                json!({ "name": name, "maxParticipants": max_participants }),
            )
            .await?;
        match data.create_event.and_then(|payload| payload.ok) {
            Some(true) => Ok(()),
            _ => Err(ClientError::Rejected("event was not created".into())),
        }
    }
}
