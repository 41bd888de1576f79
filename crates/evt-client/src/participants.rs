//! Participant registration and code verification.

use evt_core::PendingRegistration;
use serde::Deserialize;
use serde_json::json;

use crate::{GraphqlClient, error::ClientError};

pub(crate) const CREATE_PARTICIPANT: &str = r"
mutation CreateParticipant($name: String!, $email: String!, $partySize: Int!, $eventId: ID!) {
  createParticipant(
    input: { name: $name, email: $email, partySize: $partySize, event: { id: $eventId } }
  ) {
    ok
    participant {
      id
    }
  }
}";

pub(crate) const VERIFY_PARTICIPANT: &str = r"
mutation verify($id: ID!, $code: String!) {
  verifyParticipant(input: { id: $id, code: $code }) {
    ok
    participant {
      event {
        name
      }
    }
  }
}";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateParticipantData {
    create_participant: Option<CreateParticipantPayload>,
}

#[derive(Deserialize)]
struct CreateParticipantPayload {
    ok: Option<bool>,
    participant: Option<ParticipantId>,
}

#[derive(Deserialize)]
struct ParticipantId {
    id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyParticipantData {
    verify_participant: Option<VerifyParticipantPayload>,
}

#[derive(Deserialize)]
struct VerifyParticipantPayload {
    ok: Option<bool>,
    participant: Option<VerifiedParticipant>,
}

#[derive(Deserialize)]
struct VerifiedParticipant {
    event: Option<EventName>,
}

#[derive(Deserialize)]
struct EventName {
    name: String,
}

impl CreateParticipantData {
    fn participant_id(self) -> Result<String, ClientError> {
        match self.create_participant {
            Some(CreateParticipantPayload {
                ok: Some(true),
                participant: Some(ParticipantId { id }),
            }) => Ok(id),
            _ => Err(ClientError::Rejected(
                "registration was not accepted for this event".into(),
            )),
        }
    }
}

impl VerifyParticipantData {
    fn event_name(self) -> Result<String, ClientError> {
        match self.verify_participant {
            Some(VerifyParticipantPayload {
                ok: Some(true),
                participant:
                    Some(VerifiedParticipant {
                        event: Some(EventName { name }),
                    }),
            }) => Ok(name),
            _ => Err(ClientError::Rejected("participant not found".into())),
        }
    }
}

impl GraphqlClient {
    /// Register a participant and return their relay id.
    ///
    /// The server emails the verification code; nothing is created when this
    /// returns an error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] when the server answers `ok: false`
    /// (unknown event), or any transport/remote error.
    pub async fn register_participant(
        &self,
        registration: &PendingRegistration,
    ) -> Result<String, ClientError> {
        let data: CreateParticipantData = self
            .execute(
                "CreateParticipant",
                CREATE_PARTICIPANT,
                json!({
                    "name": registration.name,
                    "email": registration.email,
                    "partySize": i64::from(registration.party_size),
                    "eventId": registration.event_id,
                }),
            )
            .await?;
        data.participant_id()
    }

    /// Submit a four-digit code, returning the name of the joined event.
    ///
    /// # Errors
    ///
    /// Wrong, expired, or full-event codes come back as [`ClientError::GraphQl`]
    /// with the server's message.
    pub async fn submit_code(&self, participant_id: &str, code: &str) -> Result<String, ClientError> {
        let data: VerifyParticipantData = self
            .execute(
                "verify",
                VERIFY_PARTICIPANT,
                json!({ "id": participant_id, "code": code }),
            )
            .await?;
        data.event_name()
    }
}
