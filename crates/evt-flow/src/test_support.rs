//! Shared test utilities for flow unit tests.

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use evt_auth::SessionToken;
    use evt_client::{ClientError, SignupApi, TokenPayload};
    use evt_core::{EventSummary, GlobalId, PendingRegistration};

    pub const STAFF_EMAIL: &str = "staff@example.org";
    pub const STAFF_PASSWORD: &str = "hunter2";
    pub const CODE: &str = "1234";

    pub fn event(pk: i64, name: &str, max: i64, count: i64) -> EventSummary {
        EventSummary {
            id: GlobalId::new("eventNode", pk.to_string()).encode(),
            uid: Some(pk.to_string()),
            name: name.into(),
            max_participants: max,
            participants_count: count,
        }
    }

    /// In-memory stand-in for the remote API.
    #[derive(Default)]
    pub struct FakeApi {
        pub events: Mutex<Vec<EventSummary>>,
        pub participants: Mutex<HashMap<String, (String, u8)>>,
        pub issued: Mutex<HashSet<String>>,
        pub latency: Mutex<Option<Duration>>,
        /// Reads and token checks answer 503 while set.
        pub fail_reads: AtomicBool,
        pub list_calls: AtomicUsize,
    }

    impl FakeApi {
        pub fn with_events(events: Vec<EventSummary>) -> Self {
            Self {
                events: Mutex::new(events),
                ..Self::default()
            }
        }

        pub fn issue(&self, token: &str) {
            self.issued.lock().unwrap().insert(token.to_string());
        }

        pub fn set_latency(&self, latency: Duration) {
            *self.latency.lock().unwrap() = Some(latency);
        }

        /// Another client took `seats` places of event `pk`.
        pub fn book_elsewhere(&self, pk: i64, seats: i64) {
            let mut events = self.events.lock().unwrap();
            if let Some(event) = events.iter_mut().find(|e| e.uid.as_deref() == Some(&pk.to_string())) {
                event.participants_count += seats;
            }
        }

        async fn delay(&self) {
            let latency = *self.latency.lock().unwrap();
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
        }

        fn public_events(&self) -> Vec<EventSummary> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .cloned()
                .map(|mut e| {
                    e.uid = None;
                    e
                })
                .collect()
        }
    }

    fn outage() -> ClientError {
        ClientError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        }
    }

    fn server_error(message: &str) -> ClientError {
        ClientError::GraphQl(vec![message.to_string()])
    }

    impl SignupApi for FakeApi {
        async fn list_events(&self) -> Result<Vec<EventSummary>, ClientError> {
            self.delay().await;
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(outage());
            }
            Ok(self.public_events())
        }

        async fn create_participant(
            &self,
            registration: &PendingRegistration,
        ) -> Result<String, ClientError> {
            self.delay().await;
            let events = self.events.lock().unwrap();
            let Some(event) = events.iter().find(|e| e.id == registration.event_id) else {
                return Err(ClientError::Rejected("registration was not accepted for this event".into()));
            };
            if !event.accepts(registration.party_size.get()) {
                return Err(server_error("This event is complete."));
            }
            let mut participants = self.participants.lock().unwrap();
            let id = GlobalId::new("participantNode", (participants.len() + 1).to_string()).encode();
            participants.insert(id.clone(), (event.id.clone(), registration.party_size.get()));
            Ok(id)
        }

        async fn verify_participant(
            &self,
            participant_id: &str,
            code: &str,
        ) -> Result<String, ClientError> {
            self.delay().await;
            let participants = self.participants.lock().unwrap();
            let Some((event_id, party)) = participants.get(participant_id) else {
                return Err(ClientError::Rejected("participant not found".into()));
            };
            if code != CODE {
                return Err(server_error("Incorrect code."));
            }
            let mut events = self.events.lock().unwrap();
            let event = events
                .iter_mut()
                .find(|e| &e.id == event_id)
                .ok_or_else(|| ClientError::Rejected("participant not found".into()))?;
            if !event.accepts(*party) {
                return Err(server_error("This event is complete."));
            }
            event.participants_count += i64::from(*party);
            Ok(event.name.clone())
        }

        async fn token_auth(
            &self,
            username: &str,
            password: &str,
        ) -> Result<SessionToken, ClientError> {
            self.delay().await;
            if username != STAFF_EMAIL || password != STAFF_PASSWORD {
                return Err(server_error("Please enter valid credentials"));
            }
            let token = format!("jwt-{}", self.issued.lock().unwrap().len() + 1);
            self.issue(&token);
            SessionToken::new(token).ok_or_else(|| ClientError::Parse("empty".into()))
        }

        async fn verify_token(&self, token: &SessionToken) -> Result<TokenPayload, ClientError> {
            self.delay().await;
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(outage());
            }
            if !self.issued.lock().unwrap().contains(token.expose()) {
                return Err(server_error("Error decoding signature"));
            }
            Ok(TokenPayload {
                username: STAFF_EMAIL.into(),
                expires_at: chrono::DateTime::from_timestamp(4_102_444_800, 0).unwrap(),
                issued_at: None,
            })
        }

        async fn list_events_with_counts(&self) -> Result<Vec<EventSummary>, ClientError> {
            self.delay().await;
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(outage());
            }
            Ok(self.events.lock().unwrap().clone())
        }

        async fn create_event(&self, name: &str, max_participants: i64) -> Result<(), ClientError> {
            self.delay().await;
            if name == "reject me" {
                return Err(ClientError::Rejected("event was not created".into()));
            }
            let mut events = self.events.lock().unwrap();
            let pk = i64::try_from(events.len()).unwrap() + 1;
            events.push(event(pk, name, max_participants, 0));
            Ok(())
        }

        fn download_link(&self, uid: &str, token: &SessionToken) -> String {
            format!("http://fake/download/?token={}&pk={uid}", token.expose())
        }
    }
}
