//! Browse events and register a party.

use std::sync::Arc;

use evt_client::SignupApi;
use evt_core::{EventSummary, PartySize, PendingRegistration, Route};
use serde::Serialize;

use crate::error::FlowError;
use crate::scope::ScreenScope;
use crate::status::Status;

/// One entry of the event picker. Full events are listed but disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventOption {
    #[serde(flatten)]
    pub event: EventSummary,
    pub capacity_remaining: i64,
    pub enabled: bool,
}

/// Registration form state plus the event list it was validated against.
pub struct SignInFlow<A> {
    api: Arc<A>,
    scope: ScreenScope,
    events: Vec<EventSummary>,
    name: String,
    email: String,
    party_size: i64,
    event_id: Option<String>,
    status: Status,
}

impl<A: SignupApi> SignInFlow<A> {
    pub fn new(api: Arc<A>, scope: ScreenScope) -> Self {
        Self {
            api,
            scope,
            events: Vec::new(),
            name: String::new(),
            email: String::new(),
            party_size: 1,
            event_id: None,
            status: Status::Idle,
        }
    }

    /// Fetch the event list. The previous list is kept on failure.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Query`] on transport or remote failure and
    /// [`FlowError::Cancelled`] if the screen was unmounted meanwhile.
    pub async fn load_events(&mut self) -> Result<&[EventSummary], FlowError> {
        self.status = Status::Loading;
        let result = self.scope.run(self.api.list_events()).await;
        match result {
            Ok(Ok(events)) => {
                tracing::debug!(count = events.len(), "events loaded");
                self.events = events;
                self.status = Status::Idle;
                Ok(self.events.as_slice())
            }
            Ok(Err(error)) => {
                let error = FlowError::Query(error);
                self.status = Status::Failed(error.user_message());
                Err(error)
            }
            Err(cancelled) => {
                self.status = Status::Idle;
                Err(cancelled)
            }
        }
    }

    #[must_use]
    pub fn events(&self) -> &[EventSummary] {
        &self.events
    }

    /// Picker entries for the current party size. Nothing is enabled while
    /// the party size itself is out of range.
    #[must_use]
    pub fn options(&self) -> Vec<EventOption> {
        let party_size = PartySize::new(self.party_size).ok();
        self.events
            .iter()
            .map(|event| EventOption {
                capacity_remaining: event.capacity_remaining(),
                enabled: party_size.is_some_and(|size| event.accepts(size.get())),
                event: event.clone(),
            })
            .collect()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_party_size(&mut self, party_size: i64) {
        self.party_size = party_size;
    }

    pub fn select_event(&mut self, event_id: impl Into<String>) {
        self.event_id = Some(event_id.into());
    }

    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Validate against the loaded list, then register.
    ///
    /// On success the form is reset and the verification route for the new
    /// participant is returned. The remote side stays the final authority:
    /// a list that went stale since loading surfaces as [`FlowError::Mutation`].
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Validation`] before anything is sent,
    /// [`FlowError::Mutation`] if the remote side rejects the registration,
    /// or [`FlowError::Cancelled`].
    pub async fn submit(&mut self) -> Result<Route, FlowError> {
        let pending = match PendingRegistration::validate(
            &self.name,
            &self.email,
            self.party_size,
            self.event_id.as_deref(),
            &self.events,
        ) {
            Ok(pending) => pending,
            Err(error) => {
                self.status = Status::Failed(error.to_string());
                return Err(error.into());
            }
        };

        self.status = Status::Loading;
        let result = self.scope.run(self.api.create_participant(&pending)).await;
        match result {
            Ok(Ok(participant_id)) => {
                tracing::debug!(event = %pending.event_id, "participant registered");
                self.reset_form();
                self.status = Status::Done;
                Ok(Route::Verification { participant_id })
            }
            Ok(Err(error)) => {
                let error = FlowError::Mutation(error);
                self.status = Status::Failed(error.user_message());
                Err(error)
            }
            Err(cancelled) => {
                self.status = Status::Idle;
                Err(cancelled)
            }
        }
    }

    pub fn unmount(&self) {
        self.scope.unmount();
    }

    fn reset_form(&mut self) {
        self.name.clear();
        self.email.clear();
        self.party_size = 1;
        self.event_id = None;
    }
}
