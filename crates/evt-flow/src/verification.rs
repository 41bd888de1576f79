//! Four-slot verification code entry.

use std::sync::Arc;

use evt_client::SignupApi;
use evt_core::{Route, ValidationError, VerificationCode};

use crate::error::FlowError;
use crate::scope::ScreenScope;
use crate::status::Status;

pub struct VerificationFlow<A> {
    api: Arc<A>,
    scope: ScreenScope,
    participant_id: String,
    code: VerificationCode,
    event_name: Option<String>,
    status: Status,
}

impl<A: SignupApi> VerificationFlow<A> {
    pub fn new(api: Arc<A>, scope: ScreenScope, participant_id: impl Into<String>) -> Self {
        Self {
            api,
            scope,
            participant_id: participant_id.into(),
            code: VerificationCode::new(),
            event_name: None,
            status: Status::Idle,
        }
    }

    /// Mount from a verification route; `None` for any other route.
    pub fn from_route(api: Arc<A>, scope: ScreenScope, route: &Route) -> Option<Self> {
        match route {
            Route::Verification { participant_id } => Some(Self::new(api, scope, participant_id)),
            _ => None,
        }
    }

    #[must_use]
    pub fn participant_id(&self) -> &str {
        &self.participant_id
    }

    #[must_use]
    pub const fn code(&self) -> &VerificationCode {
        &self.code
    }

    #[must_use]
    pub const fn focus(&self) -> usize {
        self.code.focus()
    }

    /// Set slot `slot` to `value` ("" or one digit), returning the new focus.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Validation`] for anything but one digit.
    pub fn input(&mut self, slot: usize, value: &str) -> Result<usize, FlowError> {
        Ok(self.code.input(slot, value)?)
    }

    /// Type into the focused slot.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Validation`] for a non-digit.
    pub fn type_digit(&mut self, digit: char) -> Result<usize, FlowError> {
        Ok(self.code.type_digit(digit)?)
    }

    /// Delete the value of `slot`, moving focus back.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Validation`] for a slot past the end.
    pub fn clear_slot(&mut self, slot: usize) -> Result<usize, FlowError> {
        Ok(self.code.clear(slot)?)
    }

    /// The joined event once verification succeeded.
    #[must_use]
    pub fn event_name(&self) -> Option<&str> {
        self.event_name.as_deref()
    }

    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Submit the code. Success is terminal: later calls return the same
    /// event name without contacting the server. Failure keeps the code.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Validation`] for an incomplete code or missing
    /// participant id, [`FlowError::Verification`] with the server's message,
    /// or [`FlowError::Cancelled`].
    pub async fn submit(&mut self) -> Result<String, FlowError> {
        if let Some(name) = &self.event_name {
            return Ok(name.clone());
        }
        if self.participant_id.trim().is_empty() {
            let error = ValidationError::Required {
                field: "participant id",
            };
            self.status = Status::Failed(error.to_string());
            return Err(error.into());
        }
        let code = match self.code.code() {
            Ok(code) => code,
            Err(error) => {
                self.status = Status::Failed(error.to_string());
                return Err(error.into());
            }
        };

        self.status = Status::Loading;
        let result = self
            .scope
            .run(self.api.verify_participant(&self.participant_id, &code))
            .await;
        match result {
            Ok(Ok(event_name)) => {
                tracing::debug!("participant verified");
                self.event_name = Some(event_name.clone());
                self.status = Status::Done;
                Ok(event_name)
            }
            Ok(Err(error)) => {
                let message = error.user_message();
                self.status = Status::Failed(message.clone());
                Err(FlowError::Verification(message))
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
}
