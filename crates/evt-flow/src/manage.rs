//! Event management: live board, event creation, export links.

use std::sync::Arc;
use std::time::Duration;

use evt_auth::{AuthError, Session};
use evt_client::SignupApi;
use evt_core::{EventSummary, GlobalId, Route, ValidationError};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::FlowError;
use crate::scope::ScreenScope;
use crate::status::Status;

/// Latest event listing published to the management screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventBoard {
    pub events: Vec<EventSummary>,
    /// Bumped on every successful refresh.
    pub revision: u64,
    /// Message of the last failed refresh, cleared by the next success.
    pub last_error: Option<String>,
}

fn publish_events(tx: &watch::Sender<EventBoard>, events: Vec<EventSummary>) {
    tx.send_modify(|board| {
        board.events = events;
        board.revision += 1;
        board.last_error = None;
    });
}

fn publish_error(tx: &watch::Sender<EventBoard>, message: String) {
    tx.send_modify(|board| board.last_error = Some(message));
}

pub struct ManageFlow<A> {
    api: Arc<A>,
    session: Session,
    scope: ScreenScope,
    board: Arc<watch::Sender<EventBoard>>,
    name: String,
    max_participants: i64,
    status: Status,
}

impl<A: SignupApi + 'static> ManageFlow<A> {
    /// Mount the screen. The route guard should already have allowed it.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Auth`] unless the session is authenticated.
    pub fn new(api: Arc<A>, session: Session, scope: ScreenScope) -> Result<Self, FlowError> {
        if !session.snapshot().is_authenticated() {
            return Err(AuthError::NotAuthenticated.into());
        }
        let (board, _rx) = watch::channel(EventBoard::default());
        Ok(Self {
            api,
            session,
            scope,
            board: Arc::new(board),
            name: String::new(),
            max_participants: 0,
            status: Status::Idle,
        })
    }

    #[must_use]
    pub fn board(&self) -> EventBoard {
        self.board.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<EventBoard> {
        self.board.subscribe()
    }

    /// Fetch the listing once and publish it.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Query`] on failure (also recorded on the board)
    /// or [`FlowError::Cancelled`].
    pub async fn refresh(&self) -> Result<EventBoard, FlowError> {
        match self.scope.run(self.api.list_events_with_counts()).await? {
            Ok(events) => {
                publish_events(&self.board, events);
                Ok(self.board())
            }
            Err(error) => {
                let error = FlowError::Query(error);
                publish_error(&self.board, error.user_message());
                Err(error)
            }
        }
    }

    /// Poll the listing every `interval` until the screen unmounts.
    ///
    /// The first poll fires immediately. Failed polls are recorded on the
    /// board and polling continues; there is no backoff.
    pub fn watch(&self, interval: Duration) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let board = Arc::clone(&self.board);
        let scope = self.scope.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    () = scope.unmounted() => break,
                    _ = ticker.tick() => {}
                }
                match scope.run(api.list_events_with_counts()).await {
                    Ok(Ok(events)) => publish_events(&board, events),
                    Ok(Err(error)) => {
                        tracing::warn!(%error, "event poll failed");
                        publish_error(&board, error.user_message());
                    }
                    Err(_) => break,
                }
            }
            tracing::debug!("event polling stopped");
        })
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_max_participants(&mut self, max_participants: i64) {
        self.max_participants = max_participants;
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn max_participants(&self) -> i64 {
        self.max_participants
    }

    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Create an event from the form fields.
    ///
    /// Fields reset to empty/zero only on success. The board is not touched;
    /// the next refresh picks the new row up.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Validation`] for an empty name or a capacity
    /// below one, [`FlowError::Mutation`] if the server rejects it, or
    /// [`FlowError::Cancelled`].
    pub async fn create_event(&mut self) -> Result<(), FlowError> {
        let name = self.name.trim().to_string();
        let validation = if name.is_empty() {
            Err(ValidationError::Required { field: "name" })
        } else if self.max_participants < 1 {
            Err(ValidationError::TooSmall {
                field: "max participants",
                value: self.max_participants,
                min: 1,
            })
        } else {
            Ok(())
        };
        if let Err(error) = validation {
            self.status = Status::Failed(error.to_string());
            return Err(error.into());
        }

        self.status = Status::Loading;
        let result = self
            .scope
            .run(self.api.create_event(&name, self.max_participants))
            .await;
        match result {
            Ok(Ok(())) => {
                tracing::debug!(%name, "event created");
                self.name.clear();
                self.max_participants = 0;
                self.status = Status::Done;
                Ok(())
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

    /// Authenticated export link for an event, given its numeric uid or its
    /// relay id.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Auth`] without a token and
    /// [`FlowError::Validation`] for an id that is neither form.
    pub fn download_link(&self, event: &str) -> Result<String, FlowError> {
        let token = self.session.require_token()?;
        let uid = resolve_uid(event)?;
        Ok(self.api.download_link(&uid, &token))
    }

    /// Stop polling, clear the session, and go to the login screen.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Auth`] if the stored token cannot be removed.
    pub fn logout(&self) -> Result<Route, FlowError> {
        self.scope.unmount();
        self.session.sign_out()?;
        Ok(Route::Login)
    }

    pub fn unmount(&self) {
        self.scope.unmount();
    }
}

/// Numeric uid as-is; relay ids are decoded to their pk.
fn resolve_uid(event: &str) -> Result<String, ValidationError> {
    let event = event.trim();
    if event.is_empty() {
        return Err(ValidationError::Required { field: "event" });
    }
    if event.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(event.to_string());
    }
    GlobalId::decode(event)
        .map(|id| id.pk)
        .ok_or_else(|| ValidationError::UnknownEvent(event.to_string()))
}
