//! Whole journeys through the flows against a scripted API.

use std::sync::{Arc, Mutex};

use evt_auth::{GuardDecision, RouteGuard, Session, SessionSnapshot, SessionToken, restore_session};
use evt_client::{ClientError, SignupApi, TokenPayload};
use evt_config::SessionConfig;
use evt_core::{EventSummary, PendingRegistration, Route};
use evt_flow::{FlowError, LoginFlow, ManageFlow, Navigation, Navigator, ScreenScope, SignInFlow};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct ScriptedApi {
    registrations: Mutex<Vec<PendingRegistration>>,
}

const EVENT_ID: &str = "E1";
const PARTICIPANT_ID: &str = "P42";

impl SignupApi for ScriptedApi {
    async fn list_events(&self) -> Result<Vec<EventSummary>, ClientError> {
        Ok(vec![EventSummary {
            id: EVENT_ID.into(),
            uid: None,
            name: "Open day".into(),
            max_participants: 10,
            participants_count: 0,
        }])
    }

    async fn create_participant(
        &self,
        registration: &PendingRegistration,
    ) -> Result<String, ClientError> {
        self.registrations.lock().unwrap().push(registration.clone());
        Ok(PARTICIPANT_ID.into())
    }

    async fn verify_participant(&self, _: &str, _: &str) -> Result<String, ClientError> {
        Ok("Open day".into())
    }

    async fn token_auth(&self, username: &str, password: &str) -> Result<SessionToken, ClientError> {
        if username == "staff@example.org" && password == "secret" {
            Ok(SessionToken::new("jwt-abc").unwrap())
        } else {
            Err(ClientError::GraphQl(vec!["Please enter valid credentials".into()]))
        }
    }

    async fn verify_token(&self, _: &SessionToken) -> Result<TokenPayload, ClientError> {
        Err(ClientError::GraphQl(vec!["Signature has expired".into()]))
    }

    async fn list_events_with_counts(&self) -> Result<Vec<EventSummary>, ClientError> {
        self.list_events().await
    }

    async fn create_event(&self, _: &str, _: i64) -> Result<(), ClientError> {
        Ok(())
    }

    fn download_link(&self, uid: &str, token: &SessionToken) -> String {
        format!("/download/?token={}&pk={uid}", token.expose())
    }
}

#[tokio::test]
async fn registration_routes_to_verification_with_participant_id() {
    let api = Arc::new(ScriptedApi::default());
    let mut flow = SignInFlow::new(Arc::clone(&api), ScreenScope::new());
    flow.load_events().await.unwrap();
    flow.set_name("Ana");
    flow.set_email("a@b.com");
    flow.set_party_size(2);
    flow.select_event(EVENT_ID);

    let route = flow.submit().await.unwrap();
    assert_eq!(
        route,
        Route::Verification {
            participant_id: PARTICIPANT_ID.into()
        }
    );
    assert_eq!(route.path(), "/verification?id=P42");

    let sent = api.registrations.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].name, "Ana");
    assert_eq!(sent[0].party_size.get(), 2);
}

#[tokio::test]
async fn login_then_protected_route_needs_no_redirect() {
    let api = Arc::new(ScriptedApi::default());
    let session = Session::ephemeral();
    let mut nav = Navigator::new(session.clone());

    let Navigation::Redirected { from, .. } = nav.open("/protected") else {
        panic!("unauthenticated visit should redirect");
    };

    let mut login = LoginFlow::new(Arc::clone(&api), session.clone(), ScreenScope::new(), Some(from));
    login.set_email("staff@example.org");
    login.set_password("secret");
    assert_eq!(login.submit().await.unwrap(), Route::Protected);

    assert_eq!(
        nav.complete_login(),
        Navigation::Entered {
            route: Route::Protected
        }
    );
    let manage = ManageFlow::new(Arc::clone(&api), session.clone(), ScreenScope::new()).unwrap();
    assert_eq!(
        manage.download_link("3").unwrap(),
        "/download/?token=jwt-abc&pk=3"
    );
}

#[tokio::test]
async fn invalid_login_leaves_store_absent() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = SessionConfig {
        tab: "default".into(),
        state_dir: dir.path().to_string_lossy().into_owned(),
    };
    let session = restore_session(&config).unwrap();
    let api = Arc::new(ScriptedApi::default());

    let mut login = LoginFlow::new(api, session.clone(), ScreenScope::new(), None);
    login.set_email("staff@example.org");
    login.set_password("nope");
    assert!(matches!(login.submit().await, Err(FlowError::Auth(_))));

    assert_eq!(session.snapshot(), SessionSnapshot::unauthenticated());
    let reloaded = restore_session(&config).unwrap();
    assert!(reloaded.token().is_none());
}

#[tokio::test]
async fn expired_stored_token_is_cleared_and_guard_redirects() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = SessionConfig {
        tab: "default".into(),
        state_dir: dir.path().to_string_lossy().into_owned(),
    };
    restore_session(&config)
        .unwrap()
        .set_token(SessionToken::new("jwt-old"))
        .unwrap();

    let session = restore_session(&config).unwrap();
    assert_eq!(
        RouteGuard::check(&session.snapshot(), &Route::Protected),
        GuardDecision::Pending
    );

    let mut login = LoginFlow::new(
        Arc::new(ScriptedApi::default()),
        session.clone(),
        ScreenScope::new(),
        None,
    );
    assert!(login.mount().await.is_err());
    assert!(matches!(
        RouteGuard::check(&session.snapshot(), &Route::Protected),
        GuardDecision::Redirect { .. }
    ));
    assert!(restore_session(&config).unwrap().token().is_none());
}
