//! File-backed sessions survive a reload of the same tab and stay isolated
//! from other tabs.

use evt_auth::{
    FileTokenStorage, GuardDecision, RouteGuard, Session, SessionStore, SessionToken,
    restore_session,
};
use evt_config::SessionConfig;
use evt_core::{AuthState, Route};
use pretty_assertions::assert_eq;

fn config(dir: &tempfile::TempDir, tab: &str) -> SessionConfig {
    SessionConfig {
        tab: tab.into(),
        state_dir: dir.path().to_string_lossy().into_owned(),
    }
}

#[test]
fn token_survives_reload() {
    let dir = tempfile::TempDir::new().expect("tmp dir");

    let session = restore_session(&config(&dir, "default")).expect("restore");
    session
        .set_token(SessionToken::new("jwt.payload.sig"))
        .expect("set token");
    drop(session);

    let reloaded = restore_session(&config(&dir, "default")).expect("reload");
    assert_eq!(reloaded.token(), SessionToken::new("jwt.payload.sig"));
    assert_eq!(reloaded.state(), AuthState::Verifying);
}

#[test]
fn cleared_token_stays_cleared_after_reload() {
    let dir = tempfile::TempDir::new().expect("tmp dir");

    let session = restore_session(&config(&dir, "default")).expect("restore");
    session.set_token(SessionToken::new("abc")).expect("set token");
    session.set_token(None).expect("clear token");

    let reloaded = restore_session(&config(&dir, "default")).expect("reload");
    assert_eq!(reloaded.token(), None);
    assert_eq!(reloaded.state(), AuthState::Unauthenticated);
}

#[test]
fn tabs_do_not_share_tokens() {
    let dir = tempfile::TempDir::new().expect("tmp dir");

    let staff = restore_session(&config(&dir, "staff")).expect("restore");
    staff.set_token(SessionToken::new("abc")).expect("set token");

    let visitor = restore_session(&config(&dir, "visitor")).expect("restore");
    assert_eq!(visitor.token(), None);
}

#[test]
fn reloaded_token_blocks_guard_until_confirmed() {
    let dir = tempfile::TempDir::new().expect("tmp dir");
    let path = config(&dir, "default").token_file().expect("token file");
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(&path, "abc").expect("write");

    let session = Session::restore(SessionStore::new(FileTokenStorage::new(&path))).expect("restore");
    assert_eq!(
        RouteGuard::check(&session.snapshot(), &Route::Protected),
        GuardDecision::Pending
    );

    session.confirm().expect("confirm");
    assert_eq!(
        RouteGuard::check(&session.snapshot(), &Route::Protected),
        GuardDecision::Allow
    );
}
