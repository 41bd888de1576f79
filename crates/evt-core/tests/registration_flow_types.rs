//! Cross-module checks: a validated registration leads to a verification
//! route that the code entry can be built from.

use evt_core::{EventSummary, PendingRegistration, Route, VerificationCode};
use pretty_assertions::assert_eq;

fn listed_events() -> Vec<EventSummary> {
    vec![EventSummary {
        id: "E1".into(),
        uid: Some("1".into()),
        name: "Harbour tour".into(),
        max_participants: 12,
        participants_count: 3,
    }]
}

#[test]
fn registration_for_listed_event_validates_and_routes_to_verification() {
    let pending =
        PendingRegistration::validate("Ana", "a@b.com", 2, Some("E1"), &listed_events())
            .expect("valid registration");
    assert_eq!(pending.event_id, "E1");

    let participant_id = "UGFydGljaXBhbnROb2RlOjc=";
    let route = Route::Verification {
        participant_id: participant_id.into(),
    };
    let parsed = Route::parse(&route.path());
    let Route::Verification { participant_id: id } = parsed else {
        panic!("expected verification route");
    };
    assert_eq!(id, participant_id);
}

#[test]
fn registration_json_uses_api_field_names() {
    let pending =
        PendingRegistration::validate("Ana", "a@b.com", 2, Some("E1"), &listed_events())
            .expect("valid registration");
    let json = serde_json::to_value(&pending).expect("json");
    assert_eq!(
        json,
        serde_json::json!({
            "name": "Ana",
            "email": "a@b.com",
            "partySize": 2,
            "eventId": "E1",
        })
    );
}

#[test]
fn fresh_code_is_empty_and_focused_on_first_slot() {
    let code = VerificationCode::new();
    assert_eq!(code.focus(), 0);
    assert!(!code.is_complete());
    assert!(code.slots().iter().all(String::is_empty));
}
