//! Request shape of the GraphQL client against a local mock server.

use evt_auth::{Session, SessionToken};
use evt_client::{ClientError, GraphqlClient};
use evt_config::ApiConfig;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const CSRF: &str = "k9Xq2vT";

fn client(server: &MockServer, session: &Session) -> GraphqlClient {
    let config = ApiConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..ApiConfig::default()
    };
    GraphqlClient::new(config, session.clone()).unwrap()
}

fn events_body() -> Value {
    json!({"data": {"allEvents": {"edges": [
        {"node": {"id": "ZXZlbnROb2RlOjE=", "name": "Open day", "maxParticipants": 20, "participantsCount": 3}}
    ]}}})
}

async fn mount_index(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", format!("csrftoken={CSRF}; Path=/; SameSite=Lax").as_str()),
        )
        .mount(server)
        .await;
}

async fn graphql_requests(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|request| request.url.path() == "/graphql/")
        .collect()
}

fn header_value<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|value| value.to_str().ok())
}

#[tokio::test]
async fn bootstrap_captures_anti_forgery_cookie() {
    let server = MockServer::start().await;
    mount_index(&server).await;
    let client = client(&server, &Session::ephemeral());

    assert_eq!(client.csrf_token(), "");
    client.bootstrap().await.unwrap();
    assert_eq!(client.csrf_token(), CSRF);
}

#[tokio::test]
async fn operations_post_query_with_cookie_and_csrf_header() {
    let server = MockServer::start().await;
    mount_index(&server).await;
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .and(header("x-csrftoken", CSRF))
        .and(header("cookie", format!("csrftoken={CSRF}").as_str()))
        .and(body_partial_json(json!({"variables": {}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, &Session::ephemeral());
    client.bootstrap().await.unwrap();
    let events = client.fetch_events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "Open day");

    let requests = graphql_requests(&server).await;
    assert_eq!(requests.len(), 1);
    let body: Value = requests[0].body_json().unwrap();
    assert!(body["query"].as_str().unwrap().contains("allEvents"));
    assert_eq!(header_value(&requests[0], "content-type"), Some("application/json"));
}

#[tokio::test]
async fn authorization_header_only_after_sign_in() {
    let server = MockServer::start().await;
    mount_index(&server).await;
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body()))
        .mount(&server)
        .await;

    let session = Session::ephemeral();
    let client = client(&server, &session);
    client.bootstrap().await.unwrap();

    client.fetch_events().await.unwrap();
    session.sign_in(SessionToken::new("jwt-abc").unwrap()).unwrap();
    client.fetch_events().await.unwrap();
    session.sign_out().unwrap();
    client.fetch_events().await.unwrap();

    let requests = graphql_requests(&server).await;
    let auth: Vec<Option<&str>> = requests
        .iter()
        .map(|request| header_value(request, "authorization"))
        .collect();
    assert_eq!(auth, vec![None, Some("JWT jwt-abc"), None]);
    for request in &requests {
        assert_eq!(header_value(request, "x-csrftoken"), Some(CSRF));
    }
}

#[tokio::test]
async fn without_bootstrap_no_cookie_header_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body()))
        .mount(&server)
        .await;

    let client = client(&server, &Session::ephemeral());
    client.fetch_events().await.unwrap();

    let requests = graphql_requests(&server).await;
    assert_eq!(header_value(&requests[0], "cookie"), None);
    assert_eq!(header_value(&requests[0], "x-csrftoken"), Some(""));
}

#[tokio::test]
async fn server_errors_and_graphql_errors_stay_distinct() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .and(body_partial_json(json!({"variables": {"token": "jwt-forged"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{"message": "Error decoding signature"}],
            "data": {"verifyToken": null}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .and(body_partial_json(json!({"variables": {"token": "jwt-valid"}})))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let client = client(&server, &Session::ephemeral());

    let forged = client
        .check_token(&SessionToken::new("jwt-forged").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(forged, ClientError::GraphQl(_)));
    assert_eq!(forged.user_message(), "Error decoding signature");

    let outage = client
        .check_token(&SessionToken::new("jwt-valid").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(outage, ClientError::Api { status: 503, .. }));
}
