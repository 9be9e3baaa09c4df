//! Playground invocation tests: validation must fail before any network
//! activity, and valid input must reach the backend as typed-service calls
//! would.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dc_admin_api::find_endpoint;
use dc_admin_client::{invoke_endpoint, ApiError, PlaygroundInput, Transport, TransportConfig};
use dc_admin_client::UploadSource;
use dc_admin_state::AuthStore;

fn transport(server: &MockServer) -> Transport {
    let config = TransportConfig { base_url: server.uri(), ..Default::default() };
    Transport::new(&config, Arc::new(AuthStore::in_memory())).unwrap()
}

#[tokio::test]
async fn malformed_json_aborts_without_a_request() {
    let server = MockServer::start().await;

    // Any request reaching the server fails the test.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let t = transport(&server);
    let endpoint = find_endpoint("noticeList").unwrap();
    let input = PlaygroundInput { query: "{not json".into(), ..Default::default() };

    let err = invoke_endpoint(&t, endpoint, &input, None).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidJson { field: "query parameters", .. }));
}

#[tokio::test]
async fn missing_path_parameter_aborts_without_a_request() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let t = transport(&server);
    let endpoint = find_endpoint("noticeDelete").unwrap();

    let err = invoke_endpoint(&t, endpoint, &PlaygroundInput::default(), None)
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "missing path parameter: id");
}

#[tokio::test]
async fn upload_without_a_file_is_rejected_locally() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let t = transport(&server);
    let endpoint = find_endpoint("upload").unwrap();

    let err = invoke_endpoint(&t, endpoint, &PlaygroundInput::default(), None)
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "please select a file");
}

#[tokio::test]
async fn get_invocation_substitutes_path_and_sends_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/prod-api/api/notice/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "ok",
            "data": { "ID": 7, "title": "water outage" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let t = transport(&server);
    let endpoint = find_endpoint("noticeDetail").unwrap();
    let input = PlaygroundInput { path_params: r#"{"id": 7}"#.into(), ..Default::default() };

    let value = invoke_endpoint(&t, endpoint, &input, None).await.unwrap();
    assert_eq!(value["code"], 200);
    assert_eq!(value["data"]["title"], "water outage");
}

#[tokio::test]
async fn post_invocation_sends_query_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prod-api/api/notice"))
        .and(query_param("dryRun", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "created"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let t = transport(&server);
    let endpoint = find_endpoint("noticeCreate").unwrap();
    let input = PlaygroundInput {
        path_params: String::new(),
        query: r#"{"dryRun": true}"#.into(),
        body: r#"{"title": "hello", "noticeStatus": "1"}"#.into(),
    };

    let value = invoke_endpoint(&t, endpoint, &input, None).await.unwrap();
    assert_eq!(value["msg"], "created");
}

#[tokio::test]
async fn upload_with_a_file_returns_the_whole_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prod-api/api/common/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "ok",
            "data": { "url": "/uploads/pic.png" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let t = transport(&server);
    let endpoint = find_endpoint("upload").unwrap();
    let file = UploadSource { file_name: "pic.png".into(), bytes: vec![1, 2, 3] };

    let value = invoke_endpoint(&t, endpoint, &PlaygroundInput::default(), Some(&file))
        .await
        .unwrap();
    assert_eq!(value["data"]["url"], "/uploads/pic.png");
}

#[tokio::test]
async fn soft_failure_envelopes_come_back_as_values() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prod-api/api/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 500,
            "msg": "user already exists"
        })))
        .mount(&server)
        .await;

    let t = transport(&server);
    let endpoint = find_endpoint("register").unwrap();
    let input = PlaygroundInput {
        body: r#"{"userName": "test01", "passWord": "123456"}"#.into(),
        ..Default::default()
    };

    let value = invoke_endpoint(&t, endpoint, &input, None).await.unwrap();
    assert_eq!(value["code"], 500);
    assert_eq!(value["msg"], "user already exists");
}
