//! End-to-end service tests against a mock backend.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dc_admin_api::{ActivitySearchRequest, LoginRequest, NoticeListQuery, PageQuery, CODE_OK};
use dc_admin_client::{ApiService, Transport, TransportConfig};
use dc_admin_state::AuthStore;

fn service(server: &MockServer) -> ApiService {
    let config = TransportConfig { base_url: server.uri(), ..Default::default() };
    let transport = Transport::new(&config, Arc::new(AuthStore::in_memory())).unwrap();
    ApiService::new(transport)
}

#[tokio::test]
async fn login_stores_token_and_later_requests_carry_it() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prod-api/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "ok",
            "token": "abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/prod-api/api/user/list"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "ok",
            "data": [{ "ID": 1, "userName": "test01" }],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let svc = service(&server);
    let login = LoginRequest { user_name: "test01".into(), pass_word: "123456".into() };
    let envelope = svc.login(&login).await.unwrap();
    assert!(envelope.is_ok());
    assert!(svc.transport().auth().is_authenticated());

    let users = svc.user_list(PageQuery::new(1, 10)).await.unwrap();
    assert_eq!(users.total_count(), 1);
    assert_eq!(users.data.unwrap()[0].user_name, "test01");
}

#[tokio::test]
async fn failed_login_does_not_store_a_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prod-api/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 500,
            "msg": "wrong password"
        })))
        .mount(&server)
        .await;

    let svc = service(&server);
    let login = LoginRequest { user_name: "test01".into(), pass_word: "nope".into() };
    let envelope = svc.login(&login).await.unwrap();

    // HTTP 2xx with a failing code is a soft failure: no error, no token.
    assert!(!envelope.is_ok());
    assert_eq!(envelope.code, 500);
    assert!(!svc.transport().auth().is_authenticated());
}

#[tokio::test]
async fn logout_clears_the_token_even_when_the_backend_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let svc = service(&server);
    svc.transport().auth().set_token("abc");

    let result = svc.logout().await;
    assert!(result.is_err());
    assert!(!svc.transport().auth().is_authenticated());
}

#[tokio::test]
async fn server_error_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prod-api/api/user"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": 500,
            "msg": "user already exists"
        })))
        .mount(&server)
        .await;

    let svc = service(&server);
    let err = svc.user_create(&Default::default()).await.unwrap_err();
    assert_eq!(err.user_message(), "user already exists");
}

#[tokio::test]
async fn error_body_without_msg_falls_back_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/prod-api/api/notice/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let svc = service(&server);
    let err = svc.notice_delete(9).await.unwrap_err();
    assert_eq!(err.user_message(), "HTTP 404");
}

#[tokio::test]
async fn notice_list_sends_page_and_status_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/prod-api/api/notice/list"))
        .and(query_param("pageNum", "2"))
        .and(query_param("pageSize", "10"))
        .and(query_param("noticeStatus", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "ok",
            "data": [],
            "total": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let svc = service(&server);
    let query = NoticeListQuery { page: PageQuery::new(2, 10), notice_status: "1".into() };
    let envelope = svc.notice_list(&query).await.unwrap();
    assert_eq!(envelope.code, CODE_OK);
}

#[tokio::test]
async fn comment_list_pages_through_query_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/prod-api/api/comment/comment/7"))
        .and(query_param("pageNum", "1"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "ok",
            "data": [],
            "total": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let svc = service(&server);
    let envelope = svc.comment_list(7, PageQuery::new(1, 10)).await.unwrap();
    assert!(envelope.is_ok());
}

#[tokio::test]
async fn activity_search_sends_words_body_and_page_params() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prod-api/api/activity/search"))
        .and(query_param("pageNum", "1"))
        .and(query_param("pageSize", "10"))
        .and(body_json(json!({ "words": "garden" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "ok",
            "data": [],
            "total": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let svc = service(&server);
    let request = ActivitySearchRequest { words: "garden".into() };
    let envelope = svc.activity_search(&request, PageQuery::new(1, 10)).await.unwrap();
    assert!(envelope.is_ok());
}

#[tokio::test]
async fn data_series_fetch_by_list_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/prod-api/api/data/water"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "ok",
            "data": { "ID": 4, "data": "[1,2,3]" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let svc = service(&server);
    let envelope = svc.data_series_by_key("water").await.unwrap();
    assert!(envelope.is_ok());
    assert_eq!(envelope.data.unwrap().meta.id, 4);
}

#[tokio::test]
async fn image_delete_addresses_the_file_by_url() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/prod-api/api/common/images"))
        .and(query_param("url", "/uploads/a.png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "deleted"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let svc = service(&server);
    let envelope = svc.image_delete("/uploads/a.png").await.unwrap();
    assert!(envelope.is_ok());
}

#[tokio::test]
async fn upload_sends_a_multipart_file_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prod-api/api/common/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "ok",
            "data": { "url": "/uploads/report.pdf" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let svc = service(&server);
    let envelope = svc.upload("report.pdf".into(), b"%PDF-1.4".to_vec()).await.unwrap();
    assert!(envelope.is_ok());
    let url = envelope.data.unwrap()["url"].as_str().unwrap().to_string();
    assert_eq!(url, "/uploads/report.pdf");
}
