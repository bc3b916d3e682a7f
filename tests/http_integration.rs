//! Integration tests for the HTTP transport using wiremock
//!
//! These tests run the real client against mocked endpoints, checking
//! request shapes on the wire and handling of response codes.

use seckill_admin::backend::{
    AdminClient, Attachment, ClientError, Credentials, HttpTransport, PageQuery, Session,
    TransportError,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{
    bearer_token, body_json, body_string_contains, header_regex, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, token: Option<&str>) -> AdminClient<HttpTransport> {
    let session = Session::new(token.map(str::to_string));
    let transport = HttpTransport::new(&server.uri(), Duration::from_secs(5), session)
        .expect("transport should build");
    AdminClient::new(transport)
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": 0, "msg": null, "data": data}))
}

mod http_client_tests {
    use super::*;

    /// Bearer token from the session goes out on every request
    #[tokio::test]
    async fn test_get_sends_bearer_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/queryAll"))
            .and(bearer_token("test-token"))
            .respond_with(ok(json!([{"id": 1, "username": "root"}])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-token"));
        let admins = client.list_admins().await.unwrap().into_data().unwrap();

        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].username.as_deref(), Some("root"));
    }

    /// Employee paging sends its three fields as query parameters
    #[tokio::test]
    async fn test_employee_page_query_parameters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/employee/page"))
            .and(query_param("name", ""))
            .and(query_param("page", "1"))
            .and(query_param("pageSize", "10"))
            .respond_with(ok(json!({
                "list": [{"id": 1, "adminName": "al", "account": "al01", "status": 1}],
                "total": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let page = client
            .get_employee_page(&PageQuery::new("", 1, 10))
            .await
            .unwrap()
            .into_data()
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.list[0].account.as_deref(), Some("al01"));
    }

    /// Refund is one POST with a fixed status body
    #[tokio::test]
    async fn test_refund_posts_fixed_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/order/amend"))
            .and(body_json(json!({"id": 42, "status": 4})))
            .respond_with(ok(json!(null)))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let envelope = client.refund_order(42).await.unwrap();
        assert!(envelope.is_success());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.query(), None);
    }

    /// Goods delete puts every id in the query string
    #[tokio::test]
    async fn test_goods_delete_uses_query_ids() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/dity/detele"))
            .respond_with(ok(json!(null)))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        client.delete_goods(vec![3, 4]).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("ids=3&ids=4"));
    }

    /// Multipart uploads carry a generated boundary and the file part
    #[tokio::test]
    async fn test_add_goods_is_multipart() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/dity/add"))
            .and(header_regex("content-type", "^multipart/form-data; boundary="))
            .and(body_string_contains("name=\"image\"; filename=\"apple.png\""))
            .and(body_string_contains("apple"))
            .respond_with(ok(json!(11)))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let image = Attachment::new("apple.png", "image/png", b"not really a png".to_vec());
        let envelope = client
            .add_goods(&json!({"name": "apple", "price": 3.5}), Some(image))
            .await
            .unwrap();

        assert_eq!(envelope.into_data().unwrap(), json!(11));
    }

    /// Business failures come back as envelopes, not errors
    #[tokio::test]
    async fn test_application_failure_is_returned_in_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/user/add"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"code": 1, "msg": "duplicate name", "data": null})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let envelope = client.add_user(&json!({"username": "zhang"})).await.unwrap();

        assert!(!envelope.is_success());
        assert_eq!(envelope.msg.as_deref(), Some("duplicate name"));
        assert!(matches!(
            envelope.into_data(),
            Err(ClientError::Application { code: 1, .. })
        ));
    }

    /// Failure envelopes whose data does not fit the typed payload still decode
    #[tokio::test]
    async fn test_failure_with_mismatched_data_is_returned() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/employee/page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 1,
                "msg": "not logged in",
                "data": ""
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let envelope = client
            .get_employee_page(&PageQuery::default())
            .await
            .unwrap();

        assert!(!envelope.is_success());
        assert_eq!(envelope.msg.as_deref(), Some("not logged in"));
        assert!(envelope.data.is_none());
    }

    /// Decimal strings decode into typed records
    #[tokio::test]
    async fn test_seckill_list_with_string_numbers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/seckill/queryAll"))
            .respond_with(ok(json!([
                {"id": 1, "name": "phone", "price": "999.00", "number": "20", "status": 1}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let items = client.list_seckills().await.unwrap().into_data().unwrap();

        assert_eq!(items[0].price, Some(999.0));
        assert_eq!(items[0].number, Some(20));
    }

    /// Non-2xx responses surface as transport errors with the status
    #[tokio::test]
    async fn test_401_returns_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/user/queryAll"))
            .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("stale"));
        let err = client.list_users().await.unwrap_err();

        match err {
            ClientError::Transport(TransportError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "token expired");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    /// 500 responses are not retried
    #[tokio::test]
    async fn test_500_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/order/queryAll"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client.list_orders().await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Transport(TransportError::Status { status: 500, .. })
        ));
    }

    /// A body that is not an envelope is a decode error
    #[tokio::test]
    async fn test_empty_body_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/sort/delete"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client.delete_categories(1).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    /// Slow backends hit the configured timeout
    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/rider/queryAll"))
            .respond_with(ok(json!([])).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let transport =
            HttpTransport::new(&server.uri(), Duration::from_millis(200), Session::default())
                .unwrap();
        let client = AdminClient::new(transport);

        let err = client.list_riders().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(TransportError::Timeout)));
    }

    /// A body that stalls after the headers is a timeout too
    #[tokio::test]
    async fn test_timeout_while_reading_body() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
                      content-length: 64\r\n\r\n{\"code\":",
                )
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let transport = HttpTransport::new(
            &format!("http://{}", addr),
            Duration::from_millis(300),
            Session::default(),
        )
        .unwrap();
        let client = AdminClient::new(transport);

        let err = client.list_orders().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(TransportError::Timeout)));
    }

    /// Login stores the returned token and later calls use it
    #[tokio::test]
    async fn test_sign_in_installs_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/login"))
            .and(body_json(json!({"username": "root", "password": "pw"})))
            .respond_with(ok(json!({"id": 1, "username": "root", "token": "fresh"})))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/admin/seckill/queryAll"))
            .and(bearer_token("fresh"))
            .respond_with(ok(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let envelope = client.sign_in(&Credentials::new("root", "pw")).await.unwrap();
        assert!(envelope.is_success());
        assert_eq!(client.session().token().await.as_deref(), Some("fresh"));

        let items = client.list_seckills().await.unwrap().into_data().unwrap();
        assert!(items.is_empty());
    }

    /// Configured success code changes what counts as success
    #[tokio::test]
    async fn test_custom_success_code() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/dity/queryAll"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "msg": "ok",
                "data": []
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, None).with_success_code(200);
        let envelope = client.list_goods().await.unwrap();
        assert!(envelope.is_success());
    }
}
