use ecj_cms_core::client::DirectusClient;
use ecj_cms_core::config::CmsConfig;
use ecj_cms_core::contract::{AdminApi, ContentApi};
use ecj_cms_core::error::CmsError;
use ecj_cms_core::query::{Filter, ItemQuery};
use ecj_cms_core::schema::PermissionPayload;
use reqwest::Method;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Local HTTP endpoint answering one canned response per connection, in order.
struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    async fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.expect("accept");
                let request = read_request(&mut socket).await;
                recorded.lock().unwrap().push(request);

                let response = format!(
                    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
        });

        Self { base_url, requests }
    }

    fn client(&self, token: Option<&str>) -> DirectusClient {
        let config = CmsConfig::new(self.base_url.clone(), token.map(str::to_string));
        DirectusClient::new(&config).expect("client builds")
    }

    fn request(&self, index: usize) -> String {
        self.requests.lock().unwrap()[index].clone()
    }
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[tokio::test]
async fn test_list_read_sends_bearer_and_encoded_query() {
    let server = StubServer::start(vec![(200, r#"{"data":[{"id":1,"name":"Ecopia"}]}"#)]).await;
    let client = server.client(Some("test-token"));

    let query = ItemQuery::new(Filter::new().neq("status", "draft"))
        .sort_by("sort_order")
        .limit(8);
    let items = client.read_items("tires", &query).await.expect("read succeeds");

    assert_eq!(items, vec![json!({ "id": 1, "name": "Ecopia" })]);
    let request = server.request(0);
    let request_line = request.lines().next().unwrap();
    assert_eq!(
        request_line,
        "GET /items/tires?filter=%7B%22status%22%3A%7B%22_neq%22%3A%22draft%22%7D%7D&sort=sort_order&limit=8 HTTP/1.1"
    );
    assert!(
        request.to_lowercase().contains("authorization: bearer test-token"),
        "{request}"
    );
}

#[tokio::test]
async fn test_public_client_sends_no_authorization_header() {
    let server = StubServer::start(vec![(200, r#"{"data":{"site_name":"ECJ Tire Supply"}}"#)]).await;
    let client = server.client(None);

    let settings = client.read_singleton("site_settings").await.unwrap();

    assert_eq!(settings, Some(json!({ "site_name": "ECJ Tire Supply" })));
    let request = server.request(0);
    assert!(request.starts_with("GET /items/site_settings HTTP/1.1"));
    assert!(!request.to_lowercase().contains("authorization:"), "{request}");
}

#[tokio::test]
async fn test_non_success_status_becomes_api_error_with_body() {
    let body = r#"{"errors":[{"message":"Field \"name\" already exists in collection \"tires\""}]}"#;
    let server = StubServer::start(vec![(400, body)]).await;
    let client = server.client(Some("test-token"));

    let err = client
        .request(
            Method::POST,
            "/fields/tires",
            &[],
            Some(&json!({ "field": "name", "type": "string" })),
        )
        .await
        .unwrap_err();

    match &err {
        CmsError::Api { status, body: text } => {
            assert_eq!(*status, 400);
            assert_eq!(text, body);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(err.is_already_exists());

    let request = server.request(0);
    assert!(request.starts_with("POST /fields/tires HTTP/1.1"));
    assert!(request.contains(r#""field":"name""#), "{request}");
}

#[tokio::test]
async fn test_empty_body_is_none_and_still_succeeds() {
    let server = StubServer::start(vec![(204, ""), (204, "")]).await;
    let client = server.client(Some("test-token"));

    let body = client
        .request(Method::POST, "/permissions", &[], Some(&json!({})))
        .await
        .expect("204 is a success");
    assert_eq!(body, None);

    client
        .create_permission(&PermissionPayload::public_read("tires"))
        .await
        .expect("permission call succeeds on an empty body");
    assert!(server.request(1).contains(r#""collection":"tires""#));
}

#[tokio::test]
async fn test_list_read_without_data_array_is_a_decode_error() {
    let server = StubServer::start(vec![
        (200, r#"{"data":{"id":1}}"#),
        (200, r#"{"errors":[]}"#),
    ])
    .await;
    let client = server.client(None);
    let query = ItemQuery::new(Filter::new().eq("status", "published"));

    let err = client.read_items("services", &query).await.unwrap_err();
    assert!(matches!(err, CmsError::Decode(_)), "got {err:?}");

    let err = client.read_items("services", &query).await.unwrap_err();
    assert!(matches!(err, CmsError::Decode(_)), "got {err:?}");
}
