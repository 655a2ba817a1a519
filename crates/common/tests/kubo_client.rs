//! Integration tests for the IPFS RPC client against a mock node

use ::common::identifier::Identifier;
use ::common::storage::{KuboClient, StorageError, StorageService, UploadFile};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client(server: &MockServer) -> KuboClient {
    KuboClient::new(&Url::parse(&server.uri()).unwrap()).unwrap()
}

fn id(s: &str) -> Identifier {
    Identifier::new(s).unwrap()
}

#[tokio::test]
async fn test_put_returns_wrapping_directory() {
    let server = MockServer::start().await;
    let body = concat!(
        "{\"Name\":\"a.txt\",\"Hash\":\"bafya\",\"Size\":\"13\"}\n",
        "{\"Name\":\"b.txt\",\"Hash\":\"bafyb\",\"Size\":\"14\"}\n",
        "{\"Name\":\"\",\"Hash\":\"bafyroot\",\"Size\":\"120\"}\n",
    );
    Mock::given(method("POST"))
        .and(path("/api/v0/add"))
        .and(query_param("wrap-with-directory", "true"))
        .and(query_param("pin", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let root = client(&server)
        .await
        .put(vec![
            UploadFile::new("a.txt", "hello"),
            UploadFile::new("b.txt", "world"),
        ])
        .await
        .unwrap();

    assert_eq!(root, id("bafyroot"));
}

#[tokio::test]
async fn test_put_without_root_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v0/add"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{\"Name\":\"a.txt\",\"Hash\":\"bafya\",\"Size\":\"13\"}\n"),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .put(vec![UploadFile::new("a.txt", "hello")])
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::MissingRoot));
}

#[tokio::test]
async fn test_put_surfaces_rpc_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v0/add"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "Message": "disk full",
            "Code": 0,
            "Type": "error"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .put(vec![UploadFile::new("a.txt", "hello")])
        .await
        .unwrap_err();
    match err {
        StorageError::HttpStatus(status, message) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(message, "disk full");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_get_lists_files_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v0/ls"))
        .and(query_param("arg", "bafyroot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Objects": [{
                "Hash": "bafyroot",
                "Links": [
                    {"Name": "a.txt", "Hash": "bafya", "Size": 100, "Type": 2, "Target": ""},
                    {"Name": "nested", "Hash": "bafyd", "Size": 0, "Type": 1, "Target": ""},
                    {"Name": "b.txt", "Hash": "bafyb", "Size": 200, "Type": 2, "Target": ""}
                ]
            }]
        })))
        .mount(&server)
        .await;

    let files = client(&server).await.get(&id("bafyroot")).await.unwrap();

    assert_eq!(files.len(), 2);
    assert_eq!(files[0].name, "a.txt");
    assert_eq!(files[0].size, 100);
    assert_eq!(files[0].cid, id("bafya"));
    assert_eq!(files[1].name, "b.txt");
    assert_eq!(files[1].size, 200);
}

#[tokio::test]
async fn test_status_pinned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v0/pin/ls"))
        .and(query_param("arg", "bafyroot"))
        .and(query_param("type", "recursive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Keys": {"bafyroot": {"Type": "recursive"}}
        })))
        .mount(&server)
        .await;

    let status = client(&server).await.status(&id("bafyroot")).await.unwrap();
    assert!(status.is_pinned());
    assert_eq!(status.pins[0].kind, "recursive");
    assert_eq!(status.created, None);
}

#[tokio::test]
async fn test_status_not_pinned_is_queued() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v0/pin/ls"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "Message": "path '/ipfs/bafyroot' is not pinned",
            "Code": 0,
            "Type": "error"
        })))
        .mount(&server)
        .await;

    let status = client(&server).await.status(&id("bafyroot")).await.unwrap();
    assert!(!status.is_pinned());
}

#[tokio::test]
async fn test_status_other_errors_propagate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v0/pin/ls"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .status(&id("bafyroot"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::HttpStatus(status, _) if status.as_u16() == 503));
}
