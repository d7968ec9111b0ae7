//! Integration tests for the reqwest transport against a local mock backend

use mockito::Matcher;
use plotboard_config::BackendConfig;
use plotboard_data::{DataClient, HttpClient, UploadClient};
use plotboard_shared::{Endpoint, PlotboardError, SelectedFile};

fn backend(url: &str) -> BackendConfig {
    BackendConfig::with_base_url(url)
}

#[tokio::test]
async fn test_fetch_csrf_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/get-csrf-token/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"csrfToken":"tok-123"}"#)
        .create_async()
        .await;

    let backend = backend(&server.url());
    let client = UploadClient::new(HttpClient::new(&backend).unwrap(), backend);

    let token = client.fetch_csrf_token().await.unwrap();
    assert_eq!(token, "tok-123");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_csrf_token_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/get-csrf-token/")
        .with_status(500)
        .create_async()
        .await;

    let backend = backend(&server.url());
    let client = UploadClient::new(HttpClient::new(&backend).unwrap(), backend);

    let err = client.fetch_csrf_token().await.unwrap_err();
    assert!(matches!(err, PlotboardError::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_upload_sends_multipart_with_csrf_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/upload/")
        .match_header("x-csrftoken", "tok-123")
        .match_header("content-type", Matcher::Regex("^multipart/form-data".to_string()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename="points.csv""#.to_string()),
            Matcher::Regex("Label,X,Y".to_string()),
        ]))
        .with_status(201)
        .expect(1)
        .create_async()
        .await;

    let backend = backend(&server.url());
    let client = UploadClient::new(HttpClient::new(&backend).unwrap(), backend);
    let file = SelectedFile::new("points.csv", Some("text/csv"), b"Label,X,Y\na,0.1,0.2\n".to_vec());

    client.upload(file, "tok-123").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_forbidden() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/upload/")
        .with_status(403)
        .create_async()
        .await;

    let backend = backend(&server.url());
    let client = UploadClient::new(HttpClient::new(&backend).unwrap(), backend);
    let file = SelectedFile::new("a.bin", None, vec![1, 2, 3]);

    let err = client.upload(file, "").await.unwrap_err();
    assert!(err.is_status());
}

#[tokio::test]
async fn test_fetch_page_for_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/data/buttontwo")
        .match_query(Matcher::UrlEncoded("page".to_string(), "2".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r##"{"data":[{"Label":"a","X":"0.1","Y":"0.2","Size":"1","Color":"#ff0000"},
                         {"Label":"b","X":0.3,"Y":0.4,"Size":2,"Color":"#00ff00"}],
                 "total_pages":3}"##,
        )
        .create_async()
        .await;

    let backend = backend(&server.url());
    let client = DataClient::new(HttpClient::new(&backend).unwrap(), backend);

    let page = client.fetch_page(Endpoint::ButtonTwo, 2).await.unwrap();
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].x, 0.1);
    assert_eq!(page.data[1].label, "b");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_page_malformed_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/data")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let backend = backend(&server.url());
    let client = DataClient::new(HttpClient::new(&backend).unwrap(), backend);

    let err = client.fetch_page(Endpoint::Primary, 1).await.unwrap_err();
    assert!(matches!(err, PlotboardError::Decode { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Port 9 (discard) is closed on test machines
    let backend = backend("http://127.0.0.1:9");
    let client = DataClient::new(HttpClient::new(&backend).unwrap(), backend);

    let err = client.fetch_page(Endpoint::Primary, 1).await.unwrap_err();
    assert!(matches!(
        err,
        PlotboardError::Network { .. } | PlotboardError::Timeout { .. }
    ));
}

#[tokio::test]
async fn test_session_cookie_only_sent_with_credentials() {
    let mut server = mockito::Server::new_async().await;
    let _token = server
        .mock("GET", "/api/get-csrf-token/")
        .with_status(200)
        .with_header("set-cookie", "csrftoken=tok-123; Path=/")
        .with_body(r#"{"csrfToken":"tok-123"}"#)
        .create_async()
        .await;
    let data = server
        .mock("GET", "/api/data")
        .match_query(Matcher::Any)
        .match_header("cookie", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"data":[],"total_pages":1}"#)
        .expect(1)
        .create_async()
        .await;
    let upload = server
        .mock("POST", "/api/upload/")
        .match_header("cookie", Matcher::Regex("csrftoken=tok-123".to_string()))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let backend = backend(&server.url());
    let transport = HttpClient::new(&backend).unwrap();
    let uploads = UploadClient::new(transport.clone(), backend.clone());
    let pages = DataClient::new(transport, backend);

    let token = uploads.fetch_csrf_token().await.unwrap();
    pages.fetch_page(Endpoint::Primary, 1).await.unwrap();
    let file = SelectedFile::new("points.csv", Some("text/csv"), b"Label\na\n".to_vec());
    uploads.upload(file, &token).await.unwrap();

    data.assert_async().await;
    upload.assert_async().await;
}
