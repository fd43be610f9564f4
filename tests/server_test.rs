use std::sync::Arc;

use jotter::server::{serve_listener, AppState};
use jotter::{Datastore, IndexTemplate};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;

async fn request(addr: std::net::SocketAddr, raw: String) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_serves_over_tcp_and_shuts_down() {
    let tmp = TempDir::new().unwrap();
    let datastore = Datastore::new(tmp.path().join("datastore.json"));
    let template = IndexTemplate::from_source("<p>{{count}} notes</p>").unwrap();
    let state = Arc::new(AppState::load(datastore.clone(), template));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = CancellationToken::new();
    let server = tokio::spawn(serve_listener(listener, state, shutdown.clone()));

    let payload = r#"[{"Title":"over the wire","Body":"hi","Date":"2024-06-01T12:00:00Z"}]"#;
    let response = request(
        addr,
        format!(
            "POST /save HTTP/1.1\r\nHost: localhost\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            payload.len(),
            payload
        ),
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.ends_with("success"));

    let response = request(
        addr,
        "GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n".to_string(),
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.contains("<p>1 notes</p>"));

    shutdown.cancel();
    server.await.unwrap().unwrap();

    assert_eq!(datastore.load().as_slice()[0].title, "over the wire");
}
