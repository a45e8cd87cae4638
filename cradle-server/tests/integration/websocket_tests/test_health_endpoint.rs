use cradle_core::Role;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::integration::init_tracing;
use crate::utils::{TestClient, TestServer, join_frame};

async fn get_health(server: &TestServer) -> Value {
    let mut stream = TcpStream::connect(server.addr).await.expect("connect");
    let request = format!(
        "GET /health HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        server.addr
    );
    stream.write_all(request.as_bytes()).await.expect("write");

    let mut response = String::new();
    stream.read_to_string(&mut response).await.expect("read");

    assert!(response.starts_with("HTTP/1.1 200"), "unexpected response: {response}");
    let body = response.split("\r\n\r\n").nth(1).expect("body");
    serde_json::from_str(body).expect("JSON body")
}

#[tokio::test]
async fn test_health_reports_registry_stats() {
    init_tracing();

    let server = TestServer::start().await.expect("Failed to start server");
    assert_eq!(
        get_health(&server).await,
        json!({"status": "ok", "rooms": 0, "broadcasters": 0, "viewers": 0})
    );

    let mut b = TestClient::connect(&server.ws_url()).await.expect("connect");
    b.send_json(&join_frame("baby", Role::Broadcaster))
        .await
        .expect("join");
    server
        .wait_until(|r| r.pool("baby", Role::Broadcaster).len() == 1)
        .await;
    let mut v = TestClient::connect(&server.ws_url()).await.expect("connect");
    v.send_json(&join_frame("baby", Role::Viewer))
        .await
        .expect("join");
    b.expect_type("viewer-joined").await.expect("viewer-joined");

    assert_eq!(
        get_health(&server).await,
        json!({"status": "ok", "rooms": 1, "broadcasters": 1, "viewers": 1})
    );
}
