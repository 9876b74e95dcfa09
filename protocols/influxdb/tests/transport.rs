/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use influxdb_protocol::{
    Config, Error, Input, Plugin, QueryError, QueryService, Scheme,
};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Accepts a single connection, answers it with the given status line and
/// body and returns the raw request it received.
async fn serve_once(
    status: &'static str,
    body: &'static str,
) -> (u16, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            if let Some(end) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&raw[..end]).to_lowercase();
                let length = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .map(|v| v.trim().parse::<usize>().unwrap())
                    .unwrap_or(0);
                if raw.len() >= end + 4 + length {
                    break;
                }
            }
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        String::from_utf8(raw).unwrap()
    });
    (port, handle)
}

async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

fn config(port: u16) -> Config {
    Config {
        host: String::from("127.0.0.1"),
        port,
        protocol: Scheme::Http,
        api_token: String::from("my-token"),
    }
}

#[tokio::test]
async fn list_buckets_over_http() {
    let (port, server) =
        serve_once("200 OK", r#"{"buckets": [{"name": "telegraf"}]}"#).await;
    let plugin = Plugin::new().unwrap();
    let input = Input {
        operation: String::from("list_buckets"),
        ..Input::default()
    };
    let result = plugin.run(&config(port), &input).await.unwrap();
    assert_eq!(result.data, json!({ "buckets": [{ "name": "telegraf" }] }));

    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with("get /api/v2/buckets http/1.1\r\n"));
    assert!(request.contains("authorization: token my-token\r\n"));
    assert!(request.contains("content-type: application/json\r\n"));
}

#[tokio::test]
async fn create_bucket_over_http() {
    let (port, server) = serve_once("201 Created", "{id: 'b1',}").await;
    let plugin = Plugin::new().unwrap();
    let input = Input {
        operation: String::from("create_bucket"),
        body: Some(String::from("{name: 'telegraf'}")),
        ..Input::default()
    };
    let result = plugin.run(&config(port), &input).await.unwrap();
    assert_eq!(result.data, json!({ "id": "b1" }));

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/v2/buckets HTTP/1.1\r\n"));
    let (_, body) = request.split_once("\r\n\r\n").unwrap();
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(body).unwrap(),
        json!({ "records": { "name": "telegraf" } })
    );
}

#[tokio::test]
async fn write_query_string() {
    let (port, server) = serve_once("204 No Content", "").await;
    let plugin = Plugin::new().unwrap();
    let input = Input {
        operation: String::from("write"),
        bucket: Some(String::from("mybucket")),
        org: Some(String::new()),
        precision: Some(String::from("s")),
        ..Input::default()
    };
    let result = plugin.run(&config(port), &input).await.unwrap();
    assert_eq!(result.data, json!({}));

    let request = server.await.unwrap();
    assert_eq!(
        request.lines().next(),
        Some("POST /api/v2/write?bucket=mybucket&precision=s HTTP/1.1")
    );
}

#[tokio::test]
async fn error_status_fails_query() {
    let (port, server) =
        serve_once("401 Unauthorized", r#"{"code": "unauthorized"}"#).await;
    let plugin = Plugin::new().unwrap();
    let input = Input {
        operation: String::from("delete_bucket"),
        bucket_id: Some(String::from("b1")),
        ..Input::default()
    };
    let error = plugin.run(&config(port), &input).await.unwrap_err();
    assert_eq!(error.summary, QueryError::SUMMARY);
    assert!(error.detail.contains("401"));
    assert!(server
        .await
        .unwrap()
        .starts_with("DELETE /api/v2/buckets/b1 HTTP/1.1\r\n"));
}

#[tokio::test]
async fn connection_refused_fails_query() {
    let plugin = Plugin::new().unwrap();
    let input = Input {
        operation: String::from("list_buckets"),
        ..Input::default()
    };
    let error = plugin
        .run(&config(closed_port().await), &input)
        .await
        .unwrap_err();
    assert_eq!(error.summary, QueryError::SUMMARY);
    assert!(error.detail.starts_with("error sending request"));
}

#[tokio::test]
async fn ping_over_http() {
    let (port, server) = serve_once("204 No Content", "").await;
    let plugin = Plugin::new().unwrap();
    plugin.test_connection(&config(port)).await.unwrap();

    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with("get /influxdb/cloud/api//ping http/1.1\r\n"));
    assert!(request.contains("authorization: token my-token\r\n"));
    assert!(!request.contains("content-type"));
}

#[tokio::test]
async fn ping_refused() {
    let plugin = Plugin::new().unwrap();
    let error = plugin
        .test_connection(&config(closed_port().await))
        .await
        .unwrap_err();
    assert!(matches!(error, Error::SendRequest(_)));
}
