//! Client tests against a local canned-response HTTP server.
//!
//! Each test serves exactly one scripted HTTP response over a loopback
//! socket and asserts on the client's behavior, including what it put on
//! the wire.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use palaver::{Client, ClientConfig, Error, FileAttachment};

/// Serve one canned HTTP response on a fresh loopback port.
///
/// Returns the base URL to point the client at, and a receiver yielding
/// the raw request text once it has been read.
async fn serve_once(response: String) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (request_tx, request_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 65536];
        let mut read = 0usize;
        loop {
            if read == buf.len() {
                buf.resize(buf.len() * 2, 0);
            }
            let n = socket.read(&mut buf[read..]).await.unwrap();
            if n == 0 {
                break;
            }
            read += n;
            let text = String::from_utf8_lossy(&buf[..read]).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                if read >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        let _ = request_tx.send(String::from_utf8_lossy(&buf[..read]).to_string());
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.flush().await.unwrap();
        let _ = socket.shutdown().await;
    });

    (format!("http://{addr}"), request_rx)
}

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn client_for(base_url: &str) -> Client {
    Client::new(ClientConfig::new("test-key").with_base_url(base_url)).unwrap()
}

fn request_body(request: &str) -> serde_json::Value {
    let body = request.split("\r\n\r\n").nth(1).unwrap();
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn reply_round_trip() {
    let reply = "I'm doing well, thank you! 👍";
    let body = serde_json::json!({
        "choices": [{"message": {"content": reply}}]
    })
    .to_string();
    let (base_url, request_rx) = serve_once(http_response("200 OK", &body)).await;

    let client = client_for(&base_url);
    let result = client.send_message("Hello, how are you?", &[]).await.unwrap();
    assert_eq!(result, reply);

    let request = request_rx.await.unwrap();
    assert!(request.starts_with("POST /chat/completions HTTP/1.1"));
    let lowercased = request.to_lowercase();
    assert!(lowercased.contains("authorization: bearer test-key"));
    assert!(lowercased.contains("content-type: application/json"));

    let payload = request_body(&request);
    assert_eq!(payload["model"], "deepseek-chat");
    assert_eq!(payload["temperature"], 0.7);
    assert_eq!(payload["messages"][0]["role"], "user");
    assert_eq!(payload["messages"][0]["content"], "Hello, how are you?");
    assert!(payload.get("files").is_none());
}

#[tokio::test]
async fn attachments_ride_in_the_files_array() {
    let body = serde_json::json!({
        "choices": [{"message": {"content": "got it"}}]
    })
    .to_string();
    let (base_url, request_rx) = serve_once(http_response("200 OK", &body)).await;

    let attachment = FileAttachment::new("hello.txt", "text/plain", b"Hello World".to_vec());
    let client = client_for(&base_url);
    client
        .send_message("see attached", &[attachment])
        .await
        .unwrap();

    let payload = request_body(&request_rx.await.unwrap());
    assert_eq!(payload["files"][0]["name"], "hello.txt");
    assert_eq!(payload["files"][0]["type"], "text/plain");
    assert_eq!(payload["files"][0]["content"], "SGVsbG8gV29ybGQ=");
}

#[tokio::test]
async fn api_error_message_is_surfaced_verbatim() {
    let body = r#"{"error":{"message":"Invalid API key"}}"#;
    let (base_url, _request_rx) = serve_once(http_response("401 Unauthorized", body)).await;

    let client = client_for(&base_url);
    let err = client.send_message("Hello", &[]).await.unwrap_err();
    match err {
        Error::Api {
            status_code,
            message,
        } => {
            assert_eq!(status_code, 401);
            assert_eq!(message, "Invalid API key");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_error_body_is_server_error() {
    let (base_url, _request_rx) =
        serve_once(http_response("500 Internal Server Error", "<html>oops</html>")).await;

    let client = client_for(&base_url);
    let err = client.send_message("Hello", &[]).await.unwrap_err();
    assert!(matches!(err, Error::Server { status_code: 500 }));
}

#[tokio::test]
async fn malformed_success_body_is_invalid_response() {
    let (base_url, _request_rx) = serve_once(http_response("200 OK", "Invalid JSON")).await;

    let client = client_for(&base_url);
    let err = client.send_message("Hello", &[]).await.unwrap_err();
    assert!(err.is_invalid_response());
}

#[tokio::test]
async fn connection_refused_is_network_error() {
    // Bind to grab a free port, then drop the listener so nothing answers.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{addr}"));
    let err = client.send_message("Hello", &[]).await.unwrap_err();
    assert!(err.is_network(), "expected Network error, got {err:?}");
}

#[tokio::test]
async fn empty_message_never_reaches_the_wire() {
    // No server at all: validation must reject the input first.
    let client = client_for("http://127.0.0.1:1");
    let err = client.send_message("", &[]).await.unwrap_err();
    assert!(err.is_invalid_request());
}
