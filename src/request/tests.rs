use super::*;
use crate::api::ApiClient;
use stockdesk_shared::protocol::{CurrentUserRequest, DeleteProductRequest};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serves exactly one HTTP/1.1 exchange on loopback and hands back the raw
/// request it received.
async fn serve_once(status: &str, content_type: &str, body: &str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}/api", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    );
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            if request_complete(&raw) {
                break;
            }
        }
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        let _ = tx.send(String::from_utf8_lossy(&raw).into_owned());
    });

    (base, rx)
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(head_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..head_end]
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    raw.len() >= head_end + 4 + content_length
}

/// Ignores any proxy configured in the environment.
fn loopback_client() -> ReqwestHttpClient {
    ReqwestHttpClient::with_client(reqwest::Client::builder().no_proxy().build().unwrap())
}

#[tokio::test]
async fn test_reqwest_sends_bearer_and_decodes() {
    let (base, received) = serve_once(
        "200 OK",
        "application/json",
        r#"{"_id":"u1","name":"Ada","email":"ada@example.com","role":"admin"}"#,
    )
    .await;
    let api = ApiClient::new(base, loopback_client());
    api.set_bearer("t1");

    let user = api.send(&CurrentUserRequest).await.unwrap();
    assert_eq!(user.name, "Ada");

    let raw = received.await.unwrap().to_lowercase();
    assert!(raw.starts_with("get /api/auth/me http/1.1"), "{}", raw);
    assert!(raw.contains("authorization: bearer t1"), "{}", raw);
}

#[tokio::test]
async fn test_reqwest_error_status_carries_message() {
    let (base, _received) = serve_once("404 Not Found", "application/json", r#"{"message":"Not found"}"#).await;
    let api = ApiClient::new(base, loopback_client());

    let err = api.send(&CurrentUserRequest).await.unwrap_err();
    assert_eq!(err, ClientError::http(404, Some("Not found".to_string())));
}

#[tokio::test]
async fn test_reqwest_plain_text_ack() {
    let (base, received) = serve_once("200 OK", "text/plain", "Product deleted").await;
    let api = ApiClient::new(base, loopback_client());

    let ack = api
        .send(&DeleteProductRequest { id: "p1".to_string() })
        .await
        .unwrap();
    assert_eq!(ack.message.as_deref(), Some("Product deleted"));

    let raw = received.await.unwrap().to_lowercase();
    assert!(raw.starts_with("delete /api/products/p1 http/1.1"), "{}", raw);
}

#[tokio::test]
async fn test_reqwest_unreachable_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let api = ApiClient::new(format!("http://{}/api", addr), loopback_client());

    let err = api.send(&CurrentUserRequest).await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)), "{:?}", err);
}
