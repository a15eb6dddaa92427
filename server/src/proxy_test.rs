use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::routing::any;

use super::*;
use crate::config::ServerConfig;

// =============================================================================
// Body buffering
// =============================================================================

#[tokio::test]
async fn body_within_limit_is_buffered_whole() {
    let body = Body::from_stream(futures::stream::iter(vec![
        Ok::<_, std::io::Error>(Bytes::from_static(b"hello ")),
        Ok(Bytes::from_static(b"world")),
    ]));
    assert_eq!(read_body(body, 11).await.unwrap(), Bytes::from_static(b"hello world"));
}

#[tokio::test]
async fn body_over_limit_is_too_large() {
    let err = read_body(Body::from(vec![0_u8; 12]), 11).await.unwrap_err();
    assert!(matches!(err, ProxyError::BodyTooLarge { limit: 11 }));
    assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn broken_body_stream_is_a_bad_request_not_too_large() {
    let body = Body::from_stream(futures::stream::iter(vec![
        Ok(Bytes::from_static(b"partial")),
        Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "client went away")),
    ]));
    let err = read_body(body, MAX_BODY_BYTES).await.unwrap_err();
    assert!(matches!(err, ProxyError::BodyRead(_)), "got {err:?}");
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// URL + header helpers
// =============================================================================

#[test]
fn upstream_url_keeps_path_and_query() {
    assert_eq!(
        upstream_url("https://api.example.test", "/api/v1/admin/users?page=2"),
        "https://api.example.test/api/v1/admin/users?page=2"
    );
    assert_eq!(upstream_url("http://backend/", "/api/v1/auth/me"), "http://backend/api/v1/auth/me");
    assert_eq!(upstream_url("http://backend", "healthz"), "http://backend/healthz");
}

#[test]
fn forwardable_headers_drop_hop_by_hop() {
    let mut headers = HeaderMap::new();
    headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive, x-internal"));
    headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));
    headers.insert("x-internal", HeaderValue::from_static("1"));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));
    headers.insert(header::COOKIE, HeaderValue::from_static("session=abc"));
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t"));

    let out = forwardable_headers(&headers);
    assert_eq!(out.len(), 2);
    assert_eq!(out.get(header::COOKIE).unwrap(), "session=abc");
    assert_eq!(out.get(header::AUTHORIZATION).unwrap(), "Bearer t");
}

#[test]
fn forwardable_headers_keep_repeated_set_cookie() {
    let mut headers = HeaderMap::new();
    headers.append(header::SET_COOKIE, HeaderValue::from_static("a=1"));
    headers.append(header::SET_COOKIE, HeaderValue::from_static("b=2"));
    let out = forwardable_headers(&headers);
    assert_eq!(out.get_all(header::SET_COOKIE).iter().count(), 2);
}

// =============================================================================
// End-to-end forwarding
// =============================================================================

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn state_for(backend_url: String) -> AppState {
    AppState::new(ServerConfig {
        port: 0,
        backend_url,
        proxy_timeout: Duration::from_secs(5),
        proxy_connect_timeout: Duration::from_secs(1),
    })
    .unwrap()
}

async fn echo(request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let echoed = serde_json::json!({
        "method": parts.method.as_str(),
        "uri": parts.uri.to_string(),
        "cookie": parts.headers.get(header::COOKIE).and_then(|v| v.to_str().ok()),
        "body": String::from_utf8_lossy(&body),
    });
    let mut response = Response::new(Body::from(echoed.to_string()));
    *response.status_mut() = StatusCode::CREATED;
    response.headers_mut().insert(header::SET_COOKIE, HeaderValue::from_static("session=new"));
    response
}

#[tokio::test]
async fn forwards_method_path_body_and_cookies() {
    let backend = serve(Router::new().route("/api/v1/{*rest}", any(echo))).await;
    let host = serve(crate::routes::api_routes(state_for(backend))).await;

    let response = reqwest::Client::new()
        .request(Method::POST, format!("{host}/api/v1/admin/roles?dry=1"))
        .header(header::COOKIE, "session=abc")
        .body(r#"{"name":"Editor"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers().get(header::SET_COOKIE).unwrap(), "session=new");
    let body: serde_json::Value = serde_json::from_slice(&response.bytes().await.unwrap()).unwrap();
    assert_eq!(body["method"], "POST");
    assert_eq!(body["uri"], "/api/v1/admin/roles?dry=1");
    assert_eq!(body["cookie"], "session=abc");
    assert_eq!(body["body"], r#"{"name":"Editor"}"#);
}

#[tokio::test]
async fn unreachable_backend_yields_bad_gateway_envelope() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let host = serve(crate::routes::api_routes(state_for(dead))).await;
    let response = reqwest::get(format!("{host}/api/v1/auth/me")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = serde_json::from_slice(&response.bytes().await.unwrap()).unwrap();
    assert_eq!(body["success"], serde_json::json!(false));
}

#[tokio::test]
async fn healthz_is_served_locally() {
    let host = serve(crate::routes::api_routes(state_for("http://127.0.0.1:9".to_owned()))).await;
    let response = reqwest::get(format!("{host}/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
