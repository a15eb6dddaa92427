use super::*;

#[test]
fn statuses_map_to_gateway_codes() {
    assert_eq!(ProxyError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(ProxyError::Unreachable("refused".into()).status(), StatusCode::BAD_GATEWAY);
    assert_eq!(ProxyError::BodyTooLarge { limit: 10 }.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(ProxyError::BodyRead("reset".into()).status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn into_response_uses_failure_envelope() {
    let response = ProxyError::Unreachable("connection refused".into()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], serde_json::json!(false));
    assert_eq!(body["message"], serde_json::json!("backend unavailable: connection refused"));
}
