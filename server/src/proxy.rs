//! Reverse proxy for `/api/v1/*`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser only ever talks to this host. API calls are forwarded to the
//! configured backend with method, path, query, body and end-to-end headers
//! intact, so session cookies and bearer tokens flow through unchanged.
//!
//! TRADE-OFFS
//! ==========
//! Bodies are buffered rather than streamed. Requests are small JSON
//! payloads or single-file uploads, both well under [`MAX_BODY_BYTES`].

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use std::time::Instant;

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName, header};
use axum::response::Response;
use futures::StreamExt;

use crate::error::ProxyError;
use crate::state::AppState;

/// Upper bound for a forwarded request body; covers the 10 MiB PDF limit.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Headers that describe a single connection and must not be forwarded.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::HOST,
];

/// Join the backend origin with the incoming path and query.
#[must_use]
pub fn upstream_url(backend: &str, path_and_query: &str) -> String {
    let backend = backend.trim_end_matches('/');
    if path_and_query.starts_with('/') {
        format!("{backend}{path_and_query}")
    } else {
        format!("{backend}/{path_and_query}")
    }
}

/// Copy `headers`, dropping hop-by-hop headers, `Keep-Alive`, anything named
/// by `Connection`, and `Content-Length` (recomputed by the client).
#[must_use]
pub fn forwardable_headers(headers: &HeaderMap) -> HeaderMap {
    let named_by_connection: Vec<String> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let lower = name.as_str();
        if HOP_BY_HOP.contains(name)
            || lower == "keep-alive"
            || *name == header::CONTENT_LENGTH
            || named_by_connection.iter().any(|n| n == lower)
        {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Buffer an incoming body, refusing more than `limit` bytes.
///
/// # Errors
///
/// [`ProxyError::BodyTooLarge`] past the limit, [`ProxyError::BodyRead`] when
/// the client's stream breaks first.
pub async fn read_body(body: Body, limit: usize) -> Result<Bytes, ProxyError> {
    let mut stream = body.into_data_stream();
    let mut buffer = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|err| ProxyError::BodyRead(err.to_string()))?;
        if buffer.len() + chunk.len() > limit {
            return Err(ProxyError::BodyTooLarge { limit });
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(buffer))
}

/// Forward one request to the backend and relay its response.
///
/// # Errors
///
/// Returns [`ProxyError`] when the body is too large or unreadable, or the
/// backend cannot be reached in time. Backend error statuses are relayed as-is.
pub async fn forward(State(state): State<AppState>, request: Request) -> Result<Response, ProxyError> {
    let started = Instant::now();
    let (parts, body) = request.into_parts();
    let path_and_query = parts.uri.path_and_query().map_or(parts.uri.path(), |pq| pq.as_str());
    let url = upstream_url(&state.config.backend_url, path_and_query);

    let body = read_body(body, MAX_BODY_BYTES).await?;

    let result = async {
        let upstream = state
            .http
            .request(parts.method.clone(), &url)
            .headers(forwardable_headers(&parts.headers))
            .body(body)
            .send()
            .await?;
        let status = upstream.status();
        let headers = forwardable_headers(upstream.headers());
        let bytes = upstream.bytes().await?;
        Ok::<_, ProxyError>((status, headers, bytes))
    }
    .await;

    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    match result {
        Ok((status, headers, bytes)) => {
            tracing::debug!(method = %parts.method, path = %parts.uri.path(), status = status.as_u16(), elapsed_ms, "proxied");
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = status;
            *response.headers_mut() = headers;
            Ok(response)
        }
        Err(err) => {
            tracing::warn!(method = %parts.method, path = %parts.uri.path(), elapsed_ms, error = %err, "proxy failed");
            Err(err)
        }
    }
}
