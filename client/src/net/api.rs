//! REST API helpers for the `/api/v1` backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints are
//! only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every helper returns `Result<_, ApiError>`. Status and body decoding is
//! delegated to `models::envelope` so the browser and the CLI classify
//! failures identically. There is no automatic retry here; the answer-save
//! outbox in the exam page is the only caller that retries.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use exam::{GradedResult, PendingSave, PracticeSet, StartedSession, SubmitPayload};
use models::stats::{AdminStats, StudentDashboard};
use models::{ApiError, AuthUser, Id, Lesson, ResourceKind, Row};

#[cfg(any(test, feature = "hydrate"))]
const API_BASE: &str = "/api/v1";

// =============================================================================
// ENDPOINTS
// =============================================================================

#[cfg(any(test, feature = "hydrate"))]
fn collection_endpoint(kind: ResourceKind) -> String {
    format!("{API_BASE}/admin/{}", kind.segment())
}

#[cfg(any(test, feature = "hydrate"))]
fn item_endpoint(kind: ResourceKind, id: Id) -> String {
    format!("{API_BASE}/admin/{}/{id}", kind.segment())
}

#[cfg(any(test, feature = "hydrate"))]
fn upload_endpoint(kind: ResourceKind, id: Id) -> String {
    format!("{API_BASE}/admin/{}/{id}/upload", kind.segment())
}

#[cfg(any(test, feature = "hydrate"))]
fn lesson_endpoint(id: Id) -> String {
    format!("{API_BASE}/student/lessons/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn practice_endpoint(certification_id: Id) -> String {
    format!("{API_BASE}/student/certifications/{certification_id}/practice")
}

#[cfg(any(test, feature = "hydrate"))]
fn start_session_endpoint(certification_id: Id) -> String {
    format!("{API_BASE}/student/certifications/{certification_id}/sessions")
}

#[cfg(any(test, feature = "hydrate"))]
fn save_answer_endpoint(session_id: u64) -> String {
    format!("{API_BASE}/student/exam-sessions/{session_id}/answers")
}

#[cfg(any(test, feature = "hydrate"))]
fn submit_endpoint(session_id: u64) -> String {
    format!("{API_BASE}/student/exam-sessions/{session_id}/submit")
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[cfg(feature = "hydrate")]
mod transport {
    use gloo_net::http::{Request, RequestBuilder};
    use models::{ApiError, decode_response};
    use serde::Serialize;
    use serde::de::DeserializeOwned;

    pub(super) fn network(err: impl std::fmt::Display) -> ApiError {
        ApiError::Network(err.to_string())
    }

    /// Send a prepared request and return `(status, body)`.
    pub(super) async fn exchange(request: Request) -> Result<(u16, String), ApiError> {
        let resp = request.send().await.map_err(network)?;
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Ok((status, body))
    }

    pub(super) async fn get<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
        let request = Request::get(url).build().map_err(network)?;
        let (status, body) = exchange(request).await?;
        decode_response(status, &body)
    }

    pub(super) async fn send_json<B: Serialize, T: DeserializeOwned>(
        builder: RequestBuilder,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = builder.json(body).map_err(network)?;
        let (status, body) = exchange(request).await?;
        decode_response(status, &body)
    }
}

#[cfg(not(feature = "hydrate"))]
fn unavailable() -> ApiError {
    ApiError::Network("not available on server".to_owned())
}

// =============================================================================
// AUTH
// =============================================================================

/// Fetch the signed-in user from `/api/v1/auth/me`.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` when no session exists.
pub async fn fetch_current_user() -> Result<AuthUser, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        transport::get(&format!("{API_BASE}/auth/me")).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(unavailable())
    }
}

/// Sign in via `POST /api/v1/auth/login`; the backend sets the session cookie.
///
/// # Errors
///
/// Returns validation errors for bad credentials and network errors.
pub async fn login(email: &str, password: &str) -> Result<AuthUser, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "email": email, "password": password });
        let builder = gloo_net::http::Request::post(&format!("{API_BASE}/auth/login"));
        transport::send_json(builder, &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err(unavailable())
    }
}

/// Log out via `POST /api/v1/auth/logout`. Failures are ignored; the caller
/// clears local state either way.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post(&format!("{API_BASE}/auth/logout"))
            .send()
            .await;
    }
}

// =============================================================================
// ADMIN RESOURCES
// =============================================================================

/// Fetch every row of `kind` for the admin table.
///
/// # Errors
///
/// Returns the classified HTTP or decode error.
pub async fn fetch_rows(kind: ResourceKind) -> Result<Vec<Row>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = gloo_net::http::Request::get(&collection_endpoint(kind))
            .build()
            .map_err(transport::network)?;
        let (status, body) = transport::exchange(request).await?;
        models::decode_rows(kind, status, &body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = kind;
        Err(unavailable())
    }
}

/// `POST` a validated form payload to the collection.
///
/// # Errors
///
/// Returns `ApiError::Validation` for `422` responses.
pub async fn create_resource(kind: ResourceKind, payload: serde_json::Value) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let builder = gloo_net::http::Request::post(&collection_endpoint(kind));
        transport::send_json::<_, serde_json::Value>(builder, &payload).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (kind, payload);
        Err(unavailable())
    }
}

/// `PUT` a validated form payload to one resource.
///
/// # Errors
///
/// Returns `ApiError::Validation` for `422` responses.
pub async fn update_resource(kind: ResourceKind, id: Id, payload: serde_json::Value) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let builder = gloo_net::http::Request::put(&item_endpoint(kind, id));
        transport::send_json::<_, serde_json::Value>(builder, &payload).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (kind, id, payload);
        Err(unavailable())
    }
}

/// `DELETE` one resource.
///
/// # Errors
///
/// Returns the classified HTTP error.
pub async fn delete_resource(kind: ResourceKind, id: Id) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = gloo_net::http::Request::delete(&item_endpoint(kind, id))
            .build()
            .map_err(transport::network)?;
        let (status, body) = transport::exchange(request).await?;
        models::decode_response::<serde_json::Value>(status, &body).map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (kind, id);
        Err(unavailable())
    }
}

/// Upload an image or PDF as multipart form data. The caller has already
/// checked the file against `policy`.
///
/// # Errors
///
/// Returns the classified HTTP error.
#[cfg(feature = "hydrate")]
pub async fn upload_file(
    kind: ResourceKind,
    id: Id,
    policy: models::UploadPolicy,
    file: web_sys::File,
) -> Result<(), ApiError> {
    let form = web_sys::FormData::new().map_err(|_| ApiError::Network("FormData unavailable".to_owned()))?;
    form.append_with_blob_and_filename(policy.field, &file, &file.name())
        .map_err(|_| ApiError::Network("could not attach file".to_owned()))?;
    let request = gloo_net::http::Request::post(&upload_endpoint(kind, id))
        .body(form)
        .map_err(transport::network)?;
    let (status, body) = transport::exchange(request).await?;
    models::decode_response::<serde_json::Value>(status, &body).map(|_| ())
}

// =============================================================================
// DASHBOARDS & LESSONS
// =============================================================================

/// # Errors
///
/// Returns the classified HTTP or decode error.
pub async fn fetch_admin_stats() -> Result<AdminStats, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        transport::get(&format!("{API_BASE}/admin/stats")).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(unavailable())
    }
}

/// # Errors
///
/// Returns the classified HTTP or decode error.
pub async fn fetch_student_dashboard() -> Result<StudentDashboard, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        transport::get(&format!("{API_BASE}/student/dashboard")).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(unavailable())
    }
}

/// # Errors
///
/// Returns `ApiError::NotFound` for unknown or inaccessible lessons.
pub async fn fetch_lesson(id: Id) -> Result<Lesson, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        transport::get(&lesson_endpoint(id)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err(unavailable())
    }
}

// =============================================================================
// EXAMS
// =============================================================================

/// Download a practice set (answers carry correctness flags).
///
/// # Errors
///
/// Returns the classified HTTP or decode error.
pub async fn fetch_practice_set(certification_id: Id) -> Result<PracticeSet, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        transport::get(&practice_endpoint(certification_id)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = certification_id;
        Err(unavailable())
    }
}

/// Open a strict exam session.
///
/// # Errors
///
/// Returns the classified HTTP or decode error.
pub async fn start_exam_session(certification_id: Id) -> Result<StartedSession, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let builder = gloo_net::http::Request::post(&start_session_endpoint(certification_id));
        transport::send_json(builder, &serde_json::json!({})).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = certification_id;
        Err(unavailable())
    }
}

/// Save one strict-mode answer.
///
/// # Errors
///
/// Returns the classified HTTP error; the caller schedules a retry.
pub async fn save_answer(save: &PendingSave) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let builder = gloo_net::http::Request::post(&save_answer_endpoint(save.session_id));
        transport::send_json::<_, serde_json::Value>(builder, &save.body()).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = save;
        Err(unavailable())
    }
}

/// Submit the full answer map for grading.
///
/// # Errors
///
/// Returns the classified HTTP or decode error.
pub async fn submit_exam(payload: &SubmitPayload) -> Result<GradedResult, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let builder = gloo_net::http::Request::post(&submit_endpoint(payload.session_id));
        transport::send_json(builder, payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = payload;
        Err(unavailable())
    }
}
