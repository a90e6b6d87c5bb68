//! HTTP boundary: `POST /api/generateIcon` plus the browser UI.

use std::future::Future;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::GEMINI_API_KEY_ENV;
use crate::dispatch::Dispatcher;
use crate::error::ImageError;
use crate::request::{ErrorResponse, GenerateIconRequest, GenerateIconResponse};

const INDEX_HTML: &str = include_str!("../static/index.html");
const UNKNOWN_ERROR: &str = "Unknown error occurred.";

/// Shared, immutable handler state.
#[derive(Clone)]
pub struct AppState {
    dispatcher: Option<Arc<Dispatcher>>,
}

impl AppState {
    /// State for a server with or without a configured model.
    ///
    /// Without a dispatcher every generation request fails with a missing
    /// credential error.
    #[must_use]
    pub fn new(dispatcher: Option<Dispatcher>) -> Self {
        Self { dispatcher: dispatcher.map(Arc::new) }
    }
}

/// An error rendered as `{"error": ...}` with a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn method_not_allowed() -> Self {
        Self { status: StatusCode::METHOD_NOT_ALLOWED, message: "Method not allowed".into() }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    fn unreadable_body(rejection: &BytesRejection) -> Self {
        Self { status: rejection.status(), message: rejection.body_text() }
    }

    fn internal(err: &ImageError) -> Self {
        let message = err.to_string();
        let message = if message.trim().is_empty() { UNKNOWN_ERROR.to_string() } else { message };
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response =
            (self.status, Json(ErrorResponse { error: self.message })).into_response();
        if self.status == StatusCode::METHOD_NOT_ALLOWED {
            response.headers_mut().insert(header::ALLOW, HeaderValue::from_static("POST"));
        }
        response
    }
}

/// Build the application router.
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(|| async { "ok" }))
        .route("/api/generateIcon", any(generate_icon))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Serve until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the listener fails.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    max_body_bytes: usize,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ImageError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{addr}");
    }
    axum::serve(listener, router(state, max_body_bytes))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ImageError::Io)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn generate_icon(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<GenerateIconResponse>, ApiError> {
    if method != Method::POST {
        return Err(ApiError::method_not_allowed());
    }

    let Some(dispatcher) = state.dispatcher.as_deref() else {
        warn!("Rejecting request: {GEMINI_API_KEY_ENV} is not configured");
        return Err(ApiError::internal(&ImageError::MissingApiKey {
            env_var: GEMINI_API_KEY_ENV.into(),
        }));
    };

    let body = body.map_err(|rejection| {
        warn!("Rejecting request body: {}", rejection.body_text());
        ApiError::unreadable_body(&rejection)
    })?;
    let request: GenerateIconRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("Invalid request body: {e}")))?;
    request.validate().map_err(ApiError::bad_request)?;
    debug!(
        prompt_len = request.prompt.len(),
        has_image = request.image_data.is_some(),
        has_logo = request.logo_data.is_some(),
        "Icon request received"
    );

    match dispatcher.generate_icon(&request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!("Error generating icon: {e}");
            Err(ApiError::internal(&e))
        }
    }
}
