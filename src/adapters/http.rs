use crate::adapters::query::{pre_validate, RawCardQuery};
use crate::core::validator::CardValidator;
use crate::core::Clock;
use crate::utils::error::{CardError, Violation};
use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Query, State},
    http::{Request, StatusCode},
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::Span;

pub const VALIDATE_ROUTE: &str = "/cards/validate";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

/// JSON envelope shared by every response of the service.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl ValidationResponse {
    pub fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(ErrorBody {
                code: status.as_u16(),
                message: message.into(),
            }),
        }
    }
}

fn envelope(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ValidationResponse::error(status, message))).into_response()
}

/// HTTP rendering of a [`CardError`].
pub struct ApiError(CardError);

impl From<CardError> for ApiError {
    fn from(err: CardError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_validation_failure() {
            envelope(StatusCode::BAD_REQUEST, self.0.to_string())
        } else {
            tracing::error!("unexpected failure: {}", self.0);
            envelope(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

async fn validate_card<C: Clock + 'static>(
    State(validator): State<Arc<CardValidator<C>>>,
    query: Result<Query<RawCardQuery>, QueryRejection>,
) -> Result<Json<ValidationResponse>, ApiError> {
    let Query(raw) = query.map_err(|rejection| {
        CardError::InvalidInput(Violation::malformed("query", rejection.body_text()))
    })?;

    let request = pre_validate(&raw).map_err(|violations| {
        tracing::debug!(count = violations.len(), "pre-validation rejected request");
        match violations.into_iter().next() {
            Some(first) => CardError::InvalidInput(first),
            None => CardError::Internal {
                message: "pre-validation failed without a violation".to_string(),
            },
        }
    })?;

    validator.validate(&request).into_result()?;
    Ok(Json(ValidationResponse::valid()))
}

async fn not_found() -> Response {
    envelope(StatusCode::NOT_FOUND, "Not Found")
}

fn internal_error_on_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("handler panicked: {}", detail);
    envelope(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

/// tower-http answers a timeout with a bare 408; give it the JSON envelope.
async fn timeout_envelope(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        tracing::warn!("request timed out");
        return envelope(StatusCode::REQUEST_TIMEOUT, "Request Timeout");
    }
    response
}

/// Wraps `router` with the service middleware: panic catcher, request
/// timeout, and request tracing.
pub fn with_service_layers(router: Router, request_timeout: Duration) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = request.uri().path(),
            )
        })
        .on_response(|response: &Response, latency: Duration, _span: &Span| {
            tracing::debug!(
                status = response.status().as_u16(),
                latency_ms = latency.as_millis() as u64,
                "response sent"
            );
        });

    router
        .layer(CatchPanicLayer::custom(internal_error_on_panic))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(map_response(timeout_envelope))
        .layer(trace)
}

/// Routes of the service behind [`with_service_layers`]. Unmatched methods
/// and paths answer 404.
pub fn build_router<C: Clock + 'static>(
    validator: Arc<CardValidator<C>>,
    request_timeout: Duration,
) -> Router {
    let routes = Router::new()
        .route(VALIDATE_ROUTE, get(validate_card::<C>).fallback(not_found))
        .fallback(not_found)
        .with_state(validator);
    with_service_layers(routes, request_timeout)
}
