//! HTTP service exposing the aero-analysis function
//!
//! `POST /aero-analysis` takes `{"fileName": "..."}` and answers
//! `{"analysis": "..."}` with the raw completion text. Rate-limit and quota
//! failures keep their status codes; everything else is a 500.

use crate::analysis::{AnalysisClient, AnalysisErrorBody, AnalysisRequest, AnalysisResponse};
use crate::error::{AerosuiteError, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;

/// Body returned for a 429 from the completion service
pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again in a moment.";

/// Body returned for a 402 from the completion service
pub const CREDITS_EXHAUSTED_MESSAGE: &str = "AI credits exhausted. Please add credits to continue.";

#[derive(Clone)]
struct AppState {
    client: Arc<dyn AnalysisClient>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<AerosuiteError>() {
            Some(AerosuiteError::RateLimited(_)) => Self {
                status: StatusCode::TOO_MANY_REQUESTS,
                message: RATE_LIMIT_MESSAGE.to_string(),
            },
            Some(AerosuiteError::QuotaExhausted(_)) => Self {
                status: StatusCode::PAYMENT_REQUIRED,
                message: CREDITS_EXHAUSTED_MESSAGE.to_string(),
            },
            _ => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: err.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(AnalysisErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Build the router
pub fn app(client: Arc<dyn AnalysisClient>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/aero-analysis", post(aero_analysis))
        .with_state(AppState { client })
}

/// Bind and serve until the process is stopped
///
/// # Errors
///
/// Returns an error if the address is invalid or cannot be bound.
pub async fn serve(bind: &str, client: Arc<dyn AnalysisClient>) -> Result<()> {
    let address: SocketAddr = bind
        .parse()
        .map_err(|e| AerosuiteError::Config(format!("Invalid bind address '{}': {}", bind, e)))?;
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("Aero-analysis function listening on {}", address);
    axum::serve(listener, app(client)).await?;
    Ok(())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn aero_analysis(
    State(state): State<AppState>,
    body: Bytes,
) -> std::result::Result<Json<AnalysisResponse>, ApiError> {
    let request: AnalysisRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("invalid request body: {}", e)))?;
    if request.file_name.trim().is_empty() {
        return Err(ApiError::bad_request("fileName must not be empty"));
    }

    tracing::info!("Aerodynamic analysis request received for: {}", request.file_name);

    let analysis = state.client.request(&request.file_name).await.map_err(|e| {
        tracing::error!("Error in aero-analysis function: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(AnalysisResponse { analysis }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, Method, Request};
    use tower::ServiceExt;

    struct Canned(fn() -> Result<String>);

    #[async_trait]
    impl AnalysisClient for Canned {
        async fn request(&self, _file_name: &str) -> Result<String> {
            (self.0)()
        }
    }

    async fn post_json(client: Canned, body: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/aero-analysis")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build");
        let response = app(Arc::new(client))
            .oneshot(request)
            .await
            .expect("request should complete");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should collect");
        (status, serde_json::from_slice(&bytes).expect("JSON body"))
    }

    #[tokio::test]
    async fn test_analysis_success() {
        let (status, body) = post_json(
            Canned(|| Ok("DRAG_COEFFICIENT: 0.3".to_string())),
            r#"{"fileName":"car.glb"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["analysis"], "DRAG_COEFFICIENT: 0.3");
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_429() {
        let (status, body) = post_json(
            Canned(|| Err(AerosuiteError::RateLimited("gateway".to_string()).into())),
            r#"{"fileName":"car.glb"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], RATE_LIMIT_MESSAGE);
    }

    #[tokio::test]
    async fn test_quota_maps_to_402() {
        let (status, body) = post_json(
            Canned(|| Err(AerosuiteError::QuotaExhausted("gateway".to_string()).into())),
            r#"{"fileName":"car.glb"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body["error"], CREDITS_EXHAUSTED_MESSAGE);
    }

    #[tokio::test]
    async fn test_other_failure_maps_to_500() {
        let (status, body) = post_json(
            Canned(|| Err(AerosuiteError::MissingCredentials("gateway".to_string()).into())),
            r#"{"fileName":"car.glb"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("gateway"));
    }

    #[tokio::test]
    async fn test_missing_file_name_is_400() {
        let (status, body) = post_json(Canned(|| Ok(String::new())), "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("fileName"));
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .expect("request should build");
        let response = app(Arc::new(Canned(|| Ok(String::new()))))
            .oneshot(request)
            .await
            .expect("request should complete");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
