//! Axum router configuration with middleware.
//!
//! Routes: the customer WebSocket, customer registration, the review trigger
//! and `/health`. Middleware: CORS and request tracing.
//!
//! When the static directory exists it is served for every other path, so
//! the chat page and its assets come from the same origin as the API.

use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.static_dir.clone();

    let mut router = Router::new()
        .route("/api/ws/{email}", get(handlers::ws::review_socket))
        .route("/api/user", post(handlers::customer::create_customer))
        .route("/api/review", post(handlers::review::trigger_review))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if static_dir.is_dir() {
        router = router.fallback_service(ServeDir::new(&static_dir));
        tracing::info!(path = %static_dir.display(), "Static file serving enabled");
    }

    router
}

/// GET /health - Liveness plus the number of live review sessions.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "live_sessions": state.relay.registry().len(),
    }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use reviewbot_core::chatbot::ChatbotService;
    use reviewbot_core::llm::box_provider::BoxLlmProvider;
    use reviewbot_core::llm::provider::LlmProvider;
    use reviewbot_infra::sqlite::pool::DatabasePool;
    use reviewbot_types::config::{ChatbotConfig, RelayConfig};
    use reviewbot_types::llm::{CompletionRequest, CompletionResponse, LlmError};

    use super::*;

    struct StubProvider;

    impl LlmProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
            Ok(CompletionResponse {
                content: "Thanks for your purchase!".to_string(),
                model: request.model.clone(),
                finish_reason: Some("STOP".to_string()),
            })
        }
    }

    async fn test_router() -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::open(dir.path()).await.unwrap();
        let chatbot = ChatbotService::new(
            BoxLlmProvider::new(StubProvider),
            &ChatbotConfig::default(),
            Duration::from_secs(5),
        )
        .unwrap();
        let state = AppState::new(
            pool,
            chatbot,
            &RelayConfig::default(),
            dir.path().to_path_buf(),
            dir.path().join("static"),
        );
        (build_router(state), dir)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const ANA: &str = r#"{"firstName":" Ana ","lastName":"Lima","email":"ana@x.com"}"#;

    #[tokio::test]
    async fn test_create_customer() {
        let (router, _dir) = test_router().await;

        let response = router.oneshot(post_json("/api/user", ANA)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"]["firstName"], "Ana");
        assert_eq!(json["data"]["email"], "ana@x.com");
        assert_eq!(json["_links"]["session"], "/api/ws/ana@x.com");
    }

    #[tokio::test]
    async fn test_duplicate_customer_is_conflict() {
        let (router, _dir) = test_router().await;

        let first = router
            .clone()
            .oneshot(post_json("/api/user", ANA))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = router.oneshot(post_json("/api/user", ANA)).await.unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(second).await["errors"][0]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_blank_customer_field_is_rejected() {
        let (router, _dir) = test_router().await;

        let response = router
            .oneshot(post_json(
                "/api/user",
                r#"{"firstName":"Ana","lastName":"  ","email":"ana@x.com"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_review_without_session_is_not_found() {
        let (router, _dir) = test_router().await;

        let response = router
            .oneshot(post_json(
                "/api/review",
                r#"{"user":{"name":"Ana","email":"ana@x.com"},"product":"Pixel 9"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["errors"][0]["code"], "SESSION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_malformed_review_is_rejected() {
        let (router, _dir) = test_router().await;

        let missing_product = router
            .clone()
            .oneshot(post_json(
                "/api/review",
                r#"{"user":{"name":"Ana","email":"ana@x.com"}}"#,
            ))
            .await
            .unwrap();
        assert_eq!(missing_product.status(), StatusCode::BAD_REQUEST);

        let not_json = router
            .oneshot(post_json("/api/review", "not json"))
            .await
            .unwrap();
        assert_eq!(not_json.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_reports_live_sessions() {
        let (router, _dir) = test_router().await;

        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["live_sessions"], 0);
    }
}
