use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use registration_cell::create_registration_router;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Patient Registration API is running!" }))
        .nest("/registrations", create_registration_router(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{Request, StatusCode}};
    use tower::ServiceExt;

    fn test_config() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            registration_delay_ms: 0,
            ..AppConfig::default()
        })
    }

    #[tokio::test]
    async fn test_root_is_alive() {
        let response = create_router(test_config())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_registrations_are_nested() {
        let request = Request::builder()
            .uri("/registrations/format-phone?phone=5551234567")
            .body(Body::empty())
            .unwrap();
        let response = create_router(test_config()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["formatted"], "(555) 123-4567");
    }
}
