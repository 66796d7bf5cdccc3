//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Authentication
        .route("/auth/login", post(handlers::login))
        .route("/auth/register", post(handlers::register))
        .route("/auth/logout", post(handlers::logout))
        .route("/auth/session", get(handlers::current_session))
        .route("/auth/reset-password", post(handlers::reset_password))
        // Partner CRUD
        .route("/partners", get(handlers::list_partners))
        .route("/partners", post(handlers::create_partner))
        .route("/partners/{partner_id}", get(handlers::get_partner))
        .route("/partners/{partner_id}", put(handlers::update_partner))
        .route("/partners/{partner_id}", delete(handlers::delete_partner))
        // Locality CRUD
        .route("/localities", get(handlers::list_localities))
        .route("/localities", post(handlers::create_locality))
        .route("/localities/{locality_id}", get(handlers::get_locality))
        .route("/localities/{locality_id}", put(handlers::update_locality))
        .route(
            "/localities/{locality_id}",
            delete(handlers::delete_locality),
        )
        // Dashboard
        .route("/dashboard", get(handlers::get_dashboard));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Payloads are small records; anything bigger is a client bug.
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::auth::{AuthService, MemorySessionStore};
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::FullRepository;
    use crate::db::seed::seed_repository;

    async fn test_app() -> Router {
        let repo = Arc::new(LocalRepository::new());
        seed_repository(repo.as_ref()).await.unwrap();
        let repo: Arc<dyn FullRepository> = repo;
        let auth = AuthService::new(repo.clone(), Arc::new(MemorySessionStore::new()));
        create_router(AppState::new(repo, auth))
    }

    async fn login_token(app: &Router) -> String {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"email":"admin@example.com","password":"password123"}"#,
            ))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        json["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_router_creation() {
        let _router = test_app().await;
        // If we got here, router was created successfully
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_data_routes_require_token() {
        let app = test_app().await;

        for uri in ["/v1/partners", "/v1/localities", "/v1/dashboard"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/auth/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"email":"admin@example.com","password":"nope-nope"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_grants_access_to_partner_list() {
        let app = test_app().await;
        let token = login_token(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/partners")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["total"], 3);
    }

    #[tokio::test]
    async fn test_unknown_partner_is_404() {
        let app = test_app().await;
        let token = login_token(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/partners/999")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_partner_roundtrip() {
        let app = test_app().await;
        let token = login_token(&app).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/partners")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::from(
                        r#"{"name":"Vanu","network_capacity":6.5}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/partners")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["total"], 4);
    }
}
