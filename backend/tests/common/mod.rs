//! Common test utilities for integration tests
//!
//! Each `TestApp` owns a fresh router with its own in-memory appointment list
//! and a per-run JWT secret.

#![allow(dead_code)]

use appointment_booking_backend::{
    config::{AppConfig, CredentialConfig, JwtConfig, ServerConfig},
    routes,
    state::AppState,
};
use appointment_booking_shared::Role;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use jsonwebtoken::Algorithm;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

static RUN: AtomicUsize = AtomicUsize::new(0);

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application with the demo credentials
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let state = AppState::new(config);
        let app = routes::create_router(state.clone());
        Self { app, state }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        self.request(Method::GET, path, None, None, None).await
    }

    /// Make a GET request with a bearer token
    pub async fn get_auth(&self, path: &str, token: &str) -> (StatusCode, String) {
        self.request(Method::GET, path, Some(token), None, None).await
    }

    /// Make a request with a bearer token and JSON body
    pub async fn send_json(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: &str,
    ) -> (StatusCode, String) {
        self.request(method, path, Some(token), Some("application/json"), Some(body))
            .await
    }

    /// Make a DELETE request with a bearer token
    pub async fn delete_auth(&self, path: &str, token: &str) -> (StatusCode, String) {
        self.request(Method::DELETE, path, Some(token), None, None).await
    }

    /// POST /token with form-encoded credentials
    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, String) {
        self.login_raw(&format!("username={}&password={}", username, password))
            .await
    }

    /// POST /token with an arbitrary form body
    pub async fn login_raw(&self, form: &str) -> (StatusCode, String) {
        self.request(
            Method::POST,
            "/token",
            None,
            Some("application/x-www-form-urlencoded"),
            Some(form),
        )
        .await
    }

    /// Log in and return the access token, panicking on failure
    pub async fn token(&self, username: &str, password: &str) -> String {
        let (status, body) = self.login(username, password).await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        body["access_token"].as_str().unwrap().to_string()
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        content_type: Option<&str>,
        body: Option<&str>,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }
}

pub fn test_config() -> AppConfig {
    let run = RUN.fetch_add(1, Ordering::SeqCst);
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        jwt: JwtConfig {
            secret: format!("test-secret-key-for-testing-only-run-{}", run),
            algorithm: Algorithm::HS256,
            access_token_expiry_secs: 1800,
        },
        credentials: vec![
            CredentialConfig::new("admin", "admin123", Role::Admin),
            CredentialConfig::new("user", "user123", Role::User),
        ],
    }
}
