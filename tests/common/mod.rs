//! Shared harness for the router-level tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use househelp_finder::api::{create_router, AppState};
use househelp_finder::commands::seed::seed;
use househelp_finder::config::{Config, SESSION_COOKIE_NAME};
use househelp_finder::infra::Database;

pub const JWT_SECRET: &str = "test-secret-key-for-testing-only-32chars";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "#Secret123";

/// Router over a freshly migrated and seeded SQLite file
pub struct TestApp {
    pub router: Router,
    pub database: Arc<Database>,
    path: PathBuf,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let path = std::env::temp_dir().join(format!("househelp-test-{}.db", Uuid::new_v4()));
        let url = format!("sqlite://{}?mode=rwc", path.display());

        let database = Arc::new(Database::connect(&url).await.expect("database"));
        let config = Config::new(url, JWT_SECRET);
        seed(&database, &config).await.expect("seed");

        let router = create_router(AppState::from_config(database.clone(), config));
        Self {
            router,
            database,
            path,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str, session: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = session {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: Value, session: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = session {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Sign in and return the `Cookie` header value for later requests
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post_json(
                "/account/login",
                serde_json::json!({ "email": email, "password": password }),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response).expect("session cookie")
    }

    /// Register a househelp anonymously and return its id
    pub async fn register(&self, username: &str, password: &str) -> Uuid {
        let response = self
            .post_json(
                "/househelp/create",
                serde_json::json!({
                    "username": username,
                    "email": format!("{}@x.com", username),
                    "password": password,
                    "confirm_password": password,
                }),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        body["data"]["id"].as_str().unwrap().parse().unwrap()
    }

    pub async fn reach_out(&self, house_help_id: Uuid, sender: &str) -> Response<Body> {
        self.post_json(
            "/reach-out",
            serde_json::json!({
                "house_help_id": house_help_id,
                "name": sender,
                "phone": "0712345678",
                "description": "Need cleaner",
            }),
            None,
        )
        .await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// `name=value` of the issued session cookie, ignoring removals
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .find(|pair| {
            pair.strip_prefix(SESSION_COOKIE_NAME)
                .and_then(|rest| rest.strip_prefix('='))
                .is_some_and(|token| !token.is_empty())
        })
        .map(str::to_string)
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap_or_default()
}
