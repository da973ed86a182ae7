//! Router harness for handler tests: in-memory SQLite, real middleware.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{AppState, create_router};
use qrkot_db::AllocationGate;
use qrkot_db::migration::{Migrator, MigratorTrait};
use qrkot_shared::JwtService;
use qrkot_shared::config::{AppInfo, JwtConfig};

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

pub async fn test_app() -> TestApp {
    let db = qrkot_db::connect("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(JwtService::new(&JwtConfig {
            secret: "test-secret-key-for-testing".to_string(),
            access_token_expiry_secs: 900,
        })),
        gate: AllocationGate::new(),
        app: Arc::new(AppInfo::default()),
    };

    TestApp {
        router: create_router(state.clone()),
        state,
    }
}

impl TestApp {
    /// Issues a token for a fresh user.
    pub fn token(&self) -> String {
        self.token_for(Uuid::new_v4())
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        self.state
            .jwt_service
            .generate_access_token(user_id)
            .expect("Failed to issue token")
    }

    /// Sends one request and returns the status with the JSON body
    /// (`Value::Null` when the body is empty or not JSON).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}
