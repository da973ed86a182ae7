//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for charity projects, donations and reports
//! - Authentication middleware
//! - Error responses

pub mod error;
pub mod middleware;
pub mod routes;

#[cfg(test)]
mod test_support;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use qrkot_db::{AllocationGate, CharityProjectRepository, DonationRepository};
use qrkot_shared::JwtService;
use qrkot_shared::config::AppInfo;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Gate serializing allocation passes within this process.
    pub gate: AllocationGate,
    /// Application metadata.
    pub app: Arc<AppInfo>,
}

impl AppState {
    /// Returns a charity project repository bound to this state.
    #[must_use]
    pub fn projects(&self) -> CharityProjectRepository {
        CharityProjectRepository::new((*self.db).clone(), self.gate.clone())
    }

    /// Returns a donation repository bound to this state.
    #[must_use]
    pub fn donations(&self) -> DonationRepository {
        DonationRepository::new((*self.db).clone(), self.gate.clone())
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
