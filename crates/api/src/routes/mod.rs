//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod charity_projects;
pub mod donations;
pub mod health;
pub mod reports;

/// Creates the API router, wrapping protected routes in the auth middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(donations::routes())
        .merge(reports::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Project listing is public, project changes are not
    Router::new()
        .merge(health::routes())
        .merge(charity_projects::routes(&state))
        .merge(protected_routes)
}
