//! Charity project routes.
//!
//! Listing is public. Creating, editing and deleting require a bearer token.
//! Creating a project immediately runs an allocation pass against the open
//! donations.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    AppState,
    error::ApiError,
    middleware::{AuthUser, auth_middleware},
};
use qrkot_db::entities::charity_projects;
use qrkot_db::repositories::{CreateProjectInput, UpdateProjectInput};
use qrkot_shared::AppError;

/// Creates the charity project routes.
pub fn routes(state: &AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    Router::new()
        .route(
            "/charity_project",
            get(list_projects).merge(post(create_project).layer(auth.clone())),
        )
        .route(
            "/charity_project/{id}",
            patch(update_project).delete(delete_project).layer(auth),
        )
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Request body for creating a project.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateProjectRequest {
    /// Unique name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Description.
    #[validate(length(min = 1))]
    pub description: String,
    /// Target amount.
    #[validate(range(min = 1))]
    pub full_amount: i64,
}

impl CreateProjectRequest {
    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            full_amount: self.full_amount,
        }
    }
}

/// Request body for editing a project.
///
/// Omitted fields stay unchanged; an explicit `null` is rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProjectRequest {
    /// New name.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    /// New description.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    /// New target amount.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub full_amount: Option<Option<i64>>,
}

/// Validated project changes.
#[derive(Debug, Validate)]
struct ProjectChanges {
    #[validate(length(min = 1, max = 100))]
    name: Option<String>,
    #[validate(length(min = 1))]
    description: Option<String>,
    #[validate(range(min = 1))]
    full_amount: Option<i64>,
}

impl UpdateProjectRequest {
    fn into_changes(self) -> Result<ProjectChanges, ApiError> {
        let changes = ProjectChanges {
            name: non_null("name", self.name)?.map(|s| s.trim().to_string()),
            description: non_null("description", self.description)?
                .map(|s| s.trim().to_string()),
            full_amount: non_null("full_amount", self.full_amount)?,
        };
        changes.validate()?;
        Ok(changes)
    }
}

fn non_null<T>(field: &str, value: Option<Option<T>>) -> Result<Option<T>, ApiError> {
    match value {
        Some(None) => Err(AppError::Validation(format!("{field} cannot be null")).into()),
        Some(Some(v)) => Ok(Some(v)),
        None => Ok(None),
    }
}

/// Project as returned by the API.
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    /// Project ID.
    pub id: i32,
    /// Name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Target amount.
    pub full_amount: i64,
    /// Amount collected so far.
    pub invested_amount: i64,
    /// Whether the target is reached.
    pub fully_invested: bool,
    /// Creation time.
    pub create_date: DateTime<FixedOffset>,
    /// Time the target was reached.
    pub close_date: Option<DateTime<FixedOffset>>,
}

impl From<charity_projects::Model> for ProjectResponse {
    fn from(m: charity_projects::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            full_amount: m.full_amount,
            invested_amount: m.invested_amount,
            fully_invested: m.fully_invested,
            create_date: m.create_date,
            close_date: m.close_date,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET `/charity_project` - List all projects.
async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let projects = state.projects().list().await?;
    Ok(Json(projects.into_iter().map(ProjectResponse::from).collect()))
}

/// POST `/charity_project` - Create a project and fund it from open donations.
async fn create_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let payload = payload.trimmed();
    payload.validate()?;

    let project = state
        .projects()
        .create(CreateProjectInput {
            name: payload.name,
            description: payload.description,
            full_amount: payload.full_amount,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ProjectResponse::from(project))))
}

/// PATCH `/charity_project/{id}` - Edit an open project.
async fn update_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateProjectRequest>, JsonRejection>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let Json(payload) = payload?;
    let changes = payload.into_changes()?;

    let project = state
        .projects()
        .update(
            id,
            UpdateProjectInput {
                name: changes.name,
                description: changes.description,
                full_amount: changes.full_amount,
            },
        )
        .await?;

    Ok(Json(ProjectResponse::from(project)))
}

/// DELETE `/charity_project/{id}` - Delete a project nobody donated to yet.
async fn delete_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = state.projects().delete(id).await?;
    Ok(Json(ProjectResponse::from(project)))
}
