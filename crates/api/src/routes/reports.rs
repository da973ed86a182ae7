//! Report routes (requires auth middleware to be applied externally).

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use qrkot_core::reports::{CompletionRow, ReportService};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/completion", get(get_completion_report))
}

/// One closed project in the completion report.
#[derive(Debug, Serialize)]
pub struct CompletionRowResponse {
    /// Project name.
    pub name: String,
    /// Time from creation to closure, e.g. `"2 days, 3:04:05"`.
    pub gathering_time: String,
    /// The same duration in whole seconds.
    pub gathering_time_seconds: i64,
    /// Project description.
    pub description: String,
}

impl From<CompletionRow> for CompletionRowResponse {
    fn from(row: CompletionRow) -> Self {
        Self {
            gathering_time: ReportService::format_gathering_time(row.gathering_time),
            gathering_time_seconds: row.gathering_time.num_seconds(),
            name: row.name,
            description: row.description,
        }
    }
}

/// GET `/reports/completion` - Closed projects, fastest funded first.
async fn get_completion_report(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<CompletionRowResponse>>, ApiError> {
    let rows = state.projects().completion_report().await?;
    Ok(Json(
        rows.into_iter().map(CompletionRowResponse::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, StatusCode};
    use chrono::TimeDelta;
    use serde_json::json;

    use crate::test_support::test_app;

    #[test]
    fn test_row_response_formats_duration() {
        let row = CompletionRow {
            project_id: 1,
            name: "Shelter".into(),
            gathering_time: TimeDelta::days(2) + TimeDelta::seconds(11_045),
            description: "Beds".into(),
        };

        let response = CompletionRowResponse::from(row);

        assert_eq!(response.gathering_time, "2 days, 3:04:05");
        assert_eq!(response.gathering_time_seconds, 183_845);
    }

    #[tokio::test]
    async fn test_completion_report_lists_closed_projects() {
        let app = test_app().await;
        let token = app.token();
        for (name, amount) in [("Quick", 10), ("Slow", 1000)] {
            let (status, _) = app
                .send(
                    Method::POST,
                    "/api/v1/charity_project",
                    Some(&token),
                    Some(json!({"name": name, "description": "Cats", "full_amount": amount})),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
        }
        let (status, _) = app
            .send(
                Method::POST,
                "/api/v1/donation",
                Some(&token),
                Some(json!({"full_amount": 10})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, report) = app
            .send(Method::GET, "/api/v1/reports/completion", Some(&token), None)
            .await;

        assert_eq!(status, StatusCode::OK);
        let rows = report.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Quick");
        assert_eq!(rows[0]["description"], "Cats");
        assert!(rows[0]["gathering_time"].is_string());
        assert!(rows[0]["gathering_time_seconds"].as_i64().unwrap() >= 0);
    }

    #[tokio::test]
    async fn test_completion_report_requires_token() {
        let app = test_app().await;

        let (status, _) = app
            .send(Method::GET, "/api/v1/reports/completion", None, None)
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
