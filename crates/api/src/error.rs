//! Mapping of domain errors to HTTP responses.
//!
//! Every failure leaves the API as `{"error": <code>, "message": <text>}` with
//! the status code given by [`AppError::status_code`].

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;
use validator::ValidationErrors;

use qrkot_db::repositories::{DonationError, ProjectError};
use qrkot_shared::AppError;

/// Error returned by handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_server_error() {
            error!(error = %self.0, "Request failed");
            "An error occurred".to_string()
        } else {
            self.0.to_string()
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code().to_lowercase(),
                "message": message
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl From<ProjectError> for ApiError {
    fn from(e: ProjectError) -> Self {
        let app = match e {
            ProjectError::NotFound(_) => AppError::NotFound(e.to_string()),
            ProjectError::DuplicateName(_)
            | ProjectError::Closed(_)
            | ProjectError::AlreadyInvested(_) => AppError::BadRequest(e.to_string()),
            ProjectError::CapacityBelowInvested { .. } => AppError::Validation(e.to_string()),
            ProjectError::Allocation(_) => AppError::Internal(e.to_string()),
            ProjectError::Database(_) => AppError::Database(e.to_string()),
        };
        Self(app)
    }
}

impl From<DonationError> for ApiError {
    fn from(e: DonationError) -> Self {
        let app = match e {
            DonationError::Allocation(_) => AppError::Internal(e.to_string()),
            DonationError::Database(_) => AppError::Database(e.to_string()),
        };
        Self(app)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        Self(AppError::Validation(e.to_string()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        if rejection.status() == StatusCode::UNPROCESSABLE_ENTITY {
            Self(AppError::Validation(message))
        } else {
            Self(AppError::BadRequest(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ProjectError::NotFound(1), StatusCode::NOT_FOUND)]
    #[case(ProjectError::DuplicateName("Food".into()), StatusCode::BAD_REQUEST)]
    #[case(ProjectError::Closed(1), StatusCode::BAD_REQUEST)]
    #[case(ProjectError::AlreadyInvested(1), StatusCode::BAD_REQUEST)]
    #[case(
        ProjectError::CapacityBelowInvested { full_amount: 5, invested_amount: 10 },
        StatusCode::UNPROCESSABLE_ENTITY
    )]
    fn test_project_error_status(#[case] error: ProjectError, #[case] expected: StatusCode) {
        let response = ApiError::from(error).into_response();
        assert_eq!(response.status(), expected);
    }

    #[test]
    fn test_database_error_hides_details() {
        let error = ApiError::from(DonationError::Database(sea_orm::DbErr::Custom(
            "connection refused".into(),
        )));
        assert_eq!(error.0.status_code(), 500);
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
