//! Donation routes (requires auth middleware to be applied externally).

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use qrkot_db::entities::donations;
use qrkot_db::repositories::CreateDonationInput;

/// Creates the donation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/donation", get(list_donations).post(create_donation))
        .route("/donation/my", get(list_my_donations))
}

/// Request body for making a donation.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateDonationRequest {
    /// Donated amount.
    #[validate(range(min = 1))]
    pub full_amount: i64,
    /// Optional comment.
    pub comment: Option<String>,
}

/// Donation as shown to its owner.
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct DonationShortResponse {
    /// Donation ID.
    pub id: i32,
    /// Donated amount.
    pub full_amount: i64,
    /// Comment.
    pub comment: Option<String>,
    /// Creation time.
    pub create_date: DateTime<FixedOffset>,
}

impl From<donations::Model> for DonationShortResponse {
    fn from(m: donations::Model) -> Self {
        Self {
            id: m.id,
            full_amount: m.full_amount,
            comment: m.comment,
            create_date: m.create_date,
        }
    }
}

/// Donation with its allocation state.
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct DonationFullResponse {
    /// Donation ID.
    pub id: i32,
    /// Donor.
    pub user_id: Uuid,
    /// Donated amount.
    pub full_amount: i64,
    /// Comment.
    pub comment: Option<String>,
    /// Amount already passed on to projects.
    pub invested_amount: i64,
    /// Whether the whole amount was passed on.
    pub fully_invested: bool,
    /// Creation time.
    pub create_date: DateTime<FixedOffset>,
    /// Time the whole amount was passed on.
    pub close_date: Option<DateTime<FixedOffset>>,
}

impl From<donations::Model> for DonationFullResponse {
    fn from(m: donations::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            full_amount: m.full_amount,
            comment: m.comment,
            invested_amount: m.invested_amount,
            fully_invested: m.fully_invested,
            create_date: m.create_date,
            close_date: m.close_date,
        }
    }
}

/// POST `/donation` - Donate and distribute over open projects.
async fn create_donation(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateDonationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let donation = state
        .donations()
        .create(
            auth.user_id(),
            CreateDonationInput {
                full_amount: payload.full_amount,
                comment: payload.comment.map(|c| c.trim().to_string()),
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DonationShortResponse::from(donation)),
    ))
}

/// GET `/donation` - List every donation.
async fn list_donations(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<DonationFullResponse>>, ApiError> {
    let donations = state.donations().list_all().await?;
    Ok(Json(
        donations
            .into_iter()
            .map(DonationFullResponse::from)
            .collect(),
    ))
}

/// GET `/donation/my` - List the caller's donations.
async fn list_my_donations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<DonationShortResponse>>, ApiError> {
    let donations = state.donations().list_by_user(auth.user_id()).await?;
    Ok(Json(
        donations
            .into_iter()
            .map(DonationShortResponse::from)
            .collect(),
    ))
}
