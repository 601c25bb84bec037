//! Inbound review trigger handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;

use reviewbot_types::review::ReviewTrigger;

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ReviewDelivery {
    pub status: &'static str,
}

/// POST /api/review - Ask the chatbot to open a review in the customer's live session.
pub async fn trigger_review(
    State(state): State<AppState>,
    payload: Result<Json<ReviewTrigger>, JsonRejection>,
) -> Result<Json<ApiResponse<ReviewDelivery>>, AppError> {
    let timer = RequestTimer::start();
    let Json(mut trigger) = payload?;
    trigger.validate()?;

    state.relay.trigger_review(&trigger).await?;

    Ok(Json(timer.success(ReviewDelivery { status: "delivered" })))
}
