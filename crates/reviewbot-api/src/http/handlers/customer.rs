//! Customer registration handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use reviewbot_types::customer::{CreateCustomerRequest, Customer};

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// POST /api/user - Register a customer so they can open a review session.
pub async fn create_customer(
    State(state): State<AppState>,
    payload: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Customer>>, AppError> {
    let timer = RequestTimer::start();
    let Json(body) = payload?;

    let customer = state.customer_service.create_customer(body).await?;
    tracing::info!(customer_id = %customer.id, email = %customer.email, "Customer registered");

    let session = format!("/api/ws/{}", customer.email);
    Ok(Json(timer.success(customer).with_link("session", session)))
}
