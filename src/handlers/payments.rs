use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    entities::payment::Model as PaymentModel, services::payments::CreatePaymentRequest,
    ApiResponse, ApiResult, AppState,
};

#[derive(Debug, Deserialize)]
pub struct PaymentListQuery {
    pub order_id: Option<Uuid>,
    pub status: Option<String>,
}

pub async fn create_payment(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> ApiResult<PaymentModel> {
    let payment = state.services.payments.create_payment(request).await?;
    Ok(Json(ApiResponse::success(payment)))
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<PaymentModel> {
    let payment = state.services.payments.get_payment(id).await?;
    Ok(Json(ApiResponse::success(payment)))
}

pub async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<PaymentListQuery>,
) -> ApiResult<Vec<PaymentModel>> {
    let payments = state
        .services
        .payments
        .list_payments(query.order_id, query.status)
        .await?;
    Ok(Json(ApiResponse::success(payments)))
}

/// Completes a pending payment; a fully covered pending order becomes
/// paid in the same transaction.
#[utoipa::path(
    post,
    path = "/api/v1/payments/{id}/complete",
    params(("id" = Uuid, Path, description = "Payment id")),
    responses(
        (status = 200, description = "Payment completed"),
        (status = 404, description = "Payment not found"),
        (status = 409, description = "Payment already completed"),
        (status = 422, description = "Payment is failed or refunded")
    ),
    tag = "payments"
)]
pub async fn complete_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<PaymentModel> {
    let payment = state.services.payments.complete_payment(id).await?;
    Ok(Json(ApiResponse::message(payment, "payment completed")))
}

pub async fn refund_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<PaymentModel> {
    let payment = state.services.payments.refund_payment(id).await?;
    Ok(Json(ApiResponse::message(payment, "payment refunded")))
}

pub async fn fail_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<PaymentModel> {
    let payment = state.services.payments.fail_payment(id).await?;
    Ok(Json(ApiResponse::message(payment, "payment marked as failed")))
}
