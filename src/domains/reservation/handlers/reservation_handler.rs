use crate::domains::reservation::models::{
    CreateReservationRequest, ReservationByReqQuery, ReservationResponse,
};
use crate::shared::middleware::ApiJson;
use crate::shared::services::AppState;
use axum::{extract::{Query, State}, http::StatusCode, Json};

/// 예약 생성 핸들러
/// Create reservation handler
/// 201: 새로 생성 / 200: 같은 reqId 재요청 (`idempotent: true`)
pub async fn create_reservation(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), (StatusCode, Json<serde_json::Value>)> {
    let outcome = app_state
        .reservation_state
        .reservation_service
        .create_reservation(request)
        .await
        .map_err(|e| app_state.reject(e))?;

    Ok((outcome.status_code(), Json(outcome.into())))
}

/// reqId로 예약 조회 핸들러
/// Get reservation by reqId handler
pub async fn get_reservation_by_req(
    State(app_state): State<AppState>,
    Query(query): Query<ReservationByReqQuery>,
) -> Result<Json<ReservationResponse>, (StatusCode, Json<serde_json::Value>)> {
    let reservation = app_state
        .reservation_state
        .reservation_service
        .get_by_req_id(query.req_id)
        .await
        .map_err(|e| app_state.reject(e))?;

    Ok(Json(ReservationResponse::found(reservation)))
}
