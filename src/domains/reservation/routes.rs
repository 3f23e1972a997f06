// Reservation domain routes
// 예약 도메인 라우터
use axum::{routing::{get, post}, Router};
use crate::domains::reservation::handlers::reservation_handler;
use crate::shared::services::AppState;

/// Create reservation router
/// 예약 라우터 생성
pub fn create_reservation_router() -> Router<AppState> {
    Router::new()
        .route("/", post(reservation_handler::create_reservation))
        .route("/by-req", get(reservation_handler::get_reservation_by_req))
}
