// Routes module: 라우팅 설정
// 역할: 모든 도메인의 라우터를 조합
// Routes module: combines all domain routers

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use crate::shared::errors::ApiError;
use crate::shared::middleware::apply_http_layers;
use crate::shared::services::AppState;

// 각 도메인의 routes import
use crate::domains::report::routes::create_report_router;
use crate::domains::reservation::routes::create_reservation_router;
use crate::domains::wallet::routes::{create_wallet_router, create_wallet_tx_router};

/// Create main router (combines all domain routers)
/// 메인 라우터 생성 (모든 도메인 라우터 조합)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/v1/reservations", create_reservation_router())
        .nest("/v1/wallet_tx", create_wallet_tx_router())
        .nest("/v1/wallets", create_wallet_router())
        .nest("/v1", create_report_router())
        .fallback(not_found)
}

/// 상태 + 공통 레이어까지 적용된 앱
/// Fully assembled application (state and HTTP layers applied)
pub fn build_app(state: AppState) -> Router {
    let config = state.config.clone();
    apply_http_layers(create_router().with_state(state), &config)
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true, "message": "ttirring API running" }))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    ApiError::RouteNotFound.into()
}
