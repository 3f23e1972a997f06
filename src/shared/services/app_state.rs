use std::sync::Arc;
use axum::{http::StatusCode, Json};
use serde_json::Value;
use crate::domains::report::services::ReportState;
use crate::domains::reservation::services::ReservationState;
use crate::domains::wallet::services::WalletState;
use crate::shared::config::Config;
use crate::shared::errors::ApiError;
use crate::shared::store::DispatchStore;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
///
/// 저장소는 `Arc<dyn DispatchStore>` 하나를 모든 도메인이 공유
/// (MemoryStore / PgStore 중 main에서 선택)
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DispatchStore>,
    pub config: Arc<Config>,
    pub reservation_state: ReservationState,
    pub wallet_state: WalletState,
    pub report_state: ReportState,
}

impl AppState {
    /// 모든 도메인 State를 초기화하고 조합
    pub fn new(store: Arc<dyn DispatchStore>, config: Config) -> Self {
        Self {
            reservation_state: ReservationState::new(store.clone()),
            wallet_state: WalletState::new(store.clone()),
            report_state: ReportState::new(store.clone()),
            store,
            config: Arc::new(config),
        }
    }

    /// ApiError → 핸들러 응답
    /// Convert an error into a handler rejection
    ///
    /// 내부 에러는 요청 span 안에서 error 로그, 운영 환경에서는 메시지 숨김
    pub fn reject(&self, err: ApiError) -> (StatusCode, Json<Value>) {
        if err.is_internal() {
            tracing::error!(error = %err, code = err.code(), "request failed");
        } else {
            tracing::debug!(code = err.code(), "request rejected: {}", err);
        }
        err.into_rejection(!self.config.is_production())
    }
}
