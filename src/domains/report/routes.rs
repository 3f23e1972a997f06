// Report domain routes
// 리포트 도메인 라우터
use axum::{routing::get, Router};
use crate::domains::report::handlers::report_handler;
use crate::shared::services::AppState;

/// Create report router (mounted at `/v1`)
/// 리포트 라우터 생성
pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/jobs/stats", get(report_handler::get_job_stats))
        .route("/channel-summary", get(report_handler::get_channel_summary))
}
