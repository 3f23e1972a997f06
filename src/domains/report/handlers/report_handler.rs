use crate::domains::report::models::{
    ChannelSummaryQuery, ChannelSummaryResponse, JobStatsQuery, JobStatsResponse,
};
use crate::shared::services::AppState;
use axum::{extract::{Query, State}, http::StatusCode, Json};

/// 채널별 작업 상태 통계 핸들러
/// Jobs stats handler
pub async fn get_job_stats(
    State(app_state): State<AppState>,
    Query(query): Query<JobStatsQuery>,
) -> Result<Json<JobStatsResponse>, (StatusCode, Json<serde_json::Value>)> {
    let stats = app_state
        .report_state
        .report_service
        .job_stats(query.channel_id)
        .await
        .map_err(|e| app_state.reject(e))?;

    Ok(Json(stats))
}

/// 채널 요약 핸들러
/// Channel summary handler
pub async fn get_channel_summary(
    State(app_state): State<AppState>,
    Query(query): Query<ChannelSummaryQuery>,
) -> Result<Json<ChannelSummaryResponse>, (StatusCode, Json<serde_json::Value>)> {
    let (channel_id, summary) = app_state
        .report_state
        .report_service
        .channel_summary(query)
        .await
        .map_err(|e| app_state.reject(e))?;

    Ok(Json(ChannelSummaryResponse {
        ok: true,
        channel_id,
        summary,
    }))
}
