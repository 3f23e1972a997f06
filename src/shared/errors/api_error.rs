use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::{json, Value};
use crate::shared::store::StoreError;

/// API 에러 (모든 도메인 공통)
/// API errors shared by every domain
///
/// 응답 바디: `{"ok": false, "error": "<CODE>"}`
#[derive(Error, Debug)]
pub enum ApiError {
    /// 필수 필드 누락 (예약)
    /// Required reservation field missing
    #[error("Missing required fields")]
    MissingFields,

    /// 잘못된 요청 (형식 오류, 필수값 누락)
    /// Malformed request body or query
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 금액이 양의 정수가 아님
    /// Amount is not a positive integer (or would overflow the balance)
    #[error("Invalid amount")]
    InvalidAmount,

    /// 허용되지 않은 사유 코드
    /// Reason code not in the allow-list for this direction
    #[error("Invalid reason: {reason}")]
    InvalidReason { reason: String },

    /// channelId 쿼리 누락
    /// channelId query parameter missing
    #[error("channelId query parameter missing")]
    MissingChannel,

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("Channel not found: {channel_id}")]
    ChannelNotFound { channel_id: String },

    #[error("Job not found: {job_id}")]
    JobNotFound { job_id: String },

    #[error("Reservation not found: reqId={req_id}")]
    ReservationNotFound { req_id: String },

    /// 라우트 없음
    /// No such route
    #[error("Route not found")]
    RouteNotFound,

    /// 내부 서버 에러 (저장소 실패 포함)
    /// Internal server error, including store failures
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// 응답에 노출되는 에러 코드
    /// Stable error code exposed in the response body
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingFields => "MISSING_FIELDS",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::InvalidAmount => "INVALID_AMOUNT",
            ApiError::InvalidReason { .. } => "INVALID_REASON",
            ApiError::MissingChannel => "MISSING_CHANNEL",
            ApiError::UserNotFound { .. } => "USER_NOT_FOUND",
            ApiError::ChannelNotFound { .. } => "CHANNEL_NOT_FOUND",
            ApiError::JobNotFound { .. } => "JOB_NOT_FOUND",
            ApiError::ReservationNotFound { .. } => "RESERVATION_NOT_FOUND",
            ApiError::RouteNotFound => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields
            | ApiError::BadRequest(_)
            | ApiError::InvalidAmount
            | ApiError::InvalidReason { .. }
            | ApiError::MissingChannel => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound { .. }
            | ApiError::ChannelNotFound { .. }
            | ApiError::JobNotFound { .. }
            | ApiError::ReservationNotFound { .. }
            | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.status() == StatusCode::INTERNAL_SERVER_ERROR
    }

    /// HTTP 응답으로 변환
    /// Convert into a handler rejection
    ///
    /// `expose_internal`이 false(운영 환경)면 내부 에러 메시지를 숨김
    pub fn into_rejection(self, expose_internal: bool) -> (StatusCode, Json<Value>) {
        let status = self.status();
        let body = if self.is_internal() && expose_internal {
            json!({ "ok": false, "error": self.code(), "message": self.to_string() })
        } else {
            json!({ "ok": false, "error": self.code() })
        };
        (status, Json(body))
    }
}

/// 기본 변환은 내부 메시지를 노출하지 않음
impl From<ApiError> for (StatusCode, Json<Value>) {
    fn from(err: ApiError) -> Self {
        err.into_rejection(false)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::BalanceOverflow { .. } => ApiError::InvalidAmount,
            StoreError::Backend(e) => ApiError::Internal(format!("{:#}", e)),
        }
    }
}
