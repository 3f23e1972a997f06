use serde::{Deserialize, Serialize};
use serde_json::Value;
use chrono::{DateTime, Utc};
use crate::domains::validation::{entity_key, EntityRefs};
use crate::shared::errors::ApiError;
use crate::shared::idempotency::Replayable;

// =====================================================
// Reservation 모델
// =====================================================
// 역할: 클라이언트 요청 ID(reqId)당 정확히 한 번 생성되는 예약
// 규칙:
// - 같은 reqId로 다시 요청하면 최초 예약을 그대로 돌려줌 (바디가 달라도)
// - 생성 후 이 코어에서는 수정/삭제하지 않음
// =====================================================

/// 좌표
/// Geographic point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// 예약 정보
/// Reservation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// 서버가 생성한 예약 ID (R-<millis>-<suffix>)
    /// Server-generated reservation ID
    pub reservation_id: String,

    /// 멱등성 키 (클라이언트 요청 ID)
    /// Idempotency key supplied by the client
    pub req_id: String,

    /// 요청자
    pub user_id: String,

    pub channel_id: String,
    pub pickup: LatLng,
    pub dropoff: LatLng,

    /// 예약 시각
    /// Scheduled pickup time
    pub scheduled_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
}

// =====================================================
// 요청 / 응답
// =====================================================

/// 예약 생성 요청
/// Create reservation request
///
/// 필드를 원시 JSON 값으로 받음: 존재 검증이 타입 검증보다 먼저 실행되도록
/// 누락 시 MISSING_FIELDS, 타입 오류 시 BAD_REQUEST
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub user_id: Option<Value>,
    pub channel_id: Option<Value>,
    pub pickup: Option<Value>,
    pub dropoff: Option<Value>,
    pub scheduled_at: Option<Value>,
    pub req_id: Option<Value>,
}

/// 검증을 통과한 예약 생성 명령
/// Validated reservation command
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub req_id: String,
    pub user_id: String,
    pub channel_id: String,
    pub pickup: LatLng,
    pub dropoff: LatLng,
    pub scheduled_at: DateTime<Utc>,
}

impl NewReservation {
    /// 서버 ID/생성 시각을 붙여 최종 예약 생성
    pub fn into_reservation(self, reservation_id: String, created_at: DateTime<Utc>) -> Reservation {
        Reservation {
            reservation_id,
            req_id: self.req_id,
            user_id: self.user_id,
            channel_id: self.channel_id,
            pickup: self.pickup,
            dropoff: self.dropoff,
            scheduled_at: self.scheduled_at,
            created_at,
        }
    }
}

fn is_missing(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn present(value: Option<Value>) -> Result<Value, ApiError> {
    if is_missing(&value) {
        return Err(ApiError::MissingFields);
    }
    value.ok_or(ApiError::MissingFields)
}

fn required_str(value: Option<Value>, field: &str) -> Result<String, ApiError> {
    match present(value)? {
        Value::String(s) => Ok(s),
        _ => Err(ApiError::BadRequest(format!("{} must be a string", field))),
    }
}

fn required_point(value: Option<Value>, field: &str) -> Result<LatLng, ApiError> {
    serde_json::from_value(present(value)?)
        .map_err(|e| ApiError::BadRequest(format!("{} is not a point: {}", field, e)))
}

impl CreateReservationRequest {
    /// 존재 검증 대상 키 (채널 → 사용자)
    /// Keys checked by existence validation
    pub fn entity_refs(&self) -> EntityRefs {
        EntityRefs {
            channel_id: entity_key(self.channel_id.as_ref()),
            user_id: entity_key(self.user_id.as_ref()),
            job_id: None,
        }
    }

    /// 필드 검증 후 명령으로 변환
    /// Validate fields and convert into a command
    ///
    /// 누락 검사를 먼저 끝낸 뒤 타입/형식 검사
    pub fn into_command(self) -> Result<NewReservation, ApiError> {
        let fields = [
            &self.channel_id,
            &self.user_id,
            &self.req_id,
            &self.scheduled_at,
            &self.pickup,
            &self.dropoff,
        ];
        if fields.into_iter().any(is_missing) {
            return Err(ApiError::MissingFields);
        }

        let channel_id = required_str(self.channel_id, "channelId")?;
        let user_id = required_str(self.user_id, "userId")?;
        let req_id = required_str(self.req_id, "reqId")?;
        let scheduled_at = required_str(self.scheduled_at, "scheduledAt")?;
        let pickup = required_point(self.pickup, "pickup")?;
        let dropoff = required_point(self.dropoff, "dropoff")?;

        let scheduled_at = DateTime::parse_from_rfc3339(&scheduled_at)
            .map_err(|e| ApiError::BadRequest(format!("scheduledAt is not RFC 3339: {}", e)))?
            .with_timezone(&Utc);

        Ok(NewReservation {
            req_id,
            user_id,
            channel_id,
            pickup,
            dropoff,
            scheduled_at,
        })
    }
}

/// 예약 응답 (생성 / 재생 / 조회 공통)
/// Reservation response
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub ok: bool,
    pub reservation: Reservation,

    /// 재생된 응답일 때만 `true`로 포함
    /// Present (true) only on replay
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotent: Option<bool>,
}

impl ReservationResponse {
    pub fn found(reservation: Reservation) -> Self {
        Self { ok: true, reservation, idempotent: None }
    }
}

impl From<Replayable<Reservation>> for ReservationResponse {
    fn from(outcome: Replayable<Reservation>) -> Self {
        let idempotent = outcome.is_replay().then_some(true);
        Self {
            ok: true,
            reservation: outcome.into_inner(),
            idempotent,
        }
    }
}

/// reqId 조회 쿼리
/// Lookup-by-reqId query
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationByReqQuery {
    pub req_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_request() -> CreateReservationRequest {
        CreateReservationRequest {
            user_id: Some(json!("DR-01")),
            channel_id: Some(json!("CH-02")),
            pickup: Some(json!({ "lat": 37.5, "lng": 127.0 })),
            dropoff: Some(json!({ "lat": 37.6, "lng": 127.1 })),
            scheduled_at: Some(json!("2025-09-09T10:00:00Z")),
            req_id: Some(json!("REQ-1")),
        }
    }

    #[test]
    fn complete_request_becomes_command() {
        let command = full_request().into_command().unwrap();
        assert_eq!(command.req_id, "REQ-1");
        assert_eq!(command.scheduled_at.to_rfc3339(), "2025-09-09T10:00:00+00:00");
    }

    #[test]
    fn missing_or_empty_fields_are_rejected() {
        let mut request = full_request();
        request.pickup = None;
        assert!(matches!(request.into_command(), Err(ApiError::MissingFields)));

        let mut request = full_request();
        request.req_id = Some(json!(""));
        assert!(matches!(request.into_command(), Err(ApiError::MissingFields)));
    }

    #[test]
    fn malformed_scheduled_at_is_bad_request() {
        let mut request = full_request();
        request.scheduled_at = Some(json!("tomorrow morning"));
        assert!(matches!(request.into_command(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn wrong_types_are_bad_request() {
        let mut request = full_request();
        request.pickup = Some(json!({ "lat": "north", "lng": 1.0 }));
        assert!(matches!(request.into_command(), Err(ApiError::BadRequest(_))));

        let mut request = full_request();
        request.user_id = Some(json!(42));
        assert!(matches!(request.into_command(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn missing_field_wins_over_wrong_type() {
        let mut request = full_request();
        request.pickup = Some(json!("somewhere"));
        request.dropoff = None;
        assert!(matches!(request.into_command(), Err(ApiError::MissingFields)));
    }

    #[test]
    fn entity_refs_survive_wrong_types() {
        let mut request = full_request();
        request.pickup = Some(json!({ "lat": "north" }));
        request.user_id = Some(json!(42));
        let refs = request.entity_refs();
        assert_eq!(refs.channel_id.as_deref(), Some("CH-02"));
        assert_eq!(refs.user_id.as_deref(), Some("42"));
    }

    #[test]
    fn replay_response_carries_flag() {
        let reservation = Reservation {
            reservation_id: "R-1-abcdef12".to_string(),
            req_id: "REQ-1".to_string(),
            user_id: "DR-01".to_string(),
            channel_id: "CH-02".to_string(),
            pickup: LatLng { lat: 0.0, lng: 0.0 },
            dropoff: LatLng { lat: 0.0, lng: 0.0 },
            scheduled_at: Utc::now(),
            created_at: Utc::now(),
        };
        let created = serde_json::to_value(ReservationResponse::from(Replayable::Created(
            reservation.clone(),
        )))
        .unwrap();
        let replayed =
            serde_json::to_value(ReservationResponse::from(Replayable::Replayed(reservation)))
                .unwrap();

        assert!(created.get("idempotent").is_none());
        assert_eq!(replayed["idempotent"], true);
        assert_eq!(replayed["reservation"]["reservationId"], "R-1-abcdef12");
    }
}
