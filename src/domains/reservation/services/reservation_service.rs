use std::sync::Arc;
use chrono::Utc;
use crate::domains::reservation::models::{CreateReservationRequest, Reservation};
use crate::domains::validation::ExistenceValidator;
use crate::shared::errors::ApiError;
use crate::shared::idempotency::Replayable;
use crate::shared::store::{DispatchStore, ReservationStore};
use crate::shared::utils::ReservationIdGenerator;

// 예약 서비스
// ReservationService: idempotent reservation creation and lookup
#[derive(Clone)]
pub struct ReservationService {
    store: Arc<dyn DispatchStore>,
}

impl ReservationService {
    pub fn new(store: Arc<dyn DispatchStore>) -> Self {
        Self { store }
    }

    // 예약 생성 (reqId 멱등)
    // 1. 존재 검증 (channel → user)
    // 2. 필드 검증
    // 3. reqId 조회 → 있으면 재생
    // 4. 저장 (동시 요청이 먼저 저장했으면 그 결과를 재생)
    pub async fn create_reservation(
        &self,
        request: CreateReservationRequest,
    ) -> Result<Replayable<Reservation>, ApiError> {
        ExistenceValidator::new(self.store.as_ref())
            .check(&request.entity_refs())
            .await?;

        let command = request.into_command()?;

        if let Some(existing) = self.store.find_reservation(&command.req_id).await? {
            tracing::info!(
                req_id = %existing.req_id,
                reservation_id = %existing.reservation_id,
                "reservation replayed"
            );
            return Ok(Replayable::Replayed(existing));
        }

        let reservation = command.into_reservation(ReservationIdGenerator::next(), Utc::now());
        let outcome = self.store.insert_reservation_if_absent(reservation).await?;

        let stored = outcome.get();
        if outcome.is_replay() {
            tracing::info!(
                req_id = %stored.req_id,
                reservation_id = %stored.reservation_id,
                "reservation replayed after concurrent insert"
            );
        } else {
            tracing::info!(
                req_id = %stored.req_id,
                reservation_id = %stored.reservation_id,
                channel_id = %stored.channel_id,
                "reservation created"
            );
        }

        Ok(outcome)
    }

    // reqId로 조회
    pub async fn get_by_req_id(&self, req_id: Option<String>) -> Result<Reservation, ApiError> {
        let req_id = req_id
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::BadRequest("reqId required".to_string()))?;

        self.store
            .find_reservation(&req_id)
            .await?
            .ok_or(ApiError::ReservationNotFound { req_id })
    }
}
