// Reservation domain state
// 예약 도메인 상태
use std::sync::Arc;
use crate::domains::reservation::services::ReservationService;
use crate::shared::store::DispatchStore;

/// Reservation domain state
/// 예약 도메인에서 필요한 서비스들을 포함하는 상태
#[derive(Clone)]
pub struct ReservationState {
    pub reservation_service: ReservationService,
}

impl ReservationState {
    pub fn new(store: Arc<dyn DispatchStore>) -> Self {
        Self {
            reservation_service: ReservationService::new(store),
        }
    }
}
