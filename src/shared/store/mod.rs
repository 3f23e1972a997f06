// =====================================================
// Store 추상화
// =====================================================
// 역할: 핸들러/서비스가 사용하는 저장소 인터페이스
// 구현:
// - MemoryStore: 프로세스 내 맵 (테스트, 로컬 데모)
// - PgStore: PostgreSQL (운영)
//
// 전역 상태 없이 AppState에 `Arc<dyn DispatchStore>`로 주입됨
//
// 멱등성 계약:
// - insert_*_if_absent / apply_*_if_absent 는 "확인 + 변경 + 기록"을
//   하나의 원자적 단계로 수행
// - 같은 키로 동시에 들어온 요청 중 정확히 하나만 Created,
//   나머지는 모두 Replayed
// =====================================================

pub mod memory;
pub mod postgres;
pub mod seed;
pub mod snapshot;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use seed::SeedData;
pub use snapshot::{Snapshot, SnapshotTables};

use async_trait::async_trait;
use thiserror::Error;
use crate::domains::entities::{EntityKind, Job};
use crate::domains::reservation::models::Reservation;
use crate::domains::wallet::models::{WalletTx, WalletTxDraft};
use crate::shared::idempotency::{IdempotencyKey, Replayable};

/// 저장소 에러
/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// 잔액 오버플로 (거래 거부, 아무것도 기록되지 않음)
    #[error("Balance overflow for user {user_id}")]
    BalanceOverflow { user_id: String },

    /// 백엔드 장애 (DB 연결 실패 등)
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// 엔티티 존재 조회
/// Entity existence lookup
#[async_trait]
pub trait EntityLookup: Send + Sync {
    async fn exists(&self, kind: EntityKind, key: &str) -> Result<bool, StoreError>;
}

/// 예약 저장소
/// Reservation store keyed by reqId
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn find_reservation(&self, req_id: &str) -> Result<Option<Reservation>, StoreError>;

    /// reqId가 처음이면 저장, 이미 있으면 기존 예약 반환
    /// Insert when `reservation.req_id` is new, otherwise return the stored one
    async fn insert_reservation_if_absent(
        &self,
        reservation: Reservation,
    ) -> Result<Replayable<Reservation>, StoreError>;

    async fn count_reservations(&self) -> Result<u64, StoreError>;
}

/// 지갑 원장
/// Wallet ledger
#[async_trait]
pub trait WalletLedger: Send + Sync {
    async fn find_wallet_tx(&self, key: &IdempotencyKey) -> Result<Option<WalletTx>, StoreError>;

    /// 키가 처음이면 잔액 적용 + 거래 저장, 이미 있으면 기존 거래 반환
    /// Apply the draft exactly once per idempotency key
    async fn apply_wallet_tx_if_absent(
        &self,
        draft: WalletTxDraft,
    ) -> Result<Replayable<WalletTx>, StoreError>;

    /// 잔액 (거래가 없으면 0)
    async fn balance_of(&self, user_id: &str) -> Result<i64, StoreError>;

    async fn count_wallet_txs(&self) -> Result<u64, StoreError>;
}

/// 리포트용 작업 조회
/// Job reads for reporting
#[async_trait]
pub trait JobReports: Send + Sync {
    async fn jobs_in_channel(&self, channel_id: &str) -> Result<Vec<Job>, StoreError>;
}

/// 백업/복원/시드
/// Export, import and seeding
#[async_trait]
pub trait Maintenance: Send + Sync {
    async fn export_snapshot(&self) -> Result<Snapshot, StoreError>;

    /// 기존 데이터를 지우고 스냅샷으로 교체
    /// Replace all data with the snapshot contents
    async fn import_snapshot(&self, snapshot: &Snapshot) -> Result<(), StoreError>;

    /// 참조 엔티티 upsert (삭제 없음)
    /// Upsert reference entities without deleting anything
    async fn apply_seed(&self, seed: &SeedData) -> Result<(), StoreError>;
}

/// 애플리케이션이 주입받는 전체 저장소
/// Everything the application needs from a store
pub trait DispatchStore:
    EntityLookup + ReservationStore + WalletLedger + JobReports + Maintenance
{
}

impl<T> DispatchStore for T where
    T: EntityLookup + ReservationStore + WalletLedger + JobReports + Maintenance
{
}
