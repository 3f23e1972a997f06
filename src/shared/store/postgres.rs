use async_trait::async_trait;
use anyhow::anyhow;
use chrono::Utc;
use crate::domains::entities::{EntityKind, Job};
use crate::domains::reservation::models::Reservation;
use crate::domains::wallet::models::{TxDirection, WalletTx, WalletTxDraft};
use crate::shared::database::{
    ApplyOutcome, Database, EntityRepository, ReservationRepository, SnapshotRepository,
    WalletTxRepository,
};
use crate::shared::idempotency::{IdempotencyKey, IdempotencyScope, Replayable};
use crate::shared::store::{
    EntityLookup, JobReports, Maintenance, ReservationStore, SeedData, Snapshot, SnapshotTables,
    StoreError, WalletLedger,
};

/// PostgreSQL 저장소
/// PostgreSQL-backed store
///
/// 멱등성은 DB 제약으로 보장:
/// - reservations.req_id UNIQUE
/// - wallet_txs (direction, tx_id) UNIQUE
/// 충돌 시 기존 행을 다시 읽어 Replayed로 반환
#[derive(Clone)]
pub struct PgStore {
    db: Database,
}

impl PgStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn entities(&self) -> EntityRepository {
        EntityRepository::new(self.db.pool().clone())
    }

    fn reservations(&self) -> ReservationRepository {
        ReservationRepository::new(self.db.pool().clone())
    }

    fn wallet_txs(&self) -> WalletTxRepository {
        WalletTxRepository::new(self.db.pool().clone())
    }

    fn snapshots(&self) -> SnapshotRepository {
        SnapshotRepository::new(self.db.pool().clone())
    }
}

fn direction_of(scope: IdempotencyScope) -> Option<TxDirection> {
    match scope {
        IdempotencyScope::WalletDebit => Some(TxDirection::Debit),
        IdempotencyScope::WalletCredit => Some(TxDirection::Credit),
        IdempotencyScope::Reservation => None,
    }
}

#[async_trait]
impl EntityLookup for PgStore {
    async fn exists(&self, kind: EntityKind, key: &str) -> Result<bool, StoreError> {
        Ok(self.entities().exists(kind, key).await?)
    }
}

#[async_trait]
impl ReservationStore for PgStore {
    async fn find_reservation(&self, req_id: &str) -> Result<Option<Reservation>, StoreError> {
        Ok(self.reservations().get_by_req_id(req_id).await?)
    }

    async fn insert_reservation_if_absent(
        &self,
        reservation: Reservation,
    ) -> Result<Replayable<Reservation>, StoreError> {
        let repo = self.reservations();
        if let Some(created) = repo.insert_if_absent(&reservation).await? {
            return Ok(Replayable::Created(created));
        }

        // 동시 요청이 먼저 커밋함 → 그 예약을 그대로 돌려줌
        repo.get_by_req_id(&reservation.req_id)
            .await?
            .map(Replayable::Replayed)
            .ok_or_else(|| {
                StoreError::Backend(anyhow!(
                    "Reservation {} conflicted but could not be read back",
                    reservation.req_id
                ))
            })
    }

    async fn count_reservations(&self) -> Result<u64, StoreError> {
        Ok(self.reservations().count().await?)
    }
}

#[async_trait]
impl WalletLedger for PgStore {
    async fn find_wallet_tx(&self, key: &IdempotencyKey) -> Result<Option<WalletTx>, StoreError> {
        let Some(direction) = direction_of(key.scope) else {
            return Ok(None);
        };
        Ok(self.wallet_txs().find(direction, &key.key).await?)
    }

    async fn apply_wallet_tx_if_absent(
        &self,
        draft: WalletTxDraft,
    ) -> Result<Replayable<WalletTx>, StoreError> {
        let repo = self.wallet_txs();
        let command = &draft.command;

        match repo.apply_if_absent(&draft).await? {
            ApplyOutcome::Created(tx) => Ok(Replayable::Created(tx)),
            ApplyOutcome::Overflow => Err(StoreError::BalanceOverflow {
                user_id: command.user_id.clone(),
            }),
            ApplyOutcome::Conflict => repo
                .find(command.direction, &command.tx_id)
                .await?
                .map(Replayable::Replayed)
                .ok_or_else(|| {
                    StoreError::Backend(anyhow!(
                        "Wallet tx {} conflicted but could not be read back",
                        command.tx_id
                    ))
                }),
        }
    }

    async fn balance_of(&self, user_id: &str) -> Result<i64, StoreError> {
        Ok(self.wallet_txs().balance_of(user_id).await?)
    }

    async fn count_wallet_txs(&self) -> Result<u64, StoreError> {
        Ok(self.wallet_txs().count().await?)
    }
}

#[async_trait]
impl JobReports for PgStore {
    async fn jobs_in_channel(&self, channel_id: &str) -> Result<Vec<Job>, StoreError> {
        Ok(self.entities().get_jobs_by_channel(channel_id).await?)
    }
}

#[async_trait]
impl Maintenance for PgStore {
    async fn export_snapshot(&self) -> Result<Snapshot, StoreError> {
        let entities = self.entities();
        let wallet = self.wallet_txs();

        Ok(Snapshot {
            exported_at: Utc::now(),
            dialect: "postgres".to_string(),
            tables: SnapshotTables {
                channels: entities.get_all_channels().await?,
                users: entities.get_all_users().await?,
                jobs: entities.get_all_jobs().await?,
                reservations: self.reservations().get_all().await?,
                wallet_txs: wallet.get_all().await?,
                wallet_balances: wallet.get_all_balances().await?,
            },
        })
    }

    async fn import_snapshot(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        Ok(self.snapshots().import(&snapshot.tables).await?)
    }

    async fn apply_seed(&self, seed: &SeedData) -> Result<(), StoreError> {
        Ok(self.snapshots().apply_seed(seed).await?)
    }
}
