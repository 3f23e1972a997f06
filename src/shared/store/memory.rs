use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use crate::domains::entities::{Channel, EntityKind, Job, User};
use crate::domains::reservation::models::Reservation;
use crate::domains::wallet::models::{WalletBalance, WalletTx, WalletTxDraft};
use crate::shared::idempotency::{IdempotencyKey, IdempotencyMap, IdempotencyScope, Replayable};
use crate::shared::store::{
    EntityLookup, JobReports, Maintenance, ReservationStore, SeedData, Snapshot, SnapshotTables,
    StoreError, WalletLedger,
};

#[derive(Default)]
struct MemoryTables {
    channels: BTreeMap<String, Channel>,
    users: BTreeMap<String, User>,
    jobs: BTreeMap<String, Job>,
    reservations: IdempotencyMap<Reservation>,
    wallet_txs: IdempotencyMap<WalletTx>,
    balances: BTreeMap<String, i64>,
}

impl MemoryTables {
    fn upsert_seed(&mut self, seed: &SeedData) {
        for channel in &seed.channels {
            self.channels.insert(channel.channel_id.clone(), channel.clone());
        }
        for user in &seed.users {
            self.users.insert(user.user_id.clone(), user.clone());
        }
        for job in &seed.jobs {
            self.jobs.insert(job.job_id.clone(), job.clone());
        }
    }
}

/// 인메모리 저장소 (재시작 시 초기화)
/// In-process store, reset on restart
///
/// 모든 연산은 하나의 Mutex 안에서 수행됨 → 멱등성 키의 확인/변경/기록이
/// 하나의 임계 구역으로 묶임. await 지점에서 락을 잡고 있지 않음.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<MemoryTables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 시드 데이터로 초기화된 저장소
    /// Store pre-populated with `seed`
    pub fn seeded(seed: &SeedData) -> Self {
        let store = Self::new();
        store.tables.lock().upsert_seed(seed);
        store
    }

    /// 로컬 데모용 저장소
    pub fn demo() -> Self {
        Self::seeded(&SeedData::demo())
    }
}

#[async_trait]
impl EntityLookup for MemoryStore {
    async fn exists(&self, kind: EntityKind, key: &str) -> Result<bool, StoreError> {
        let tables = self.tables.lock();
        Ok(match kind {
            EntityKind::Channel => tables.channels.contains_key(key),
            EntityKind::User => tables.users.contains_key(key),
            EntityKind::Job => tables.jobs.contains_key(key),
        })
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn find_reservation(&self, req_id: &str) -> Result<Option<Reservation>, StoreError> {
        let key = IdempotencyKey::new(IdempotencyScope::Reservation, req_id);
        Ok(self.tables.lock().reservations.lookup(&key).cloned())
    }

    async fn insert_reservation_if_absent(
        &self,
        reservation: Reservation,
    ) -> Result<Replayable<Reservation>, StoreError> {
        let key = IdempotencyKey::new(IdempotencyScope::Reservation, reservation.req_id.clone());
        self.tables
            .lock()
            .reservations
            .insert_if_absent(key, || Ok(reservation))
    }

    async fn count_reservations(&self) -> Result<u64, StoreError> {
        Ok(self.tables.lock().reservations.len() as u64)
    }
}

#[async_trait]
impl WalletLedger for MemoryStore {
    async fn find_wallet_tx(&self, key: &IdempotencyKey) -> Result<Option<WalletTx>, StoreError> {
        Ok(self.tables.lock().wallet_txs.lookup(key).cloned())
    }

    async fn apply_wallet_tx_if_absent(
        &self,
        draft: WalletTxDraft,
    ) -> Result<Replayable<WalletTx>, StoreError> {
        let mut guard = self.tables.lock();
        let MemoryTables { wallet_txs, balances, .. } = &mut *guard;

        let key = draft.command.idempotency_key();
        let user_id = draft.command.user_id.clone();
        wallet_txs.insert_if_absent(key, || {
            let before = balances.get(&user_id).copied().unwrap_or(0);
            let tx = draft
                .settle(before)
                .ok_or_else(|| StoreError::BalanceOverflow { user_id: user_id.clone() })?;
            balances.insert(user_id.clone(), tx.balance_after);
            Ok(tx)
        })
    }

    async fn balance_of(&self, user_id: &str) -> Result<i64, StoreError> {
        Ok(self.tables.lock().balances.get(user_id).copied().unwrap_or(0))
    }

    async fn count_wallet_txs(&self) -> Result<u64, StoreError> {
        Ok(self.tables.lock().wallet_txs.len() as u64)
    }
}

#[async_trait]
impl JobReports for MemoryStore {
    async fn jobs_in_channel(&self, channel_id: &str) -> Result<Vec<Job>, StoreError> {
        let tables = self.tables.lock();
        Ok(tables
            .jobs
            .values()
            .filter(|job| job.channel_id == channel_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Maintenance for MemoryStore {
    async fn export_snapshot(&self) -> Result<Snapshot, StoreError> {
        let tables = self.tables.lock();

        let mut reservations: Vec<Reservation> = tables.reservations.values().cloned().collect();
        reservations.sort_by(|a, b| {
            (a.created_at, &a.reservation_id).cmp(&(b.created_at, &b.reservation_id))
        });
        let mut wallet_txs: Vec<WalletTx> = tables.wallet_txs.values().cloned().collect();
        wallet_txs.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));

        Ok(Snapshot {
            exported_at: Utc::now(),
            dialect: "memory".to_string(),
            tables: SnapshotTables {
                channels: tables.channels.values().cloned().collect(),
                users: tables.users.values().cloned().collect(),
                jobs: tables.jobs.values().cloned().collect(),
                reservations,
                wallet_txs,
                wallet_balances: tables
                    .balances
                    .iter()
                    .map(|(user_id, balance)| WalletBalance {
                        user_id: user_id.clone(),
                        balance: *balance,
                    })
                    .collect(),
            },
        })
    }

    async fn import_snapshot(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let data = &snapshot.tables;
        let mut restored = MemoryTables::default();
        restored.upsert_seed(&SeedData {
            channels: data.channels.clone(),
            users: data.users.clone(),
            jobs: data.jobs.clone(),
        });
        for reservation in &data.reservations {
            let key =
                IdempotencyKey::new(IdempotencyScope::Reservation, reservation.req_id.clone());
            restored.reservations.restore(key, reservation.clone());
        }
        for tx in &data.wallet_txs {
            restored.wallet_txs.restore(tx.idempotency_key(), tx.clone());
        }
        for balance in &data.wallet_balances {
            restored.balances.insert(balance.user_id.clone(), balance.balance);
        }

        *self.tables.lock() = restored;
        Ok(())
    }

    async fn apply_seed(&self, seed: &SeedData) -> Result<(), StoreError> {
        self.tables.lock().upsert_seed(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::wallet::models::{ReasonCode, TxDirection, WalletTxCommand};

    fn draft(tx_id: &str, direction: TxDirection, amount: i64) -> WalletTxDraft {
        WalletTxDraft {
            id: format!("WT-{}", tx_id),
            command: WalletTxCommand {
                direction,
                tx_id: tx_id.to_string(),
                user_id: "DR-01".to_string(),
                amount,
                reason: ReasonCode::Adjustment,
                job_id: "J0901".to_string(),
                channel_id: "CH-02".to_string(),
            },
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn demo_store_knows_seed_entities() {
        let store = MemoryStore::demo();
        assert!(store.exists(EntityKind::User, "DR-01").await.unwrap());
        assert!(store.exists(EntityKind::Channel, "CH-02").await.unwrap());
        assert!(store.exists(EntityKind::Job, "J0901").await.unwrap());
        assert!(!store.exists(EntityKind::Job, "DR-01").await.unwrap());
    }

    #[tokio::test]
    async fn balance_is_initial_plus_accepted_signed_amounts() {
        let store = MemoryStore::demo();
        store.apply_wallet_tx_if_absent(draft("TX-1", TxDirection::Credit, 5000)).await.unwrap();
        store.apply_wallet_tx_if_absent(draft("TX-2", TxDirection::Debit, 1500)).await.unwrap();
        // 같은 키 재적용 → 잔액 변화 없음
        let replay = store
            .apply_wallet_tx_if_absent(draft("TX-2", TxDirection::Debit, 1500))
            .await
            .unwrap();

        assert!(replay.is_replay());
        assert_eq!(replay.get().balance_after, 3500);
        assert_eq!(store.balance_of("DR-01").await.unwrap(), 3500);
        assert_eq!(store.count_wallet_txs().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn overflow_records_nothing() {
        let store = MemoryStore::demo();
        store
            .apply_wallet_tx_if_absent(draft("TX-MAX", TxDirection::Credit, i64::MAX))
            .await
            .unwrap();
        let err = store
            .apply_wallet_tx_if_absent(draft("TX-OVER", TxDirection::Credit, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::BalanceOverflow { .. }));
        assert_eq!(store.count_wallet_txs().await.unwrap(), 1);
        assert_eq!(store.balance_of("DR-01").await.unwrap(), i64::MAX);
    }

    #[tokio::test]
    async fn snapshot_restores_into_fresh_store() {
        let source = MemoryStore::demo();
        source.apply_wallet_tx_if_absent(draft("TX-1", TxDirection::Credit, 700)).await.unwrap();
        let snapshot = source.export_snapshot().await.unwrap();

        let target = MemoryStore::new();
        target.import_snapshot(&snapshot).await.unwrap();

        assert!(target.exists(EntityKind::Channel, "CH-01").await.unwrap());
        assert_eq!(target.balance_of("DR-01").await.unwrap(), 700);
        // 복원된 키는 계속 멱등성 보호를 받음
        let replay = target
            .apply_wallet_tx_if_absent(draft("TX-1", TxDirection::Credit, 700))
            .await
            .unwrap();
        assert!(replay.is_replay());
        assert_eq!(target.balance_of("DR-01").await.unwrap(), 700);
    }
}
