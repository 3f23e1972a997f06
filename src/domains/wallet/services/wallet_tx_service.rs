use std::sync::Arc;
use chrono::Utc;
use crate::domains::entities::EntityKind;
use crate::domains::validation::{not_found, ExistenceValidator};
use crate::domains::wallet::models::{TxDirection, WalletTx, WalletTxDraft, WalletTxRequest};
use crate::shared::errors::ApiError;
use crate::shared::idempotency::Replayable;
use crate::shared::store::{DispatchStore, EntityLookup, StoreError, WalletLedger};
use crate::shared::utils::WalletTxIdGenerator;

// 지갑 거래 서비스
// WalletTxService: idempotent debit/credit and balance reads
#[derive(Clone)]
pub struct WalletTxService {
    store: Arc<dyn DispatchStore>,
}

impl WalletTxService {
    pub fn new(store: Arc<dyn DispatchStore>) -> Self {
        Self { store }
    }

    pub async fn debit(&self, request: WalletTxRequest) -> Result<Replayable<WalletTx>, ApiError> {
        self.apply(TxDirection::Debit, request).await
    }

    pub async fn credit(&self, request: WalletTxRequest) -> Result<Replayable<WalletTx>, ApiError> {
        self.apply(TxDirection::Credit, request).await
    }

    // 거래 적용 (방향 + txId 멱등)
    // 1. 존재 검증 (channel → user → job)
    // 2. 필드 검증 (필수값 → 금액 → 사유 코드)
    // 3. 키 조회 → 있으면 재생
    // 4. 잔액 반영 + 거래 기록 (하나의 원자적 단계)
    async fn apply(
        &self,
        direction: TxDirection,
        request: WalletTxRequest,
    ) -> Result<Replayable<WalletTx>, ApiError> {
        ExistenceValidator::new(self.store.as_ref())
            .check(&request.entity_refs())
            .await?;

        let command = request.into_command(direction)?;
        let key = command.idempotency_key();

        if let Some(existing) = self.store.find_wallet_tx(&key).await? {
            tracing::info!(key = %key, id = %existing.id, "wallet tx replayed");
            return Ok(Replayable::Replayed(existing));
        }

        let draft = WalletTxDraft {
            id: WalletTxIdGenerator::next(),
            command,
            created_at: Utc::now(),
        };

        let outcome = match self.store.apply_wallet_tx_if_absent(draft).await {
            Ok(outcome) => outcome,
            Err(StoreError::BalanceOverflow { user_id }) => {
                tracing::debug!(key = %key, user_id = %user_id, "wallet tx rejected: balance overflow");
                return Err(ApiError::InvalidAmount);
            }
            Err(e) => return Err(e.into()),
        };

        let tx = outcome.get();
        if outcome.is_replay() {
            tracing::info!(key = %key, id = %tx.id, "wallet tx replayed after concurrent apply");
        } else {
            tracing::info!(
                key = %key,
                id = %tx.id,
                user_id = %tx.user_id,
                signed_amount = tx.signed_amount,
                balance_after = tx.balance_after,
                "wallet tx created"
            );
        }

        Ok(outcome)
    }

    // 잔액 조회 (사용자가 없으면 USER_NOT_FOUND)
    pub async fn balance(&self, user_id: &str) -> Result<i64, ApiError> {
        if !self.store.exists(EntityKind::User, user_id).await? {
            return Err(not_found(EntityKind::User, user_id));
        }

        Ok(self.store.balance_of(user_id).await?)
    }
}
