use sqlx::{postgres::PgRow, PgPool, Row};
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use crate::domains::wallet::models::{
    ReasonCode, TxDirection, WalletBalance, WalletTx, WalletTxDraft,
};

const WALLET_TX_COLUMNS: &str = "id, tx_id, direction, user_id, amount, signed_amount, \
    reason, job_id, channel_id, balance_after, created_at";

/// 거래 적용 결과
/// Outcome of a single ledger write
#[derive(Debug)]
pub enum ApplyOutcome {
    /// 새 거래 기록 + 잔액 반영 완료
    Created(WalletTx),
    /// 같은 (direction, tx_id)가 이미 있음 → 롤백됨
    Conflict,
    /// 잔액 오버플로 → 롤백됨
    Overflow,
}

/// 지갑 거래 / 잔액 저장소
/// Wallet transaction and balance repository
pub struct WalletTxRepository {
    pool: PgPool,
}

pub(crate) fn row_to_wallet_tx(row: &PgRow) -> Result<WalletTx> {
    let direction: String = row.try_get("direction")?;
    let reason: String = row.try_get("reason")?;
    Ok(WalletTx {
        id: row.try_get("id")?,
        tx_id: row.try_get("tx_id")?,
        user_id: row.try_get("user_id")?,
        direction: direction.parse::<TxDirection>().map_err(|e| anyhow!(e))?,
        amount: row.try_get("amount")?,
        signed_amount: row.try_get("signed_amount")?,
        reason: reason.parse::<ReasonCode>().map_err(|e| anyhow!(e))?,
        job_id: row.try_get("job_id")?,
        channel_id: row.try_get("channel_id")?,
        balance_after: row.try_get("balance_after")?,
        created_at: row.try_get("created_at")?,
    })
}

impl WalletTxRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// (방향, txId)로 거래 조회
    /// Get a transaction by its idempotency key
    pub async fn find(&self, direction: TxDirection, tx_id: &str) -> Result<Option<WalletTx>> {
        let sql = format!(
            "SELECT {} FROM wallet_txs WHERE direction = $1 AND tx_id = $2",
            WALLET_TX_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(direction.as_str())
            .bind(tx_id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch wallet tx")?;

        row.as_ref().map(row_to_wallet_tx).transpose()
    }

    /// 거래 1건을 하나의 트랜잭션으로 적용
    /// Apply one draft inside a single database transaction
    ///
    /// 1. 잔액 행 보장 (없으면 0으로 생성)
    /// 2. 잔액 행 잠금 (SELECT ... FOR UPDATE) → 같은 사용자 거래 직렬화
    /// 3. 거래 INSERT로 키 선점 (UNIQUE(direction, tx_id) 충돌 시 아무것도 안 함)
    /// 4. 오버플로 확인
    /// 5. 잔액 UPDATE 후 커밋
    ///
    /// 충돌 판정이 오버플로보다 먼저: 이미 기록된 키는 항상 재생
    /// 충돌/오버플로 시 롤백하므로 잔액은 변하지 않음
    pub async fn apply_if_absent(&self, draft: &WalletTxDraft) -> Result<ApplyOutcome> {
        let command = &draft.command;
        let mut tx = self.pool.begin().await
            .context("Failed to begin transaction")?;

        sqlx::query(
            r#"
            INSERT INTO wallet_balances (user_id, balance, updated_at)
            VALUES ($1, 0, $2)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(&command.user_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .context("Failed to ensure wallet balance row")?;

        let row = sqlx::query("SELECT balance FROM wallet_balances WHERE user_id = $1 FOR UPDATE")
            .bind(&command.user_id)
            .fetch_one(&mut *tx)
            .await
            .context("Failed to lock wallet balance")?;
        let before: i64 = row.try_get("balance")?;

        let overflowed = draft.settle(before).is_none();
        let settled = draft.settle_saturating(before);

        let sql = format!(
            r#"
            INSERT INTO wallet_txs ({cols})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (direction, tx_id) DO NOTHING
            RETURNING {cols}
            "#,
            cols = WALLET_TX_COLUMNS
        );
        let inserted = sqlx::query(&sql)
            .bind(&settled.id)
            .bind(&settled.tx_id)
            .bind(settled.direction.as_str())
            .bind(&settled.user_id)
            .bind(settled.amount)
            .bind(settled.signed_amount)
            .bind(settled.reason.as_str())
            .bind(&settled.job_id)
            .bind(&settled.channel_id)
            .bind(settled.balance_after)
            .bind(settled.created_at)
            .fetch_optional(&mut *tx)
            .await
            .context("Failed to insert wallet tx")?;

        let Some(inserted) = inserted else {
            tx.rollback().await.context("Failed to rollback transaction")?;
            return Ok(ApplyOutcome::Conflict);
        };
        if overflowed {
            tx.rollback().await.context("Failed to rollback transaction")?;
            return Ok(ApplyOutcome::Overflow);
        }
        let created = row_to_wallet_tx(&inserted)?;

        sqlx::query("UPDATE wallet_balances SET balance = $1, updated_at = $2 WHERE user_id = $3")
            .bind(created.balance_after)
            .bind(Utc::now())
            .bind(&created.user_id)
            .execute(&mut *tx)
            .await
            .context("Failed to update wallet balance")?;

        tx.commit().await
            .context("Failed to commit transaction")?;

        Ok(ApplyOutcome::Created(created))
    }

    /// 잔액 조회 (행이 없으면 0)
    pub async fn balance_of(&self, user_id: &str) -> Result<i64> {
        let row = sqlx::query("SELECT balance FROM wallet_balances WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch wallet balance")?;

        match row {
            Some(row) => Ok(row.try_get("balance")?),
            None => Ok(0),
        }
    }

    pub async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM wallet_txs")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count wallet txs")?;

        Ok(row.try_get::<i64, _>("count")? as u64)
    }

    pub async fn get_all(&self) -> Result<Vec<WalletTx>> {
        let sql = format!(
            "SELECT {} FROM wallet_txs ORDER BY created_at ASC, id ASC",
            WALLET_TX_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch wallet txs")?;

        rows.iter().map(row_to_wallet_tx).collect()
    }

    pub async fn get_all_balances(&self) -> Result<Vec<WalletBalance>> {
        let rows = sqlx::query("SELECT user_id, balance FROM wallet_balances ORDER BY user_id ASC")
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch wallet balances")?;

        rows.iter()
            .map(|row| -> Result<WalletBalance> {
                Ok(WalletBalance {
                    user_id: row.try_get("user_id")?,
                    balance: row.try_get("balance")?,
                })
            })
            .collect()
    }
}
