use sqlx::{PgConnection, PgPool};
use anyhow::{Context, Result};
use chrono::Utc;
use crate::domains::entities::{Channel, Job, User};
use crate::shared::store::{SeedData, SnapshotTables};

/// 백업 복원 / 시드 저장소
/// Snapshot import and seeding
pub struct SnapshotRepository {
    pool: PgPool,
}

impl SnapshotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 전체 교체 복원 (하나의 트랜잭션)
    /// Replace every table with `tables`, all-or-nothing
    ///
    /// TRUNCATE 후 FK 의존 순서대로 삽입:
    /// channels → users → jobs → reservations → wallet_txs → wallet_balances
    pub async fn import(&self, tables: &SnapshotTables) -> Result<()> {
        let mut tx = self.pool.begin().await
            .context("Failed to begin transaction")?;

        sqlx::query(
            "TRUNCATE TABLE wallet_balances, wallet_txs, reservations, jobs, users, channels",
        )
        .execute(&mut *tx)
        .await
        .context("Failed to truncate tables")?;

        for channel in &tables.channels {
            upsert_channel(&mut *tx, channel).await?;
        }
        for user in &tables.users {
            upsert_user(&mut *tx, user).await?;
        }
        for job in &tables.jobs {
            upsert_job(&mut *tx, job).await?;
        }

        for r in &tables.reservations {
            sqlx::query(
                r#"
                INSERT INTO reservations (
                    reservation_id, req_id, user_id, channel_id,
                    pickup_lat, pickup_lng, dropoff_lat, dropoff_lng,
                    scheduled_at, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(&r.reservation_id)
            .bind(&r.req_id)
            .bind(&r.user_id)
            .bind(&r.channel_id)
            .bind(r.pickup.lat)
            .bind(r.pickup.lng)
            .bind(r.dropoff.lat)
            .bind(r.dropoff.lng)
            .bind(r.scheduled_at)
            .bind(r.created_at)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert reservation {}", r.reservation_id))?;
        }

        for t in &tables.wallet_txs {
            sqlx::query(
                r#"
                INSERT INTO wallet_txs (
                    id, tx_id, direction, user_id, amount, signed_amount,
                    reason, job_id, channel_id, balance_after, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(&t.id)
            .bind(&t.tx_id)
            .bind(t.direction.as_str())
            .bind(&t.user_id)
            .bind(t.amount)
            .bind(t.signed_amount)
            .bind(t.reason.as_str())
            .bind(&t.job_id)
            .bind(&t.channel_id)
            .bind(t.balance_after)
            .bind(t.created_at)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert wallet tx {}", t.id))?;
        }

        let now = Utc::now();
        for b in &tables.wallet_balances {
            sqlx::query(
                "INSERT INTO wallet_balances (user_id, balance, updated_at) VALUES ($1, $2, $3)",
            )
            .bind(&b.user_id)
            .bind(b.balance)
            .bind(now)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert wallet balance for {}", b.user_id))?;
        }

        tx.commit().await
            .context("Failed to commit transaction")?;

        Ok(())
    }

    /// 참조 엔티티 upsert (기존 예약/거래는 유지)
    /// Upsert reference entities, keeping reservations and transactions
    pub async fn apply_seed(&self, seed: &SeedData) -> Result<()> {
        let mut tx = self.pool.begin().await
            .context("Failed to begin transaction")?;

        for channel in &seed.channels {
            upsert_channel(&mut *tx, channel).await?;
        }
        for user in &seed.users {
            upsert_user(&mut *tx, user).await?;
        }
        for job in &seed.jobs {
            upsert_job(&mut *tx, job).await?;
        }

        tx.commit().await
            .context("Failed to commit transaction")?;

        Ok(())
    }
}

async fn upsert_channel(conn: &mut PgConnection, channel: &Channel) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO channels (channel_id, name)
        VALUES ($1, $2)
        ON CONFLICT (channel_id) DO UPDATE SET name = EXCLUDED.name
        "#,
    )
    .bind(&channel.channel_id)
    .bind(&channel.name)
    .execute(conn)
    .await
    .with_context(|| format!("Failed to upsert channel {}", channel.channel_id))?;
    Ok(())
}

async fn upsert_user(conn: &mut PgConnection, user: &User) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (user_id, name)
        VALUES ($1, $2)
        ON CONFLICT (user_id) DO UPDATE SET name = EXCLUDED.name
        "#,
    )
    .bind(&user.user_id)
    .bind(&user.name)
    .execute(conn)
    .await
    .with_context(|| format!("Failed to upsert user {}", user.user_id))?;
    Ok(())
}

async fn upsert_job(conn: &mut PgConnection, job: &Job) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO jobs (job_id, channel_id, user_id, amount, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (job_id) DO UPDATE SET
            channel_id = EXCLUDED.channel_id,
            user_id = EXCLUDED.user_id,
            amount = EXCLUDED.amount,
            status = EXCLUDED.status
        "#,
    )
    .bind(&job.job_id)
    .bind(&job.channel_id)
    .bind(&job.user_id)
    .bind(job.amount)
    .bind(job.status.as_str())
    .bind(job.created_at)
    .execute(conn)
    .await
    .with_context(|| format!("Failed to upsert job {}", job.job_id))?;
    Ok(())
}
