use sqlx::{postgres::PgRow, PgPool, Row};
use anyhow::{anyhow, Context, Result};
use crate::domains::entities::{Channel, EntityKind, Job, JobStatus, User};

/// 참조 엔티티 저장소 (channels / users / jobs)
/// Reference entity repository
pub struct EntityRepository {
    pool: PgPool,
}

pub(crate) fn row_to_job(row: &PgRow) -> Result<Job> {
    let status: String = row.try_get("status")?;
    Ok(Job {
        job_id: row.try_get("job_id")?,
        channel_id: row.try_get("channel_id")?,
        user_id: row.try_get("user_id")?,
        amount: row.try_get("amount")?,
        status: status.parse::<JobStatus>().map_err(|e| anyhow!(e))?,
        created_at: row.try_get("created_at")?,
    })
}

impl EntityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 키 존재 여부
    /// Whether an entity with `key` exists
    ///
    /// 테이블/컬럼 이름은 EntityKind의 고정 매핑에서만 옴 (사용자 입력은 bind)
    pub async fn exists(&self, kind: EntityKind, key: &str) -> Result<bool> {
        let (table, column) = kind.table();
        let sql = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE {} = $1) AS found", table, column);
        let row = sqlx::query(&sql)
            .bind(key)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("Failed to check {} existence", kind))?;

        Ok(row.try_get("found")?)
    }

    /// 채널의 모든 작업 조회
    /// Get all jobs of a channel
    pub async fn get_jobs_by_channel(&self, channel_id: &str) -> Result<Vec<Job>> {
        let rows = sqlx::query(
            r#"
            SELECT job_id, channel_id, user_id, amount, status, created_at
            FROM jobs
            WHERE channel_id = $1
            ORDER BY job_id ASC
            "#,
        )
        .bind(channel_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch jobs by channel")?;

        rows.iter().map(row_to_job).collect()
    }

    pub async fn get_all_channels(&self) -> Result<Vec<Channel>> {
        let rows = sqlx::query("SELECT channel_id, name FROM channels ORDER BY channel_id ASC")
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch channels")?;

        rows.iter()
            .map(|row| -> Result<Channel> {
                Ok(Channel {
                    channel_id: row.try_get("channel_id")?,
                    name: row.try_get("name")?,
                })
            })
            .collect()
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query("SELECT user_id, name FROM users ORDER BY user_id ASC")
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch users")?;

        rows.iter()
            .map(|row| -> Result<User> {
                Ok(User {
                    user_id: row.try_get("user_id")?,
                    name: row.try_get("name")?,
                })
            })
            .collect()
    }

    pub async fn get_all_jobs(&self) -> Result<Vec<Job>> {
        let rows = sqlx::query(
            r#"
            SELECT job_id, channel_id, user_id, amount, status, created_at
            FROM jobs
            ORDER BY job_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch jobs")?;

        rows.iter().map(row_to_job).collect()
    }
}
