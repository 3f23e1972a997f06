use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

// =====================================================
// 참조 엔티티 (User / Channel / Job)
// =====================================================
// 역할: 시드/임포트로 채워지는 읽기 전용 엔티티
// 코어 입장에서는 존재 여부(있음/없음)만 중요하고,
// Job은 리포트(통계/요약)에서 채널·상태·금액을 읽음
// =====================================================

/// 사용자 (기사)
/// User (driver)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// 채널 (호출 채널)
/// Dispatch channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub channel_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// 작업 (배차 건)
/// Dispatch job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub job_id: String,
    pub channel_id: String,

    /// 배정된 기사 (없을 수 있음)
    /// Assigned driver, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// 작업 금액 (원 단위 정수)
    /// Job amount in whole currency units
    #[serde(default)]
    pub amount: i64,

    pub status: JobStatus,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// 작업 상태
/// Job status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Dispatched,
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Dispatched => "DISPATCHED",
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(JobStatus::Pending),
            "DISPATCHED" => Ok(JobStatus::Dispatched),
            "IN_PROGRESS" => Ok(JobStatus::InProgress),
            "COMPLETED" => Ok(JobStatus::Completed),
            "CANCELLED" => Ok(JobStatus::Cancelled),
            other => Err(format!("unknown job status: {}", other)),
        }
    }
}

/// 존재 검증 대상 엔티티 종류
/// Entity kinds checked by existence validation
///
/// 테이블/키 컬럼 매핑은 컴파일 타임에 고정 (런타임 스키마 탐색 없음)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Channel,
    User,
    Job,
}

impl EntityKind {
    /// (테이블, 키 컬럼)
    /// (table, key column)
    pub fn table(&self) -> (&'static str, &'static str) {
        match self {
            EntityKind::Channel => ("channels", "channel_id"),
            EntityKind::User => ("users", "user_id"),
            EntityKind::Job => ("jobs", "job_id"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Channel => "channel",
            EntityKind::User => "user",
            EntityKind::Job => "job",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
