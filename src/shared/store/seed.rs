use chrono::Utc;
use crate::domains::entities::{Channel, Job, JobStatus, User};

/// 시드 데이터 (참조 엔티티만)
/// Seed data: reference entities only
///
/// 테이블 매핑은 EntityKind::table()로 고정 → 런타임 스키마 탐색 없음
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub channels: Vec<Channel>,
    pub users: Vec<User>,
    pub jobs: Vec<Job>,
}

impl SeedData {
    /// 로컬/데모용 기본 데이터
    /// Demo data for local runs and tests
    ///
    /// - 기사: DR-01
    /// - 채널: CH-01, CH-02
    /// - 작업: J0901 (CH-02, 완료, 5000), J1100~J1104 (CH-01)
    pub fn demo() -> Self {
        let now = Utc::now();

        let channels = vec![
            Channel { channel_id: "CH-01".to_string(), name: Some("Main Channel".to_string()) },
            Channel { channel_id: "CH-02".to_string(), name: Some("Demo Channel".to_string()) },
        ];
        let users = vec![User { user_id: "DR-01".to_string(), name: Some("Demo Driver".to_string()) }];

        let mut jobs = vec![Job {
            job_id: "J0901".to_string(),
            channel_id: "CH-02".to_string(),
            user_id: Some("DR-01".to_string()),
            amount: 5000,
            status: JobStatus::Completed,
            created_at: now,
        }];
        let ch01_jobs = [
            ("J1100", JobStatus::Pending),
            ("J1101", JobStatus::Dispatched),
            ("J1102", JobStatus::InProgress),
            ("J1103", JobStatus::Pending),
            ("J1104", JobStatus::Pending),
        ];
        jobs.extend(ch01_jobs.into_iter().map(|(job_id, status)| Job {
            job_id: job_id.to_string(),
            channel_id: "CH-01".to_string(),
            user_id: None,
            amount: 0,
            status,
            created_at: now,
        }));

        Self { channels, users, jobs }
    }
}
