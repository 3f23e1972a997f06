use std::collections::BTreeMap;
use std::sync::Arc;
use crate::domains::entities::EntityKind;
use crate::domains::report::models::{
    AdjustFilter, ChannelSummary, ChannelSummaryQuery, JobStatsResponse,
};
use crate::domains::validation::not_found;
use crate::shared::errors::ApiError;
use crate::shared::store::{DispatchStore, EntityLookup, JobReports};

// 리포트 서비스 (읽기 전용 집계)
// ReportService: per-channel job aggregates
#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn DispatchStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn DispatchStore>) -> Self {
        Self { store }
    }

    // channelId 필수 + 채널 존재 확인
    async fn require_channel(&self, channel_id: Option<String>) -> Result<String, ApiError> {
        let channel_id = channel_id
            .filter(|v| !v.is_empty())
            .ok_or(ApiError::MissingChannel)?;

        if !self.store.exists(EntityKind::Channel, &channel_id).await? {
            return Err(not_found(EntityKind::Channel, &channel_id));
        }
        Ok(channel_id)
    }

    // 상태별 작업 수
    pub async fn job_stats(&self, channel_id: Option<String>) -> Result<JobStatsResponse, ApiError> {
        let channel_id = self.require_channel(channel_id).await?;
        let jobs = self.store.jobs_in_channel(&channel_id).await?;

        let mut by_status: BTreeMap<String, u64> = BTreeMap::new();
        for job in &jobs {
            *by_status.entry(job.status.to_string()).or_insert(0) += 1;
        }

        Ok(JobStatsResponse {
            ok: true,
            channel_id,
            total: jobs.len() as u64,
            by_status,
        })
    }

    // 채널 요약 (작업 수 + 금액 합계, manual이면 절반)
    pub async fn channel_summary(
        &self,
        query: ChannelSummaryQuery,
    ) -> Result<(String, ChannelSummary), ApiError> {
        let channel_id = self.require_channel(query.channel_id).await?;
        let filter = match query.adjust_filter.as_deref() {
            Some(raw) => raw.parse::<AdjustFilter>()?,
            None => AdjustFilter::default(),
        };

        let jobs = self.store.jobs_in_channel(&channel_id).await?;
        let base = jobs
            .iter()
            .try_fold(0i64, |acc, job| acc.checked_add(job.amount))
            .ok_or_else(|| ApiError::Internal("Channel amount overflow".to_string()))?;

        Ok((
            channel_id,
            ChannelSummary {
                jobs: jobs.len() as u64,
                amount: filter.apply(base),
                adjusted: filter.is_adjusted(),
            },
        ))
    }
}
