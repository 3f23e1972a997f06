use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use crate::shared::errors::ApiError;

// =====================================================
// 리포트 모델 (읽기 전용)
// =====================================================

/// 작업 통계 쿼리
/// Jobs stats query
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatsQuery {
    pub channel_id: Option<String>,
}

/// 작업 통계 응답
/// Per-status job counts for one channel
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatsResponse {
    pub ok: bool,
    pub channel_id: String,
    pub total: u64,

    /// 상태 코드 → 개수 (작업이 있는 상태만 포함)
    pub by_status: BTreeMap<String, u64>,
}

/// 정산 보정 방식
/// Adjustment applied to the channel summary amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdjustFilter {
    #[default]
    None,
    /// 기본 금액의 절반 (반올림)
    Manual,
}

impl AdjustFilter {
    /// 보정 적용 (manual: 0.5 단위는 올림)
    pub fn apply(&self, base: i64) -> i64 {
        match self {
            AdjustFilter::None => base,
            AdjustFilter::Manual => {
                let half = base / 2;
                if base % 2 == 0 { half } else if base > 0 { half + 1 } else { half }
            }
        }
    }

    pub fn is_adjusted(&self) -> bool {
        matches!(self, AdjustFilter::Manual)
    }
}

impl FromStr for AdjustFilter {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(AdjustFilter::None),
            "manual" => Ok(AdjustFilter::Manual),
            other => Err(ApiError::BadRequest(format!("Unknown adjustFilter: {}", other))),
        }
    }
}

/// 채널 요약 쿼리
/// Channel summary query
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummaryQuery {
    pub channel_id: Option<String>,
    pub adjust_filter: Option<String>,
}

/// 채널 요약
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelSummary {
    pub jobs: u64,
    pub amount: i64,
    pub adjusted: bool,
}

/// 채널 요약 응답
/// Channel summary response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummaryResponse {
    pub ok: bool,
    pub channel_id: String,
    pub summary: ChannelSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_halves_rounding_half_up() {
        assert_eq!(AdjustFilter::Manual.apply(5000), 2500);
        assert_eq!(AdjustFilter::Manual.apply(5001), 2501);
        assert_eq!(AdjustFilter::Manual.apply(1), 1);
        assert_eq!(AdjustFilter::Manual.apply(0), 0);
        assert_eq!(AdjustFilter::None.apply(5001), 5001);
    }

    #[test]
    fn unknown_filter_is_bad_request() {
        assert_eq!("manual".parse::<AdjustFilter>().unwrap(), AdjustFilter::Manual);
        assert_eq!("none".parse::<AdjustFilter>().unwrap(), AdjustFilter::None);
        let err = "floor".parse::<AdjustFilter>().unwrap_err();
        assert_eq!(err.code(), "BAD_REQUEST");
    }
}
