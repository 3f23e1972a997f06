// Existence Validator
// 존재 검증기
// 역할: 변경 작업 전에 요청이 참조하는 엔티티(채널/사용자/작업)가 있는지 확인
//
// 규칙:
// - 검사 순서 고정: channel → user → job
// - 처음 실패한 키에서 즉시 중단 (나머지 키는 조회하지 않음)
// - 요청에 없는 키(None/빈 문자열)는 건너뜀 → 필드 검증 단계에서 400 처리
// - 읽기 전용, 부작용 없음

use serde_json::Value;
use crate::domains::entities::EntityKind;
use crate::shared::errors::ApiError;
use crate::shared::store::EntityLookup;

/// 요청에서 추출한 참조 키 묶음
/// Entity keys referenced by a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRefs {
    pub channel_id: Option<String>,
    pub user_id: Option<String>,
    pub job_id: Option<String>,
}

impl EntityRefs {
    /// 검사 순서대로 (종류, 키) 나열, 비어 있는 키는 제외
    /// Supplied keys in check order
    pub fn in_check_order(&self) -> impl Iterator<Item = (EntityKind, &str)> {
        [
            (EntityKind::Channel, self.channel_id.as_deref()),
            (EntityKind::User, self.user_id.as_deref()),
            (EntityKind::Job, self.job_id.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, key)| key.filter(|k| !k.is_empty()).map(|k| (kind, k)))
    }
}

/// 본문 값에서 조회 키 추출 (타입과 무관하게 키로 취급, null은 없음)
/// Lookup key for a raw body value; non-string scalars use their JSON text
pub fn entity_key(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// 엔티티 종류별 404 에러
/// Not-found error tagged with the missing entity
pub fn not_found(kind: EntityKind, key: &str) -> ApiError {
    match kind {
        EntityKind::Channel => ApiError::ChannelNotFound { channel_id: key.to_string() },
        EntityKind::User => ApiError::UserNotFound { user_id: key.to_string() },
        EntityKind::Job => ApiError::JobNotFound { job_id: key.to_string() },
    }
}

/// 존재 검증기
/// Existence validator over any entity lookup
pub struct ExistenceValidator<'a, L: ?Sized> {
    lookup: &'a L,
}

impl<'a, L> ExistenceValidator<'a, L>
where
    L: EntityLookup + ?Sized,
{
    pub fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }

    /// 모든 참조 키 검증 (fail-fast)
    /// Check every supplied key, stopping at the first missing entity
    pub async fn check(&self, refs: &EntityRefs) -> Result<(), ApiError> {
        for (kind, key) in refs.in_check_order() {
            let exists = self.lookup.exists(kind, key).await?;
            if !exists {
                tracing::debug!(entity = %kind, key, "referenced entity not found");
                return Err(not_found(kind, key));
            }
        }
        Ok(())
    }
}
