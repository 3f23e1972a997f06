use serde::{Deserialize, Serialize};
use serde_json::Value;
use chrono::{DateTime, Utc};
use crate::domains::validation::{entity_key, EntityRefs};
use crate::domains::wallet::models::{ReasonCode, TxDirection};
use crate::shared::errors::ApiError;
use crate::shared::idempotency::{IdempotencyKey, Replayable};

// =====================================================
// WalletTx 모델
// =====================================================
// 역할: (방향, txId)당 정확히 한 번 생성되는 지갑 거래
// 규칙:
// - 잔액 변경은 거래 생성과 같은 단계에서 정확히 한 번 적용
// - 같은 txId 재요청은 최초 거래를 그대로 돌려주고 잔액은 변하지 않음
// - balance_after = 직전 잔액 + signed_amount
// =====================================================

/// 지갑 거래 정보
/// Wallet transaction record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTx {
    /// 서버가 생성한 거래 ID (WT-<millis>-<suffix>)
    /// Server-generated transaction ID
    pub id: String,

    /// 멱등성 키 (클라이언트 거래 ID)
    /// Client-supplied idempotency key
    pub tx_id: String,

    pub user_id: String,

    /// DEBIT / CREDIT
    #[serde(rename = "type")]
    pub direction: TxDirection,

    /// 요청 금액 (항상 양수)
    /// Requested amount, always positive
    pub amount: i64,

    /// 잔액에 적용된 부호 있는 금액 (출금은 음수)
    /// Signed effect on the balance (negative for debits)
    pub signed_amount: i64,

    pub reason: ReasonCode,
    pub job_id: String,
    pub channel_id: String,

    /// 거래 적용 후 잔액
    /// Balance right after this transaction was applied
    pub balance_after: i64,

    pub created_at: DateTime<Utc>,
}

impl WalletTx {
    pub fn idempotency_key(&self) -> IdempotencyKey {
        IdempotencyKey::new(self.direction.scope(), self.tx_id.clone())
    }
}

/// 사용자 잔액 (스냅샷/조회용)
/// Per-user wallet balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    pub user_id: String,
    pub balance: i64,
}

// =====================================================
// 요청 / 명령
// =====================================================

/// 지갑 거래 요청 (출금/충전 공통)
/// Wallet debit/credit request
///
/// 필드를 원시 JSON 값으로 받음: 타입 오류가 있어도 존재 검증이 먼저 실행됨
/// amount는 "양의 정수" 검증을 직접 수행
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTxRequest {
    pub user_id: Option<Value>,
    pub amount: Option<Value>,
    pub reason: Option<Value>,
    pub job_id: Option<Value>,
    pub channel_id: Option<Value>,
    pub tx_id: Option<Value>,
}

/// 검증을 통과한 지갑 거래 명령
/// Validated wallet transaction command
#[derive(Debug, Clone)]
pub struct WalletTxCommand {
    pub direction: TxDirection,
    pub tx_id: String,
    pub user_id: String,
    pub amount: i64,
    pub reason: ReasonCode,
    pub job_id: String,
    pub channel_id: String,
}

impl WalletTxCommand {
    pub fn idempotency_key(&self) -> IdempotencyKey {
        IdempotencyKey::new(self.direction.scope(), self.tx_id.clone())
    }
}

/// 저장소에 넘기는 거래 초안 (잔액 계산은 저장소가 원자적으로 수행)
/// Draft handed to the ledger; the ledger computes the balance atomically
#[derive(Debug, Clone)]
pub struct WalletTxDraft {
    pub id: String,
    pub command: WalletTxCommand,
    pub created_at: DateTime<Utc>,
}

impl WalletTxDraft {
    /// 직전 잔액으로 최종 기록 생성
    /// Build the final record from the balance before this transaction
    ///
    /// 오버플로 시 None
    pub fn settle(&self, balance_before: i64) -> Option<WalletTx> {
        let signed_amount = self.command.direction.signed(self.command.amount);
        let balance_after = balance_before.checked_add(signed_amount)?;
        Some(self.record(signed_amount, balance_after))
    }

    /// 키 선점용 기록 (잔액은 포화 연산)
    /// Record used to claim the key before the overflow check
    ///
    /// 오버플로 여부는 `settle`로 따로 확인하고, 오버플로면 커밋하지 않음
    pub fn settle_saturating(&self, balance_before: i64) -> WalletTx {
        let signed_amount = self.command.direction.signed(self.command.amount);
        self.record(signed_amount, balance_before.saturating_add(signed_amount))
    }

    fn record(&self, signed_amount: i64, balance_after: i64) -> WalletTx {
        WalletTx {
            id: self.id.clone(),
            tx_id: self.command.tx_id.clone(),
            user_id: self.command.user_id.clone(),
            direction: self.command.direction,
            amount: self.command.amount,
            signed_amount,
            reason: self.command.reason,
            job_id: self.command.job_id.clone(),
            channel_id: self.command.channel_id.clone(),
            balance_after,
            created_at: self.created_at,
        }
    }
}

fn required(value: Option<Value>, field: &str) -> Result<String, ApiError> {
    match value {
        None | Some(Value::Null) => Err(ApiError::BadRequest(format!("{} required", field))),
        Some(Value::String(s)) if s.is_empty() => {
            Err(ApiError::BadRequest(format!("{} required", field)))
        }
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ApiError::BadRequest(format!("{} must be a string", field))),
    }
}

/// 양의 정수 금액 파싱 (1500, 1500.0 허용 / 0, 음수, 소수, 문자열 거부)
/// Parse a positive integer amount
pub fn parse_amount(value: &Value) -> Result<i64, ApiError> {
    let Value::Number(number) = value else {
        return Err(ApiError::InvalidAmount);
    };
    let amount = if let Some(v) = number.as_i64() {
        v
    } else if let Some(f) = number.as_f64() {
        // 2^53 이하에서만 f64 → i64 변환이 정확함
        if f.fract() != 0.0 || !(1.0..=9_007_199_254_740_992.0).contains(&f) {
            return Err(ApiError::InvalidAmount);
        }
        f as i64
    } else {
        return Err(ApiError::InvalidAmount);
    };
    if amount <= 0 {
        return Err(ApiError::InvalidAmount);
    }
    Ok(amount)
}

impl WalletTxRequest {
    /// 존재 검증 대상 키 (채널 → 사용자 → 작업)
    /// Keys checked by existence validation
    pub fn entity_refs(&self) -> EntityRefs {
        EntityRefs {
            channel_id: entity_key(self.channel_id.as_ref()),
            user_id: entity_key(self.user_id.as_ref()),
            job_id: entity_key(self.job_id.as_ref()),
        }
    }

    /// 필드 검증 후 명령으로 변환
    /// Validate fields and convert into a command
    ///
    /// 순서: 필수값 → 금액 → 사유 코드
    pub fn into_command(self, direction: TxDirection) -> Result<WalletTxCommand, ApiError> {
        let user_id = required(self.user_id, "userId")?;
        let job_id = required(self.job_id, "jobId")?;
        let channel_id = required(self.channel_id, "channelId")?;
        let tx_id = required(self.tx_id, "txId")?;
        let reason = required(self.reason, "reason")?;
        let amount = self
            .amount
            .ok_or_else(|| ApiError::BadRequest("amount required".to_string()))?;

        let amount = parse_amount(&amount)?;

        let reason_code = reason
            .parse::<ReasonCode>()
            .ok()
            .filter(|code| direction.allows(*code))
            .ok_or(ApiError::InvalidReason { reason })?;

        Ok(WalletTxCommand {
            direction,
            tx_id,
            user_id,
            amount,
            reason: reason_code,
            job_id,
            channel_id,
        })
    }
}

// =====================================================
// 응답
// =====================================================

/// 지갑 거래 응답
/// Wallet transaction response
#[derive(Debug, Serialize)]
pub struct WalletTxResponse {
    pub ok: bool,
    pub tx: WalletTx,

    /// 재생된 응답일 때만 `true`로 포함
    /// Present (true) only on replay
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotent: Option<bool>,
}

impl From<Replayable<WalletTx>> for WalletTxResponse {
    fn from(outcome: Replayable<WalletTx>) -> Self {
        let idempotent = outcome.is_replay().then_some(true);
        Self {
            ok: true,
            tx: outcome.into_inner(),
            idempotent,
        }
    }
}

/// 잔액 조회 응답
/// Wallet balance response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalanceResponse {
    pub ok: bool,
    pub user_id: String,
    pub balance: i64,
}
