use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::shared::idempotency::IdempotencyScope;

/// 거래 방향
/// Wallet transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TxDirection {
    /// 출금 (잔액 감소)
    Debit,
    /// 충전 (잔액 증가)
    Credit,
}

impl TxDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxDirection::Debit => "DEBIT",
            TxDirection::Credit => "CREDIT",
        }
    }

    /// 방향별 멱등성 네임스페이스 (출금 키와 충전 키는 충돌하지 않음)
    /// Idempotency namespace per direction
    pub fn scope(&self) -> IdempotencyScope {
        match self {
            TxDirection::Debit => IdempotencyScope::WalletDebit,
            TxDirection::Credit => IdempotencyScope::WalletCredit,
        }
    }

    /// 잔액에 적용되는 부호 있는 금액
    /// Signed effect of `amount` on the balance
    pub fn signed(&self, amount: i64) -> i64 {
        match self {
            TxDirection::Debit => -amount,
            TxDirection::Credit => amount,
        }
    }

    /// 방향별 허용 사유 코드
    /// Reason codes allowed for this direction
    pub fn allowed_reasons(&self) -> &'static [ReasonCode] {
        match self {
            TxDirection::Debit => &[
                ReasonCode::Fee,
                ReasonCode::CancelPenalty,
                ReasonCode::Adjustment,
            ],
            TxDirection::Credit => &[ReasonCode::Payout, ReasonCode::Adjustment],
        }
    }

    pub fn allows(&self, reason: ReasonCode) -> bool {
        self.allowed_reasons().contains(&reason)
    }
}

impl fmt::Display for TxDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEBIT" => Ok(TxDirection::Debit),
            "CREDIT" => Ok(TxDirection::Credit),
            other => Err(format!("unknown direction: {}", other)),
        }
    }
}

/// 거래 사유 코드
/// Reason code of a wallet transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    /// 수수료
    Fee,
    /// 취소 위약금
    CancelPenalty,
    /// 수동 조정
    Adjustment,
    /// 정산 지급
    Payout,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::Fee => "FEE",
            ReasonCode::CancelPenalty => "CANCEL_PENALTY",
            ReasonCode::Adjustment => "ADJUSTMENT",
            ReasonCode::Payout => "PAYOUT",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReasonCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FEE" => Ok(ReasonCode::Fee),
            "CANCEL_PENALTY" => Ok(ReasonCode::CancelPenalty),
            "ADJUSTMENT" => Ok(ReasonCode::Adjustment),
            "PAYOUT" => Ok(ReasonCode::Payout),
            other => Err(format!("unknown reason code: {}", other)),
        }
    }
}
