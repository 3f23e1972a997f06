/// ID 생성기
/// ID Generator
///
/// 역할:
/// - 예약 ID 생성 (Reservation ID, `R-<millis>-<suffix>`)
/// - 지갑 거래 ID 생성 (Wallet transaction ID, `WT-<millis>-<suffix>`)
///
/// suffix는 UUID v4 앞 8자리 → 같은 밀리초에 여러 요청이 와도 겹치지 않음
/// (서버 재시작 후에도 DB 상태와 무관하게 안전)
///
/// 사용 방법:
/// ```rust,ignore
/// let reservation_id = ReservationIdGenerator::next();
/// let wallet_tx_id = WalletTxIdGenerator::next();
/// ```
use chrono::Utc;
use uuid::Uuid;

fn prefixed_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), &suffix[..8])
}

/// 예약 ID 생성기
/// Reservation ID Generator
pub struct ReservationIdGenerator;

impl ReservationIdGenerator {
    pub const PREFIX: &'static str = "R";

    /// 다음 예약 ID 생성
    /// Generate next reservation ID
    pub fn next() -> String {
        prefixed_id(Self::PREFIX)
    }
}

/// 지갑 거래 ID 생성기
/// Wallet transaction ID Generator
pub struct WalletTxIdGenerator;

impl WalletTxIdGenerator {
    pub const PREFIX: &'static str = "WT";

    /// 다음 지갑 거래 ID 생성
    /// Generate next wallet transaction ID
    pub fn next() -> String {
        prefixed_id(Self::PREFIX)
    }
}
