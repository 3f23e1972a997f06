/// 공유 유틸리티 모듈
/// Shared Utilities Module
///
/// 역할:
/// - ID 생성기 (Reservation, WalletTx)
pub mod id_generator;

pub use id_generator::*;
