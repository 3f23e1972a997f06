// Wallet domain state
// 지갑 도메인 상태
use std::sync::Arc;
use crate::domains::wallet::services::WalletTxService;
use crate::shared::store::DispatchStore;

/// Wallet domain state
/// 지갑 도메인에서 필요한 서비스들을 포함하는 상태
#[derive(Clone)]
pub struct WalletState {
    pub wallet_tx_service: WalletTxService,
}

impl WalletState {
    pub fn new(store: Arc<dyn DispatchStore>) -> Self {
        Self {
            wallet_tx_service: WalletTxService::new(store),
        }
    }
}
