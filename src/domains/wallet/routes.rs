// Wallet domain routes
// 지갑 도메인 라우터
use axum::{routing::{get, post}, Router};
use crate::domains::wallet::handlers::wallet_tx_handler;
use crate::shared::services::AppState;

/// Create wallet transaction router (`/v1/wallet_tx`)
/// 지갑 거래 라우터 생성
pub fn create_wallet_tx_router() -> Router<AppState> {
    Router::new()
        .route("/debit", post(wallet_tx_handler::debit))
        .route("/credit", post(wallet_tx_handler::credit))
}

/// Create wallet router (`/v1/wallets`)
/// 지갑 라우터 생성
pub fn create_wallet_router() -> Router<AppState> {
    Router::new()
        .route("/:user_id/balance", get(wallet_tx_handler::get_balance))
}
