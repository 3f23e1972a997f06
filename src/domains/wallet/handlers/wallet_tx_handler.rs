use crate::domains::wallet::models::{WalletBalanceResponse, WalletTxRequest, WalletTxResponse};
use crate::shared::middleware::ApiJson;
use crate::shared::services::AppState;
use axum::{extract::{Path, State}, http::StatusCode, Json};

/// 출금 핸들러
/// Debit handler
/// 201: 새 거래 / 200: 같은 txId 재요청 (`idempotent: true`)
pub async fn debit(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<WalletTxRequest>,
) -> Result<(StatusCode, Json<WalletTxResponse>), (StatusCode, Json<serde_json::Value>)> {
    let outcome = app_state
        .wallet_state
        .wallet_tx_service
        .debit(request)
        .await
        .map_err(|e| app_state.reject(e))?;

    Ok((outcome.status_code(), Json(outcome.into())))
}

/// 충전(지급) 핸들러
/// Credit handler
pub async fn credit(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<WalletTxRequest>,
) -> Result<(StatusCode, Json<WalletTxResponse>), (StatusCode, Json<serde_json::Value>)> {
    let outcome = app_state
        .wallet_state
        .wallet_tx_service
        .credit(request)
        .await
        .map_err(|e| app_state.reject(e))?;

    Ok((outcome.status_code(), Json(outcome.into())))
}

/// 잔액 조회 핸들러
/// Get wallet balance handler
pub async fn get_balance(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<WalletBalanceResponse>, (StatusCode, Json<serde_json::Value>)> {
    let balance = app_state
        .wallet_state
        .wallet_tx_service
        .balance(&user_id)
        .await
        .map_err(|e| app_state.reject(e))?;

    Ok(Json(WalletBalanceResponse {
        ok: true,
        user_id,
        balance,
    }))
}
