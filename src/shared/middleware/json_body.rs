use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use crate::shared::errors::ApiError;

/// JSON 본문 Extractor (실패 시 `{ok:false, error:"BAD_REQUEST"}`)
/// JSON body extractor whose rejection uses the API error envelope
///
/// axum 기본 Json 거부 응답(텍스트 본문)을 대체
///
/// 사용법:
/// ```rust,ignore
/// pub async fn create_reservation(
///     State(app_state): State<AppState>,
///     ApiJson(request): ApiJson<CreateReservationRequest>,
/// ) -> ...
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                Err(ApiError::BadRequest(rejection.body_text()).into())
            }
        }
    }
}
