// HTTP 공통 레이어
// Request id, tracing span, static response headers and CORS
use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Method, Request},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use crate::shared::config::Config;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const APP_VERSION_HEADER: &str = "x-app-version";
pub const ENV_HEADER: &str = "x-env";

fn header_value(raw: &str) -> HeaderValue {
    HeaderValue::from_str(raw).unwrap_or_else(|_| HeaderValue::from_static("unknown"))
}

/// CORS 설정 (CORS_ALLOW_ORIGIN 없으면 모든 Origin 허용)
fn cors_layer(config: &Config) -> CorsLayer {
    let origin = match config
        .cors_allow_origin
        .as_deref()
        .and_then(|raw| raw.parse::<HeaderValue>().ok())
    {
        Some(origin) => AllowOrigin::exact(origin),
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([
            HeaderName::from_static(REQUEST_ID_HEADER),
            HeaderName::from_static(APP_VERSION_HEADER),
            HeaderName::from_static(ENV_HEADER),
        ])
}

/// 라우터에 공통 레이어 적용
/// Wrap the router with the shared HTTP layers
///
/// 바깥 → 안쪽 순서:
/// SetRequestId → Trace(span에 request_id) → CORS → 고정 헤더 → PropagateRequestId
pub fn apply_http_layers(router: Router, config: &Config) -> Router {
    let version = header_value(&config.app_version);
    let env = header_value(&config.app_env);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "http",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(APP_VERSION_HEADER),
            version,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(ENV_HEADER),
            env,
        ))
        .layer(cors_layer(config))
        .layer(trace)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
