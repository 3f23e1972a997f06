// 로깅 초기화
// Tracing subscriber setup
use tracing_subscriber::{fmt, EnvFilter};
use crate::shared::config::LogFormat;

/// RUST_LOG가 없을 때 기본 필터
const DEFAULT_FILTER: &str = "ttirring_api=info,tower_http=info";

/// 전역 tracing subscriber 설치
/// Install the global subscriber (pretty or JSON lines)
///
/// 두 번째 호출은 무시됨 (테스트에서 여러 번 불려도 안전)
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = match format {
        LogFormat::Pretty => fmt().with_env_filter(filter).with_target(true).try_init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(false)
            .try_init(),
    };

    if let Err(e) = result {
        tracing::debug!("Tracing subscriber already installed: {}", e);
    }
}
