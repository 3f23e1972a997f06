// 환경 설정
// Configuration loaded from environment variables (.env honored by main)
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// 로그 출력 형식
/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::Invalid("LOG_FORMAT", "must be `pretty` or `json`")),
        }
    }
}

/// 애플리케이션 설정
/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,

    /// 없으면 데모 데이터가 들어간 인메모리 저장소 사용
    /// None → in-memory store seeded with demo data
    pub database_url: Option<String>,
    pub db_max_connections: u32,

    /// development / production / ...
    pub app_env: String,
    pub app_version: String,

    /// 없으면 모든 Origin 허용
    pub cors_allow_origin: Option<String>,

    pub log_format: LogFormat,

    /// 관리 도구 백업 디렉터리
    pub backup_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            db_max_connections: 10,
            app_env: "development".to_string(),
            app_version: default_version(),
            cors_allow_origin: None,
            log_format: LogFormat::Pretty,
            backup_dir: PathBuf::from("backups"),
        }
    }
}

fn default_version() -> String {
    format!("v{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// 환경 변수에서 설정 로드
    /// Load configuration from the process environment.
    ///
    /// Optional (with defaults):
    /// - `HOST` (0.0.0.0), `PORT` (3000)
    /// - `DATABASE_URL` (none), `DB_MAX_CONNECTIONS` (10)
    /// - `APP_ENV` (development), `APP_VERSION` (v<crate version>)
    /// - `CORS_ALLOW_ORIGIN` (any), `LOG_FORMAT` (pretty)
    /// - `BACKUP_DIR` (backups)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 임의의 조회 함수로 설정 로드 (테스트에서 환경 변수 대신 사용)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        // 빈 문자열은 미설정으로 취급
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid("PORT", "must be a valid port number"))?,
            None => defaults.port,
        };

        let db_max_connections = match var("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("DB_MAX_CONNECTIONS", "must be a positive integer"))?,
            None => defaults.db_max_connections,
        };

        let log_format = match var("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => defaults.log_format,
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port,
            database_url: var("DATABASE_URL"),
            db_max_connections,
            app_env: var("APP_ENV").unwrap_or(defaults.app_env),
            app_version: var("APP_VERSION").unwrap_or(defaults.app_version),
            cors_allow_origin: var("CORS_ALLOW_ORIGIN"),
            log_format,
            backup_dir: var("BACKUP_DIR").map(PathBuf::from).unwrap_or(defaults.backup_dir),
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// "host:port"
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 설정 에러
/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 환경 변수 값이 잘못됨
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, &'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = load(&[]).unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert!(config.database_url.is_none());
        assert_eq!(config.app_env, "development");
        assert!(!config.is_production());
        assert!(config.app_version.starts_with('v'));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.backup_dir, PathBuf::from("backups"));
    }

    #[test]
    fn test_custom_values() {
        let config = load(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/ttirring"),
            ("APP_ENV", "production"),
            ("APP_VERSION", "v9.9.9"),
            ("LOG_FORMAT", "JSON"),
            ("CORS_ALLOW_ORIGIN", "http://localhost:5173"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/ttirring"));
        assert!(config.is_production());
        assert_eq!(config.app_version, "v9.9.9");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.cors_allow_origin.as_deref(), Some("http://localhost:5173"));
    }

    #[test]
    fn test_empty_database_url_means_memory_store() {
        let config = load(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("PORT", _)));
    }

    #[test]
    fn test_invalid_log_format() {
        let err = load(&[("LOG_FORMAT", "xml")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("LOG_FORMAT", _)));
    }
}
