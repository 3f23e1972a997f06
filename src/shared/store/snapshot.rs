use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use crate::domains::entities::{Channel, Job, User};
use crate::domains::reservation::models::Reservation;
use crate::domains::wallet::models::{WalletBalance, WalletTx};

/// 저장소 JSON 덤프
/// JSON dump of the whole store
///
/// 파일 이름: `db_YYYYMMDD_HHMMSS.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub exported_at: DateTime<Utc>,

    /// "postgres" / "memory"
    pub dialect: String,

    pub tables: SnapshotTables,
}

/// 테이블별 행 (필드 순서 = 삽입 순서, FK 의존 순)
/// Rows per table; field order is the insert order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotTables {
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub wallet_txs: Vec<WalletTx>,
    #[serde(default)]
    pub wallet_balances: Vec<WalletBalance>,
}

impl SnapshotTables {
    /// 테이블별 행 수 (로그용)
    pub fn counts(&self) -> [(&'static str, usize); 6] {
        [
            ("channels", self.channels.len()),
            ("users", self.users.len()),
            ("jobs", self.jobs.len()),
            ("reservations", self.reservations.len()),
            ("walletTxs", self.wallet_txs.len()),
            ("walletBalances", self.wallet_balances.len()),
        ]
    }
}

impl Snapshot {
    pub fn file_name(&self) -> String {
        format!("db_{}.json", self.exported_at.format("%Y%m%d_%H%M%S"))
    }

    /// 디렉터리에 저장 (없으면 생성)
    /// Write into `dir`, creating it when missing
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create backup dir {}", dir.display()))?;
        let path = dir.join(self.file_name());
        let json = serde_json::to_string_pretty(self).context("Failed to serialize snapshot")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))
    }

    /// 가장 최근에 수정된 .json 백업 파일
    /// Most recently modified `.json` file in `dir`
    pub fn latest_in(dir: &Path) -> Result<PathBuf> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Backup dir not found: {}", dir.display()))?;

        let mut latest: Option<(std::time::SystemTime, PathBuf)> = None;
        for entry in entries {
            let entry = entry.context("Failed to read backup dir entry")?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .with_context(|| format!("Failed to stat {}", path.display()))?;
            if latest.as_ref().is_none_or(|(t, _)| modified > *t) {
                latest = Some((modified, path));
            }
        }

        latest
            .map(|(_, path)| path)
            .with_context(|| format!("No JSON backup in {}", dir.display()))
    }
}
