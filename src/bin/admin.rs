// 관리 도구: 백업(export) / 복원(import) / 시드(seed)
// Admin tool for the PostgreSQL store
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ttirring_api::shared::database::Database;
use ttirring_api::shared::logging::init_tracing;
use ttirring_api::shared::store::{Maintenance, PgStore, SeedData, Snapshot};
use ttirring_api::Config;

#[derive(Parser, Debug)]
#[command(name = "ttirring-admin", author, version, about = "Backup, restore and seed the ttirring database")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 전체 테이블을 JSON 파일로 저장
    /// Dump every table into `db_YYYYMMDD_HHMMSS.json`
    Export {
        /// 출력 디렉터리 (기본: BACKUP_DIR)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// JSON 백업으로 전체 교체 복원
    /// Replace all data with a dump (latest file in BACKUP_DIR when omitted)
    Import {
        file: Option<PathBuf>,
    },

    /// 데모 참조 데이터 upsert
    /// Upsert demo channels, users and jobs
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.log_format);

    let db_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for ttirring-admin")?;
    let db = Database::new(db_url, config.db_max_connections).await?;
    db.initialize().await?;
    let store = PgStore::new(db);

    match args.command {
        Command::Export { out } => {
            let dir = out.unwrap_or_else(|| config.backup_dir.clone());
            let snapshot = store.export_snapshot().await?;
            let path = snapshot.write_to_dir(&dir)?;
            for (table, rows) in snapshot.tables.counts() {
                tracing::info!(table, rows, "exported");
            }
            tracing::info!(path = %path.display(), "Export complete");
        }
        Command::Import { file } => {
            let path = match file {
                Some(path) => path,
                None => Snapshot::latest_in(&config.backup_dir)?,
            };
            let snapshot = Snapshot::read_from(&path)?;
            store.import_snapshot(&snapshot).await?;
            for (table, rows) in snapshot.tables.counts() {
                tracing::info!(table, rows, "imported");
            }
            tracing::info!(path = %path.display(), "Import complete");
        }
        Command::Seed => {
            let seed = SeedData::demo();
            store.apply_seed(&seed).await?;
            tracing::info!(
                channels = seed.channels.len(),
                users = seed.users.len(),
                jobs = seed.jobs.len(),
                "Seed complete"
            );
        }
    }

    Ok(())
}
