//! Daily market brief collector CLI.

use anyhow::Context;
use brief_collector::{pipeline, writer, CollectorConfig, SnapshotWriter};
use brief_core::logging::{init_logging, LogConfig};
use brief_data::HttpSources;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "brief-collector")]
#[command(about = "Daily market brief snapshot collector", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// 로그 레벨 (trace, debug, info, warn, error). 없으면 RUST_LOG 사용
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 스냅샷을 한 번 만들어 파일로 저장 (기본)
    Run {
        /// 저장 경로 (SNAPSHOT_PATH보다 우선)
        #[arg(long)]
        output: Option<std::path::PathBuf>,
    },

    /// 스냅샷을 만들어 표준 출력으로 JSON 출력 (저장하지 않음)
    Print,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 로깅 초기화
    let mut log_config = LogConfig::from_env();
    if let Some(level) = cli.log_level {
        log_config.level = level;
    }
    if let Err(e) = init_logging(log_config) {
        eprintln!("로깅 초기화 실패: {}", e);
    }

    tracing::info!("Market Brief Collector 시작");

    // 설정 로드
    let mut config = CollectorConfig::from_env()?;
    tracing::debug!(
        snapshot_path = %config.snapshot_path.display(),
        watchlist = config.watchlist.symbols.len(),
        timeout_secs = config.request_timeout_secs,
        "설정 로드 완료"
    );

    let sources = HttpSources::new(&config.endpoints, config.request_timeout())
        .context("HTTP 클라이언트 생성 실패")?;

    match cli.command.unwrap_or(Commands::Run { output: None }) {
        Commands::Run { output } => {
            if let Some(path) = output {
                config.snapshot_path = path;
            }
            let writer = SnapshotWriter::new(&config.snapshot_path);
            pipeline::run_once(&config, &sources, &writer)
                .await
                .with_context(|| format!("스냅샷 저장 실패: {}", config.snapshot_path.display()))?;
        }
        Commands::Print => {
            let (snapshot, stats) = pipeline::build_snapshot(&config, &sources).await;
            stats.log_summary("스냅샷 (출력 전용)");
            println!("{}", writer::to_pretty_json(&snapshot)?.trim_end());
        }
    }

    tracing::info!("Market Brief Collector 종료");
    Ok(())
}
