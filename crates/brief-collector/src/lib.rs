//! Daily market brief snapshot collector.
//!
//! 이 crate는 하루 한 번 시장 스냅샷을 만드는 바이너리를 제공합니다:
//! - 지수/매크로 시계열, 뉴스, FOMC 일정 동시 조회
//! - 관심 종목/섹터 ETF 집계와 상/하위 변동 종목
//! - 분위기/행동 판정과 스냅샷 조립
//! - `data/latest.json` 원자적 저장

pub mod aggregate;
pub mod assemble;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod stats;
pub mod writer;

pub use aggregate::{Aggregator, WatchlistQuote};
pub use assemble::{assemble, MarketSeries, SnapshotInputs};
pub use config::{CollectorConfig, SectorConfig, WatchlistConfig};
pub use error::{CollectorError, Result};
pub use pipeline::{build_snapshot, collect_inputs, run_once};
pub use stats::RunStats;
pub use writer::SnapshotWriter;
