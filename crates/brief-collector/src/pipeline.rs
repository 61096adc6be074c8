//! 스냅샷 수집 파이프라인.
//!
//! 소스 조회는 서로 의존하지 않으므로 모두 하나의 `tokio::join!`으로 묶습니다.
//! 정렬, 지표 계산, 판정, 조립은 모든 조회가 끝난 뒤에 실행됩니다.
//!
//! ```text
//! [지수 4] [매크로 3] [뉴스 2] [FOMC] [관심 종목 N] [섹터 11]
//!     \________________________|_______________________/
//!                           join
//!                             |
//!               align / metric / classify / assemble
//!                             |
//!                          write
//! ```

use brief_core::{Snapshot, TimeSeries};
use brief_data::MarketSources;
use chrono::Utc;
use std::time::Instant;
use tracing::{info, instrument};

use crate::aggregate::Aggregator;
use crate::assemble::{assemble, MarketSeries, SnapshotInputs};
use crate::config::CollectorConfig;
use crate::error::Result;
use crate::stats::RunStats;
use crate::writer::SnapshotWriter;

/// S&P500 지수.
pub const SPX_SYMBOL: &str = "^SPX";
/// 나스닥 지수.
pub const NDQ_SYMBOL: &str = "^NDQ";
/// 다우 지수.
pub const DJI_SYMBOL: &str = "^DJI";
/// VIX 선물.
pub const VIX_SYMBOL: &str = "VI.F";
/// 달러인덱스 선물.
pub const DXY_SYMBOL: &str = "DX.F";
/// WTI 선물.
pub const WTI_SYMBOL: &str = "CL.F";
/// 미국 10년물 국채금리 (FRED).
pub const US10Y_SERIES: &str = "DGS10";

/// 모든 소스를 동시에 조회해 조립 입력을 만듭니다.
#[instrument(skip_all, fields(watchlist = config.watchlist.symbols.len()))]
pub async fn collect_inputs(
    config: &CollectorConfig,
    sources: &dyn MarketSources,
) -> (SnapshotInputs, RunStats) {
    let window = config.series_window;
    let highlight = &config.watchlist.symbols;
    let aggregator = Aggregator::new(&config.watchlist, &config.sectors, sources)
        .with_concurrency(config.fetch_concurrency);

    let (spx, ndq, dji, vix, us10y, dxy, wti, news, earnings_news, fed, watchlist, sectors) = tokio::join!(
        sources.fetch_daily(SPX_SYMBOL, window),
        sources.fetch_daily(NDQ_SYMBOL, window),
        sources.fetch_daily(DJI_SYMBOL, window),
        sources.fetch_daily(VIX_SYMBOL, window),
        sources.fetch_value_series(US10Y_SERIES, window),
        sources.fetch_daily(DXY_SYMBOL, window),
        sources.fetch_daily(WTI_SYMBOL, window),
        sources.fetch_news(&config.news_query, highlight),
        sources.fetch_news(&config.earnings_query, highlight),
        sources.fetch_schedule(),
        aggregator.watchlist_quotes(),
        aggregator.sector_entries(),
    );

    let market = MarketSeries {
        spx,
        ndq,
        dji,
        vix,
        us10y,
        dxy,
        wti,
    };

    let mut stats = RunStats::new();
    for series in market_series(&market) {
        stats.record(!series.is_empty());
    }
    stats.record(!news.is_empty());
    stats.record(!earnings_news.is_empty());
    stats.record(!fed.is_empty());
    for quote in &watchlist {
        let priced = quote.is_priced();
        stats.record(priced);
        if priced {
            stats.watchlist_priced += 1;
        }
    }
    stats.news_items = news.len();
    stats.fed_events = fed.len();

    let inputs = SnapshotInputs {
        market,
        chart_window: config.chart_window,
        news,
        earnings_news,
        fed,
        watchlist,
        sectors,
    };

    (inputs, stats)
}

fn market_series(market: &MarketSeries) -> [&TimeSeries; 7] {
    [
        &market.spx,
        &market.ndq,
        &market.dji,
        &market.vix,
        &market.us10y,
        &market.dxy,
        &market.wti,
    ]
}

/// 조회 후 스냅샷 조립 (저장하지 않음).
pub async fn build_snapshot(
    config: &CollectorConfig,
    sources: &dyn MarketSources,
) -> (Snapshot, RunStats) {
    let start = Instant::now();
    let (inputs, mut stats) = collect_inputs(config, sources).await;
    let snapshot = assemble(inputs, Utc::now());
    stats.elapsed = start.elapsed();
    (snapshot, stats)
}

/// 한 번 실행: 조회, 조립, 저장.
///
/// 소스 실패는 빈 값으로 흡수되고, 저장 실패만 에러로 반환됩니다.
#[instrument(skip_all, fields(path = %writer.path().display()))]
pub async fn run_once(
    config: &CollectorConfig,
    sources: &dyn MarketSources,
    writer: &SnapshotWriter,
) -> Result<(Snapshot, RunStats)> {
    info!("스냅샷 수집 시작");
    let (snapshot, stats) = build_snapshot(config, sources).await;
    writer.write(&snapshot).await?;
    stats.log_summary("스냅샷");
    Ok((snapshot, stats))
}
