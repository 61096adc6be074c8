//! 관심 종목/섹터 집계.
//!
//! 종목마다 같은 "조회 → 지표 계산" 과정을 적용하고, 상/하위 변동 종목을 뽑습니다.

use brief_core::format::{fmt_price_opt, fmt_price_with_change, fmt_signed_pct};
use brief_core::{derive_metric, EventItem, Metric, SectorEntry, WatchlistEntry};
use brief_data::MarketSources;
use futures::stream::{self, StreamExt};
use tracing::{debug, instrument};

use crate::config::{SectorConfig, WatchlistConfig};

/// 종목당 조회할 일봉 수 (최신/전일 계산에 충분한 만큼).
pub const PRICE_WINDOW: usize = 3;

/// 상위/하위 각각 뽑을 종목 수.
pub const MOVERS_PER_SIDE: usize = 3;

const MOVER_WHEN: &str = "오늘";
const MOVER_NOTE: &str = "가격 변동 기반 프록시(실적 확인 아님)";

/// 관심 종목 한 줄과 그 계산 근거 지표.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistQuote {
    pub entry: WatchlistEntry,
    pub metric: Metric,
}

impl WatchlistQuote {
    pub fn new(symbol: &str, name: &str, metric: Metric) -> Self {
        Self {
            entry: watchlist_entry(symbol, name, &metric),
            metric,
        }
    }

    /// 최신 가격을 받았는지.
    pub fn is_priced(&self) -> bool {
        self.metric.latest.is_some()
    }
}

/// 관심 종목/섹터 집계기.
pub struct Aggregator<'a> {
    sources: &'a dyn MarketSources,
    watchlist: &'a WatchlistConfig,
    sectors: &'a SectorConfig,
    concurrency: usize,
}

impl<'a> Aggregator<'a> {
    pub fn new(
        watchlist: &'a WatchlistConfig,
        sectors: &'a SectorConfig,
        sources: &'a dyn MarketSources,
    ) -> Self {
        Self {
            sources,
            watchlist,
            sectors,
            concurrency: 6,
        }
    }

    /// 동시 조회 수 제한 (최소 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// 관심 종목 목록 (설정 순서 유지).
    #[instrument(skip(self), fields(count = self.watchlist.symbols.len()))]
    pub async fn watchlist_quotes(&self) -> Vec<WatchlistQuote> {
        let symbols: Vec<&str> = self.watchlist.symbols.iter().map(String::as_str).collect();
        let metrics = self.fetch_metrics(&symbols).await;

        symbols
            .iter()
            .zip(metrics)
            .map(|(symbol, metric)| WatchlistQuote::new(symbol, self.watchlist.name_of(symbol), metric))
            .collect()
    }

    /// 섹터 성과 (변동률 내림차순).
    #[instrument(skip(self), fields(count = self.sectors.etfs.len()))]
    pub async fn sector_entries(&self) -> Vec<SectorEntry> {
        let symbols: Vec<&str> = self.sectors.etfs.iter().map(|(etf, _)| etf.as_str()).collect();
        let metrics = self.fetch_metrics(&symbols).await;

        let entries = self
            .sectors
            .etfs
            .iter()
            .zip(metrics.iter())
            .map(|((etf, name), metric)| sector_entry(etf, name, metric))
            .collect();

        rank_sectors(entries)
    }

    /// 종목별 일봉 조회 후 지표 계산. 결과 순서는 입력 순서와 같습니다.
    async fn fetch_metrics(&self, symbols: &[&str]) -> Vec<Metric> {
        let sources = self.sources;
        let metrics: Vec<Metric> = stream::iter(symbols.iter().copied())
            .map(|symbol| async move {
                let series = sources.fetch_daily(symbol, PRICE_WINDOW).await;
                derive_metric(&series)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        debug!(
            requested = symbols.len(),
            priced = metrics.iter().filter(|m| m.latest.is_some()).count(),
            "종목 지표 계산 완료"
        );
        metrics
    }
}

/// 관심 종목 한 줄 생성.
pub fn watchlist_entry(symbol: &str, name: &str, metric: &Metric) -> WatchlistEntry {
    WatchlistEntry {
        symbol: symbol.to_string(),
        localized_name: name.to_string(),
        last_price_text: fmt_price_opt(metric.latest, 2),
        percent_change: metric.percent_change,
        formatted_price_text: fmt_price_with_change(metric),
    }
}

/// 섹터 한 줄 생성.
pub fn sector_entry(etf: &str, name: &str, metric: &Metric) -> SectorEntry {
    SectorEntry {
        localized_sector_name: name.to_string(),
        percent_change: metric.percent_change,
        proxy_symbol: etf.to_string(),
    }
}

/// 변동률 내림차순 정렬 (같은 값은 설정 순서 유지).
pub fn rank_sectors(mut entries: Vec<SectorEntry>) -> Vec<SectorEntry> {
    entries.sort_by(|a, b| b.percent_change.total_cmp(&a.percent_change));
    entries
}

/// 상위 3개 + 하위 3개 변동 종목.
///
/// 모든 관심 종목(조회 실패는 0.0%)을 변동률 내림차순으로 정렬해 상위 3개,
/// 그 다음 가장 많이 내린 순으로 하위 3개를 붙입니다. 같은 값은 설정 순서를
/// 유지합니다. 6개 미만이면 상위에 이미 뽑힌 종목은 하위에 다시 넣지 않습니다.
pub fn movers(entries: &[WatchlistEntry]) -> Vec<WatchlistEntry> {
    let mut ranked: Vec<&WatchlistEntry> = entries.iter().collect();
    ranked.sort_by(|a, b| b.percent_change.total_cmp(&a.percent_change));

    let top = ranked.len().min(MOVERS_PER_SIDE);
    let bottom_start = ranked.len().saturating_sub(MOVERS_PER_SIDE).max(top);

    ranked[..top]
        .iter()
        .chain(ranked[bottom_start..].iter().rev())
        .map(|e| (*e).clone())
        .collect()
}

/// 변동 종목을 일정 항목으로 변환.
pub fn mover_events(movers: &[WatchlistEntry]) -> Vec<EventItem> {
    movers
        .iter()
        .map(|e| EventItem {
            when: MOVER_WHEN.to_string(),
            title: format!("{} {}", e.symbol, fmt_signed_pct(e.percent_change)),
            note: MOVER_NOTE.to_string(),
        })
        .collect()
}
