//! 스냅샷 조립.
//!
//! 수집된 시계열, 뉴스, 일정, 종목 목록을 받아 한 장의 [`Snapshot`]을 만듭니다.
//! 순수 함수이며 실패 경로가 없습니다. 값이 비어 있으면 자리표시자로 채웁니다.

use brief_core::format::{fmt_price, fmt_signed_pct, format_kst, PLACEHOLDER};
use brief_core::{
    align, classify, derive_metric, AlignedSeriesSet, Earnings, EventItem, Indicator, MacroBlock,
    Metric, NewsItem, Overnight, RiskBlock, Schedule, SectorEntry, Snapshot, TimeSeries,
    WatchlistEntry,
};
use chrono::{DateTime, Utc};

use crate::aggregate::{mover_events, movers, WatchlistQuote};

/// 뉴스 최대 건수.
pub const NEWS_LIMIT: usize = 5;

/// 예정 실적 최대 건수.
pub const UPCOMING_EARNINGS_LIMIT: usize = 5;

const EARNINGS_KEYWORDS: [&str; 6] = ["실적", "어닝", "earnings", "Earnings", "EPS", "가이던스"];

const ONE_LINE_FALLBACK: &str =
    "자동 업데이트(무료 데이터): 지수/금리/달러/유가와 내 종목 변동을 확인하세요";

const TODO3: [&str; 3] = [
    "내 종목 변동 상위/하위 3개만 따로 체크",
    "급등/급락 종목은 뉴스 확인 후 대응",
    "오늘은 ‘한 번만’ 매매 규칙 지키기",
];

/// 지수/매크로 시계열 묶음.
#[derive(Debug, Clone, Default)]
pub struct MarketSeries {
    pub spx: TimeSeries,
    pub ndq: TimeSeries,
    pub dji: TimeSeries,
    pub vix: TimeSeries,
    pub us10y: TimeSeries,
    pub dxy: TimeSeries,
    pub wti: TimeSeries,
}

/// 조립 입력.
#[derive(Debug, Clone)]
pub struct SnapshotInputs {
    pub market: MarketSeries,
    /// 차트에 쓸 최근 날짜 수
    pub chart_window: usize,
    pub news: Vec<NewsItem>,
    pub earnings_news: Vec<NewsItem>,
    pub fed: Vec<EventItem>,
    pub watchlist: Vec<WatchlistQuote>,
    pub sectors: Vec<SectorEntry>,
}

impl Default for SnapshotInputs {
    fn default() -> Self {
        Self {
            market: MarketSeries::default(),
            chart_window: 30,
            news: Vec::new(),
            earnings_news: Vec::new(),
            fed: Vec::new(),
            watchlist: Vec::new(),
            sectors: Vec::new(),
        }
    }
}

struct IndexMetrics {
    spx: Metric,
    ndq: Metric,
    dji: Metric,
    vix: Metric,
    us10y: Metric,
    dxy: Metric,
    wti: Metric,
}

impl IndexMetrics {
    fn derive(market: &MarketSeries) -> Self {
        Self {
            spx: derive_metric(&market.spx),
            ndq: derive_metric(&market.ndq),
            dji: derive_metric(&market.dji),
            vix: derive_metric(&market.vix),
            us10y: derive_metric(&market.us10y),
            dxy: derive_metric(&market.dxy),
            wti: derive_metric(&market.wti),
        }
    }
}

/// 입력으로 스냅샷 생성. `generated_at`은 KST 문자열로 한 번만 기록됩니다.
pub fn assemble(inputs: SnapshotInputs, generated_at: DateTime<Utc>) -> Snapshot {
    let metrics = IndexMetrics::derive(&inputs.market);
    let verdict = classify(metrics.spx.percent_change, metrics.vix.latest);

    let priced: Vec<&WatchlistEntry> = inputs
        .watchlist
        .iter()
        .filter(|q| q.is_priced())
        .map(|q| &q.entry)
        .collect();
    let my_stocks: Vec<WatchlistEntry> = inputs.watchlist.iter().map(|q| q.entry.clone()).collect();

    let overnight = Overnight {
        kpis: overnight_kpis(&metrics),
        big_flow_reason: big_flow_reason(&metrics),
        series: overnight_series(&inputs.market, inputs.chart_window),
    };

    let macro_block = MacroBlock {
        kpis: macro_kpis(&metrics),
        series: macro_series(&inputs.market, inputs.chart_window),
    };

    let earnings = Earnings {
        upcoming: upcoming_earnings(&inputs.earnings_news),
        movers: mover_events(&movers(&my_stocks)),
    };

    let risk = RiskBlock {
        speed: priced
            .iter()
            .map(|e| e.percent_change.abs())
            .reduce(f64::max)
            .map(|max| format!("최대 ±{:.2}%", max))
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        vol: metrics
            .vix
            .latest
            .map(|v| format!("VIX {:.2}", v))
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        rule: verdict.action_label.clone(),
    };

    let summary = one_line(&metrics, &priced);

    let mut news = inputs.news;
    news.truncate(NEWS_LIMIT);

    Snapshot {
        updated_at: format_kst(generated_at),
        one_line: summary,
        mood: verdict.mood_block(),
        action: verdict.action_block(),
        overnight,
        schedule: Schedule { fed: inputs.fed },
        macro_block,
        news_top5: news,
        earnings,
        sectors: inputs.sectors,
        my_stocks,
        risk,
        todo3: TODO3.iter().map(|s| s.to_string()).collect(),
    }
}

fn overnight_kpis(m: &IndexMetrics) -> Vec<Indicator> {
    let price = |v: f64| fmt_price(v, 2);
    vec![
        Indicator::from_metric("📈", "S&P500", "대표 지수", &m.spx, price),
        Indicator::from_metric("📈", "나스닥", "기술주 비중", &m.ndq, price),
        Indicator::from_metric("📈", "다우", "대형 가치주", &m.dji, price),
        Indicator::from_metric("😱", "VIX", "불안하면 ↑", &m.vix, price),
    ]
}

fn macro_kpis(m: &IndexMetrics) -> Vec<Indicator> {
    vec![
        Indicator::from_metric("🏦", "미국 10년 금리", "FRED(DGS10)", &m.us10y, |v| {
            format!("{:.2}%", v)
        }),
        Indicator::from_metric("💵", "달러값(DXY)", "Stooq(DX.F)", &m.dxy, |v| fmt_price(v, 3)),
        Indicator::from_metric("🛢️", "유가(WTI)", "Stooq(CL.F)", &m.wti, |v| {
            format!("${}", fmt_price(v, 2))
        }),
    ]
}

/// 지수 차트: S&P500 최근 날짜 기준.
fn overnight_series(market: &MarketSeries, window: usize) -> AlignedSeriesSet {
    let labels = market.spx.recent_labels(window);
    align(
        &labels,
        &[("spx", &market.spx), ("ixic", &market.ndq), ("dji", &market.dji)],
    )
}

/// 매크로 차트: 10년물 금리 최근 날짜 기준.
fn macro_series(market: &MarketSeries, window: usize) -> AlignedSeriesSet {
    let labels = market.us10y.recent_labels(window);
    align(
        &labels,
        &[("us10y", &market.us10y), ("dxy", &market.dxy), ("wti", &market.wti)],
    )
}

/// 3대 지수 중 절대 변동폭이 가장 큰 지수 설명.
fn big_flow_reason(m: &IndexMetrics) -> String {
    let candidates = [("S&P500", &m.spx), ("나스닥", &m.ndq), ("다우", &m.dji)];

    let mut best: Option<(&str, f64)> = None;
    for (label, metric) in candidates {
        if metric.latest.is_none() || metric.previous.is_none() {
            continue;
        }
        let pct = metric.percent_change;
        if best.map_or(true, |(_, b)| pct.abs() > b.abs()) {
            best = Some((label, pct));
        }
    }

    match best {
        Some((label, pct)) => format!(
            "{} {}: 3대 지수 중 가장 크게 {}",
            label,
            fmt_signed_pct(pct),
            if pct >= 0.0 { "올랐음" } else { "내렸음" }
        ),
        None => "지수 데이터가 없어 큰 흐름을 판단하지 못함".to_string(),
    }
}

/// 한 줄 요약. 가격을 받은 관심 종목이 없으면 일반 문장.
fn one_line(m: &IndexMetrics, priced: &[&WatchlistEntry]) -> String {
    let best = priced
        .iter()
        .copied()
        .reduce(|a, b| if b.percent_change > a.percent_change { b } else { a });
    let worst = priced
        .iter()
        .copied()
        .reduce(|a, b| if b.percent_change < a.percent_change { b } else { a });

    match (best, worst) {
        (Some(best), Some(worst)) => format!(
            "S&P500 {}, 나스닥 {}, 美10년물 {}, 달러 {} · 내 종목 최고 {} {} / 최저 {} {}",
            fmt_signed_pct(m.spx.percent_change),
            fmt_signed_pct(m.ndq.percent_change),
            fmt_signed_pct(m.us10y.percent_change),
            fmt_signed_pct(m.dxy.percent_change),
            best.symbol,
            fmt_signed_pct(best.percent_change),
            worst.symbol,
            fmt_signed_pct(worst.percent_change),
        ),
        _ => ONE_LINE_FALLBACK.to_string(),
    }
}

/// 실적 관련 헤드라인을 예정 항목으로 변환.
fn upcoming_earnings(news: &[NewsItem]) -> Vec<EventItem> {
    news.iter()
        .filter(|n| EARNINGS_KEYWORDS.iter().any(|k| n.title.contains(k)))
        .take(UPCOMING_EARNINGS_LIMIT)
        .map(|n| EventItem {
            when: "예정".to_string(),
            title: n.title.clone(),
            note: n.source.clone(),
        })
        .collect()
}
