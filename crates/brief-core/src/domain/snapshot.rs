//! 스냅샷 문서 타입.
//!
//! 한 번의 실행이 만드는 단일 불변 문서와 그 구성요소들입니다.
//! JSON 키는 camelCase이며, 표시 계층이 그대로 읽습니다.

use serde::{Deserialize, Serialize};

use super::series::AlignedSeriesSet;
use crate::format::PLACEHOLDER;
use crate::metric::Metric;

/// KPI 카드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicator {
    pub icon: String,
    pub label: String,
    /// 표시값. 최신값이 없으면 `"-"`.
    #[serde(rename = "valueText")]
    pub display_value: String,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(rename = "changePct")]
    pub percent_change: f64,
}

impl Indicator {
    /// 지표로부터 KPI 카드 생성.
    ///
    /// `render`는 최신값이 있을 때만 호출됩니다.
    pub fn from_metric(
        icon: &str,
        label: &str,
        description: &str,
        metric: &Metric,
        render: impl Fn(f64) -> String,
    ) -> Self {
        Self {
            icon: icon.to_string(),
            label: label.to_string(),
            display_value: metric
                .latest
                .map(render)
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            description: description.to_string(),
            percent_change: metric.percent_change,
        }
    }
}

/// 관심 종목 한 줄.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub symbol: String,
    /// 한글 종목명 (매핑 없으면 빈 문자열)
    #[serde(rename = "name")]
    pub localized_name: String,
    #[serde(rename = "last")]
    pub last_price_text: String,
    #[serde(rename = "changePct")]
    pub percent_change: f64,
    /// 예: "181.20 (↑1.25%)"
    #[serde(rename = "priceText")]
    pub formatted_price_text: String,
}

/// 섹터 ETF 성과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorEntry {
    #[serde(rename = "name")]
    pub localized_sector_name: String,
    #[serde(rename = "changePct")]
    pub percent_change: f64,
    #[serde(rename = "etf")]
    pub proxy_symbol: String,
}

/// 뉴스 한 건.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    /// 요약 (최대 140자, 초과 시 말줄임)
    #[serde(rename = "reason")]
    pub short_reason: String,
    pub source: String,
    pub starred: bool,
}

/// 일정 한 건 (연준 공식 일정 또는 실적 관련 파생 항목).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventItem {
    #[serde(rename = "time")]
    pub when: String,
    pub title: String,
    pub note: String,
}

/// 시장 분위기 블록.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodBlock {
    pub value: String,
    pub reason: String,
}

/// 행동 권장 블록.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionBlock {
    pub value: String,
    pub note: String,
    pub beginner_memo: String,
}

/// 간밤 지수 블록.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overnight {
    pub kpis: Vec<Indicator>,
    pub big_flow_reason: String,
    pub series: AlignedSeriesSet,
}

/// 매크로 지표 블록.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroBlock {
    pub kpis: Vec<Indicator>,
    pub series: AlignedSeriesSet,
}

/// 일정 블록.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub fed: Vec<EventItem>,
}

/// 실적 블록.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Earnings {
    pub upcoming: Vec<EventItem>,
    /// 가격 변동 상/하위 종목 (실적 확인 아님)
    pub movers: Vec<EventItem>,
}

/// 리스크/리마인더 블록.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBlock {
    /// 관심 종목 최대 절대 변동률
    pub speed: String,
    /// VIX 최신값
    pub vol: String,
    /// 오늘의 행동 규칙
    pub rule: String,
}

/// 한 번의 실행이 만드는 최상위 문서.
///
/// 조립 이후에는 수정하지 않으며 다음 실행이 통째로 대체합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub updated_at: String,
    pub one_line: String,
    pub mood: MoodBlock,
    pub action: ActionBlock,
    pub overnight: Overnight,
    pub schedule: Schedule,
    #[serde(rename = "macro")]
    pub macro_block: MacroBlock,
    pub news_top5: Vec<NewsItem>,
    pub earnings: Earnings,
    pub sectors: Vec<SectorEntry>,
    pub my_stocks: Vec<WatchlistEntry>,
    pub risk: RiskBlock,
    pub todo3: Vec<String>,
}
