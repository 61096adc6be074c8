//! 환경변수 기반 설정 모듈.
//!
//! 관심 종목, 한글 종목명, 섹터 ETF 표는 전역 상수가 아니라 설정 구조체로
//! 들고 다니며, 테스트에서는 다른 값으로 바꿔 끼울 수 있습니다.

use brief_data::SourceEndpoints;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CollectorError, Result};

/// 기본 관심 종목.
pub const DEFAULT_WATCHLIST: [&str; 12] = [
    "NE", "RXRX", "BLDP", "BMNR", "NVDA", "TSLA", "AI", "GGLL", "QQQM", "VRTL", "CEVA", "CCS",
];

const DEFAULT_NAMES: [(&str, &str); 11] = [
    ("NE", "노블"),
    ("RXRX", "리커전 파마슈티컬스"),
    ("BLDP", "발라드 파워"),
    ("BMNR", "비트마인 이머전"),
    ("NVDA", "엔비디아"),
    ("TSLA", "테슬라"),
    ("AI", "C3.ai"),
    ("GGLL", "알파벳 2배 ETF"),
    ("QQQM", "인베스코 나스닥100 ETF"),
    ("CEVA", "세바"),
    ("CCS", "센추리 커뮤니티스"),
];

/// 기본 섹터 ETF (SPDR 11개).
const DEFAULT_SECTORS: [(&str, &str); 11] = [
    ("XLK", "기술"),
    ("XLF", "금융"),
    ("XLV", "헬스케어"),
    ("XLE", "에너지"),
    ("XLY", "경기소비재"),
    ("XLP", "필수소비재"),
    ("XLI", "산업재"),
    ("XLB", "소재"),
    ("XLU", "유틸리티"),
    ("XLRE", "부동산"),
    ("XLC", "커뮤니케이션"),
];

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 스냅샷 저장 경로
    pub snapshot_path: PathBuf,
    /// 요청당 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// 종목 조회 동시 실행 수
    pub fetch_concurrency: usize,
    /// 지수/매크로 시계열 조회 개수
    pub series_window: usize,
    /// 차트에 쓰는 최근 날짜 수
    pub chart_window: usize,
    /// 시장 뉴스 검색어
    pub news_query: String,
    /// 실적 뉴스 검색어
    pub earnings_query: String,
    /// 데이터 소스 URL
    pub endpoints: SourceEndpoints,
    /// 관심 종목 설정
    pub watchlist: WatchlistConfig,
    /// 섹터 설정
    pub sectors: SectorConfig,
}

/// 관심 종목 설정
#[derive(Debug, Clone)]
pub struct WatchlistConfig {
    /// 조회 순서대로의 티커 목록
    pub symbols: Vec<String>,
    /// 티커 → 한글 종목명
    pub names: HashMap<String, String>,
}

/// 섹터 ETF 설정
#[derive(Debug, Clone)]
pub struct SectorConfig {
    /// (ETF 티커, 한글 섹터명)
    pub etfs: Vec<(String, String)>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("data/latest.json"),
            request_timeout_secs: 25,
            fetch_concurrency: 6,
            series_window: 31,
            chart_window: 30,
            news_query: "미국 증시".to_string(),
            earnings_query: "미국 실적 발표".to_string(),
            endpoints: SourceEndpoints::default(),
            watchlist: WatchlistConfig::default(),
            sectors: SectorConfig::default(),
        }
    }
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let endpoints = SourceEndpoints {
            stooq_base_url: env_var_string("STOOQ_BASE_URL", defaults.endpoints.stooq_base_url),
            fred_base_url: env_var_string("FRED_BASE_URL", defaults.endpoints.fred_base_url),
            news_base_url: env_var_string("NEWS_BASE_URL", defaults.endpoints.news_base_url),
            fomc_url: env_var_string("FOMC_URL", defaults.endpoints.fomc_url),
        };

        let mut watchlist = defaults.watchlist;
        if let Ok(raw) = std::env::var("WATCHLIST") {
            watchlist = watchlist.with_symbols(parse_symbol_list(&raw));
        }

        let config = Self {
            snapshot_path: std::env::var("SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.snapshot_path),
            request_timeout_secs: env_var_parse("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            fetch_concurrency: env_var_parse("FETCH_CONCURRENCY", defaults.fetch_concurrency),
            series_window: env_var_parse("SERIES_WINDOW", defaults.series_window),
            chart_window: env_var_parse("CHART_WINDOW", defaults.chart_window),
            news_query: env_var_string("NEWS_QUERY", defaults.news_query),
            earnings_query: env_var_string("EARNINGS_QUERY", defaults.earnings_query),
            endpoints,
            watchlist,
            sectors: defaults.sectors,
        };

        config.validate()?;
        Ok(config)
    }

    /// 값 범위 검증
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(CollectorError::Config(
                "REQUEST_TIMEOUT_SECS는 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.fetch_concurrency == 0 {
            return Err(CollectorError::Config(
                "FETCH_CONCURRENCY는 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.series_window < 2 || self.chart_window == 0 {
            return Err(CollectorError::Config(format!(
                "시계열 범위가 올바르지 않습니다 (SERIES_WINDOW={}, CHART_WINDOW={})",
                self.series_window, self.chart_window
            )));
        }
        Ok(())
    }

    /// 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for WatchlistConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect(),
            names: DEFAULT_NAMES
                .iter()
                .map(|(sym, name)| (sym.to_string(), name.to_string()))
                .collect(),
        }
    }
}

impl WatchlistConfig {
    /// 종목명 표는 유지하고 티커 목록만 교체
    pub fn with_symbols(mut self, symbols: Vec<String>) -> Self {
        self.symbols = symbols;
        self
    }

    /// 한글 종목명 (매핑 없으면 빈 문자열)
    pub fn name_of(&self, symbol: &str) -> &str {
        self.names.get(symbol).map(String::as_str).unwrap_or("")
    }
}

impl Default for SectorConfig {
    fn default() -> Self {
        Self {
            etfs: DEFAULT_SECTORS
                .iter()
                .map(|(etf, name)| (etf.to_string(), name.to_string()))
                .collect(),
        }
    }
}

/// 쉼표로 구분된 티커 목록 파싱 (빈 항목 제거, 대문자화)
fn parse_symbol_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용)
fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// 환경변수 문자열 (비어 있으면 기본값 사용)
fn env_var_string(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}
