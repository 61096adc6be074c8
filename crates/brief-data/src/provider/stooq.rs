//! Stooq 일봉 CSV 클라이언트.
//!
//! 지수, 선물, 미국 개별 종목의 일별 종가를 무료/무인증으로 받습니다.
//!
//! ## 엔드포인트
//! - `GET /q/d/l/?s={symbol}&d1=YYYYMMDD&d2=YYYYMMDD&i=d`
//! - 응답: `Date,Open,High,Low,Close,Volume` 헤더 + 행
//!
//! ## 심볼 규칙
//! - 지수: `^SPX`, `^NDQ`, `^DJI`
//! - 선물: `VI.F`(VIX), `DX.F`(달러인덱스), `CL.F`(WTI)
//! - 미국 주식: `NVDA.US` (접미사 없이 주면 `.US`를 붙임)

use brief_core::TimeSeries;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::csv_series::{parse_csv_series, Column};
use crate::error::Result;
use crate::http::get_text;

/// Stooq 기본 URL.
pub const STOOQ_BASE_URL: &str = "https://stooq.com";

/// Stooq 심볼로 변환.
///
/// `^`로 시작하거나 `.F`/`.US`로 끝나면 그대로, 아니면 `.US`를 붙입니다.
pub fn stooq_symbol(ticker: &str) -> String {
    let t = ticker.trim();
    if t.starts_with('^') || t.ends_with(".F") || t.ends_with(".US") {
        t.to_string()
    } else {
        format!("{}.US", t)
    }
}

/// Stooq 일봉 CSV에서 종가 시계열 추출 후 최근 `days`개만 반환.
pub fn parse_daily_csv(body: &str, days: usize) -> Result<TimeSeries> {
    let parsed = parse_csv_series(body, Column::Named("Date"), Column::Named("Close"))?;
    if parsed.skipped > 0 {
        debug!(skipped = parsed.skipped, "Stooq 잘못된 행 건너뜀");
    }
    Ok(parsed.series.tail(days))
}

/// Stooq 일봉 클라이언트.
#[derive(Debug, Clone)]
pub struct StooqClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl StooqClient {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            base_url: STOOQ_BASE_URL.to_string(),
            timeout,
        }
    }

    /// 기본 URL 변경 (테스트/프록시용).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// 최근 `days`개 일별 종가 조회.
    ///
    /// 어떤 실패든 빈 시계열을 반환하며 오류를 위로 전파하지 않습니다.
    pub async fn fetch_daily(&self, symbol: &str, days: usize) -> TimeSeries {
        match self.try_fetch_daily(symbol, days).await {
            Ok(series) => {
                debug!(symbol = symbol, points = series.len(), "Stooq 일봉 수신");
                series
            }
            Err(e) => {
                warn!(symbol = symbol, error = %e, transient = e.is_transient(), "Stooq 조회 실패, 빈 시계열 사용");
                TimeSeries::empty()
            }
        }
    }

    /// 최근 `days`개 일별 종가 조회 (오류 반환 버전).
    pub async fn try_fetch_daily(&self, symbol: &str, days: usize) -> Result<TimeSeries> {
        let stooq = stooq_symbol(symbol);
        let (d1, d2) = request_window(Utc::now().date_naive(), days);
        let url = format!("{}/q/d/l/", self.base_url);

        let body = get_text(
            &self.client,
            &url,
            &[
                ("s", stooq.as_str()),
                ("d1", d1.as_str()),
                ("d2", d2.as_str()),
                ("i", "d"),
            ],
            self.timeout,
        )
        .await?;

        parse_daily_csv(&body, days)
    }
}

/// 요청 기간 (시작일, 종료일) `YYYYMMDD`.
///
/// 주말/휴장을 감안해 `days * 3` 달력일 전부터 요청합니다.
fn request_window(today: NaiveDate, days: usize) -> (String, String) {
    let span = i64::try_from(days.saturating_mul(3)).unwrap_or(i64::MAX / 2);
    let start = today
        .checked_sub_signed(ChronoDuration::days(span))
        .unwrap_or(NaiveDate::MIN);
    (
        start.format("%Y%m%d").to_string(),
        today.format("%Y%m%d").to_string(),
    )
}
