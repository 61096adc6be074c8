//! FRED 그래프 CSV 클라이언트.
//!
//! 미국 10년물 국채금리(`DGS10`) 같은 단일 값 시계열을 키 없이 받습니다.
//! 값은 이미 최종 단위(%)이므로 변환하지 않습니다.
//!
//! - `GET /graph/fredgraph.csv?id={series_id}`
//! - 응답: `observation_date,DGS10` 헤더 + 행, 결측치는 `.`

use brief_core::TimeSeries;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::csv_series::{parse_csv_series, Column};
use crate::error::Result;
use crate::http::get_text;

/// FRED 기본 URL.
pub const FRED_BASE_URL: &str = "https://fred.stlouisfed.org";

/// FRED CSV 본문에서 최근 `days`개 값 추출.
///
/// 헤더 이름이 바뀌어 온 이력이 있어 위치(0: 날짜, 1: 값)로 읽습니다.
pub fn parse_fred_csv(body: &str, days: usize) -> Result<TimeSeries> {
    let parsed = parse_csv_series(body, Column::Index(0), Column::Index(1))?;
    if parsed.skipped > 0 {
        debug!(skipped = parsed.skipped, "FRED 결측/잘못된 행 건너뜀");
    }
    Ok(parsed.series.tail(days))
}

/// FRED 시계열 클라이언트.
#[derive(Debug, Clone)]
pub struct FredClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl FredClient {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            base_url: FRED_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// 최근 `days`개 관측값 조회. 실패 시 빈 시계열.
    pub async fn fetch_series(&self, series_id: &str, days: usize) -> TimeSeries {
        match self.try_fetch_series(series_id, days).await {
            Ok(series) => {
                debug!(series_id = series_id, points = series.len(), "FRED 시계열 수신");
                series
            }
            Err(e) => {
                warn!(series_id = series_id, error = %e, "FRED 조회 실패, 빈 시계열 사용");
                TimeSeries::empty()
            }
        }
    }

    pub async fn try_fetch_series(&self, series_id: &str, days: usize) -> Result<TimeSeries> {
        let url = format!("{}/graph/fredgraph.csv", self.base_url);
        let body = get_text(&self.client, &url, &[("id", series_id)], self.timeout).await?;
        parse_fred_csv(&body, days)
    }
}
