//! 파이프라인이 바라보는 데이터 소스 추상화.
//!
//! 수집기는 [`MarketSources`]만 알고, 실제 HTTP 구현은 [`HttpSources`]가
//! 맡습니다. 테스트에서는 고정 데이터를 돌려주는 구현으로 바꿔 끼웁니다.

use async_trait::async_trait;
use brief_core::{EventItem, NewsItem, TimeSeries};
use std::time::Duration;

use crate::error::Result;
use crate::http::build_client;
use crate::provider::{FomcClient, FredClient, NewsClient, StooqClient};

/// 데이터 소스 trait.
///
/// 모든 메서드는 실패해도 빈 결과를 반환합니다.
#[async_trait]
pub trait MarketSources: Send + Sync {
    /// 일별 종가 (지수, 선물, 개별 종목).
    async fn fetch_daily(&self, symbol: &str, days: usize) -> TimeSeries;

    /// 단일 값 시계열 (국채금리 등).
    async fn fetch_value_series(&self, series_id: &str, days: usize) -> TimeSeries;

    /// 검색어 뉴스 상위 목록. `highlight`에 든 단어가 제목에 있으면 별표.
    async fn fetch_news(&self, query: &str, highlight: &[String]) -> Vec<NewsItem>;

    /// 연준 공식 일정.
    async fn fetch_schedule(&self) -> Vec<EventItem>;
}

/// 소스별 기본 URL 설정.
#[derive(Debug, Clone)]
pub struct SourceEndpoints {
    pub stooq_base_url: String,
    pub fred_base_url: String,
    pub news_base_url: String,
    pub fomc_url: String,
}

impl Default for SourceEndpoints {
    fn default() -> Self {
        Self {
            stooq_base_url: crate::provider::STOOQ_BASE_URL.to_string(),
            fred_base_url: crate::provider::FRED_BASE_URL.to_string(),
            news_base_url: crate::provider::NEWS_BASE_URL.to_string(),
            fomc_url: crate::provider::FOMC_CALENDAR_URL.to_string(),
        }
    }
}

/// HTTP 기반 데이터 소스 묶음.
#[derive(Debug, Clone)]
pub struct HttpSources {
    stooq: StooqClient,
    fred: FredClient,
    news: NewsClient,
    fomc: FomcClient,
}

impl HttpSources {
    /// 공용 reqwest 클라이언트 하나로 모든 어댑터 생성.
    pub fn new(endpoints: &SourceEndpoints, timeout: Duration) -> Result<Self> {
        let client = build_client(timeout)?;
        Ok(Self {
            stooq: StooqClient::new(client.clone(), timeout)
                .with_base_url(endpoints.stooq_base_url.as_str()),
            fred: FredClient::new(client.clone(), timeout)
                .with_base_url(endpoints.fred_base_url.as_str()),
            news: NewsClient::new(client.clone(), timeout)
                .with_base_url(endpoints.news_base_url.as_str()),
            fomc: FomcClient::new(client, timeout).with_url(endpoints.fomc_url.as_str()),
        })
    }
}

#[async_trait]
impl MarketSources for HttpSources {
    async fn fetch_daily(&self, symbol: &str, days: usize) -> TimeSeries {
        self.stooq.fetch_daily(symbol, days).await
    }

    async fn fetch_value_series(&self, series_id: &str, days: usize) -> TimeSeries {
        self.fred.fetch_series(series_id, days).await
    }

    async fn fetch_news(&self, query: &str, highlight: &[String]) -> Vec<NewsItem> {
        self.news.fetch_news(query, highlight).await
    }

    async fn fetch_schedule(&self) -> Vec<EventItem> {
        self.fomc.fetch_schedule().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::DEFAULT_TIMEOUT;

    #[tokio::test]
    async fn test_http_sources_route_to_endpoints() {
        let mut server = mockito::Server::new_async().await;
        let stooq = server
            .mock("GET", "/q/d/l/")
            .match_query(mockito::Matcher::Any)
            .with_body("Date,Open,High,Low,Close,Volume\n2025-01-30,1,1,1,10,0\n2025-01-31,1,1,1,11,0\n")
            .create_async()
            .await;
        let fred = server
            .mock("GET", "/graph/fredgraph.csv")
            .match_query(mockito::Matcher::Any)
            .with_body("observation_date,DGS10\n2025-01-31,4.54\n")
            .create_async()
            .await;

        let endpoints = SourceEndpoints {
            stooq_base_url: server.url(),
            fred_base_url: server.url(),
            news_base_url: server.url(),
            fomc_url: format!("{}/fomc", server.url()),
        };
        let sources = HttpSources::new(&endpoints, DEFAULT_TIMEOUT).unwrap();

        assert_eq!(sources.fetch_daily("^SPX", 31).await.len(), 2);
        assert_eq!(sources.fetch_value_series("DGS10", 31).await.len(), 1);
        // 등록되지 않은 경로는 501 → 빈 결과
        assert!(sources.fetch_news("증시", &[]).await.is_empty());
        assert!(sources.fetch_schedule().await.is_empty());

        stooq.assert_async().await;
        fred.assert_async().await;
    }
}
