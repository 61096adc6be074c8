//! # Brief Data
//!
//! 데일리 마켓 브리핑의 외부 데이터 소스 어댑터.
//!
//! 이 crate는 다음을 제공합니다:
//! - Stooq 일봉 CSV, FRED 시계열 CSV 클라이언트
//! - Google 뉴스 RSS 정리
//! - 연준 FOMC 일정 스크래핑
//! - 공용 HTTP 클라이언트와 요청당 타임아웃
//! - 파이프라인용 `MarketSources` trait
//!
//! 모든 공개 조회 함수는 실패 시 빈 결과를 돌려줍니다.

pub mod error;
pub mod http;
pub mod provider;
pub mod sources;

pub use error::{Result, SourceError};
pub use http::{build_client, DEFAULT_TIMEOUT};
pub use provider::{FomcClient, FredClient, NewsClient, StooqClient};
pub use sources::{HttpSources, MarketSources, SourceEndpoints};
