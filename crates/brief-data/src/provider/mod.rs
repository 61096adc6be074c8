//! 외부 데이터 소스 어댑터.
//!
//! 모든 어댑터는 실패 시 빈 결과를 돌려주며 오류를 위로 올리지 않습니다.
//!
//! ## Stooq
//! - `StooqClient`: 지수, 선물, 미국 주식 일봉 CSV
//!
//! ## FRED
//! - `FredClient`: 미국 국채금리 등 단일 값 시계열 CSV
//!
//! ## Google 뉴스
//! - `NewsClient`: 검색어 RSS, 상위 5건 정리
//!
//! ## 연준
//! - `FomcClient`: FOMC 일정 페이지 스크래핑

mod csv_series;

pub mod fomc;
pub mod fred;
pub mod news;
pub mod stooq;

pub use fomc::{extract_events, visible_lines, FomcClient, FOMC_CALENDAR_URL};
pub use fred::{parse_fred_csv, FredClient, FRED_BASE_URL};
pub use news::{build_news, parse_feed, FeedEntry, NewsClient, NEWS_BASE_URL};
pub use stooq::{parse_daily_csv, stooq_symbol, StooqClient, STOOQ_BASE_URL};
