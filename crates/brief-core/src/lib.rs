//! # Brief Core
//!
//! 데일리 마켓 브리핑의 핵심 도메인 모델과 순수 계산 로직을 제공합니다.
//!
//! 이 크레이트는 I/O를 하지 않습니다:
//! - 시계열(`TimeSeries`) 및 정렬된 시계열 묶음(`AlignedSeriesSet`)
//! - 최신값/전일값/변동률 지표(`Metric`) 계산
//! - 여러 시계열을 공통 날짜 축으로 정렬
//! - 지수 변동률과 VIX로 시장 분위기/행동 판정
//! - 스냅샷 문서 타입과 표시용 포맷터
//! - 로깅 인프라

pub mod align;
pub mod classifier;
pub mod domain;
pub mod error;
pub mod format;
pub mod logging;
pub mod metric;

pub use align::align;
pub use classifier::{classify, Action, Mood, MoodAction};
pub use domain::*;
pub use error::{BriefError, BriefResult};
pub use logging::{init_logging, init_logging_from_env, LogConfig, LogFormat};
pub use metric::{derive_metric, percent_change, round2, Metric};
