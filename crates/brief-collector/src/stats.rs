//! 실행 통계 구조체.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 한 번의 스냅샷 실행 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// 조회한 소스 수 (시계열, 뉴스, 일정, 관심 종목 각각 1건)
    pub sources_total: usize,
    /// 데이터를 받은 소스 수
    pub sources_ok: usize,
    /// 빈 결과로 대체된 소스 수
    pub sources_empty: usize,
    /// 가격을 받은 관심 종목 수
    pub watchlist_priced: usize,
    /// 뉴스 건수
    pub news_items: usize,
    /// 연준 일정 건수
    pub fed_events: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 소스 결과 하나 기록
    pub fn record(&mut self, non_empty: bool) {
        self.sources_total += 1;
        if non_empty {
            self.sources_ok += 1;
        } else {
            self.sources_empty += 1;
        }
    }

    /// 성공률 계산 (%)
    pub fn success_rate(&self) -> f64 {
        if self.sources_total == 0 {
            0.0
        } else {
            (self.sources_ok as f64 / self.sources_total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            total = self.sources_total,
            ok = self.sources_ok,
            empty = self.sources_empty,
            watchlist_priced = self.watchlist_priced,
            news = self.news_items,
            fed_events = self.fed_events,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "스냅샷 수집 완료"
        );
    }
}
