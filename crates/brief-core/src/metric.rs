//! 최신값/전일값/변동률 지표 계산.
//!
//! 지수, 매크로 지표, 관심 종목, 섹터 ETF 모두 같은 함수로 계산합니다.

use serde::{Deserialize, Serialize};

use crate::domain::TimeSeries;

/// 시계열 요약 지표.
///
/// `percent_change`는 항상 구체적인 숫자입니다. 최신값이나 전일값이 없거나
/// 전일값이 0이면 `0.0`입니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub latest: Option<f64>,
    pub previous: Option<f64>,
    pub percent_change: f64,
}

impl Metric {
    /// 최신값과 0이 아닌 전일값이 모두 있어 변동률이 의미 있는지.
    pub fn has_change(&self) -> bool {
        matches!((self.latest, self.previous), (Some(_), Some(prev)) if prev != 0.0)
    }
}

/// 시계열에서 지표 계산.
///
/// - `latest`: 점이 1개 이상이면 마지막 값
/// - `previous`: 점이 2개 이상이면 끝에서 두 번째 값
/// - `percent_change`: `(latest / previous - 1) * 100`, 소수 둘째 자리 반올림
pub fn derive_metric(series: &TimeSeries) -> Metric {
    let latest = series.from_end(0).map(|p| p.value);
    let previous = series.from_end(1).map(|p| p.value);

    Metric {
        latest,
        previous,
        percent_change: percent_change(latest, previous),
    }
}

/// 전일 대비 변동률 (%). 계산 불가 시 `0.0`.
pub fn percent_change(latest: Option<f64>, previous: Option<f64>) -> f64 {
    match (latest, previous) {
        (Some(last), Some(prev)) if prev != 0.0 => {
            let pct = (last / prev - 1.0) * 100.0;
            if pct.is_finite() {
                round2(pct)
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// 소수 둘째 자리 반올림. `-0.0`은 `0.0`으로 정규화합니다.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn series(values: &[f64]) -> TimeSeries {
        TimeSeries::from_pairs(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("2025-01-{:02}", i + 1), *v)),
        )
    }

    #[test]
    fn test_metric_empty_series() {
        let metric = derive_metric(&TimeSeries::empty());
        assert_eq!(metric.latest, None);
        assert_eq!(metric.previous, None);
        assert_eq!(metric.percent_change, 0.0);
    }

    #[test]
    fn test_metric_single_point() {
        let metric = derive_metric(&series(&[101.5]));
        assert_eq!(metric.latest, Some(101.5));
        assert_eq!(metric.previous, None);
        assert_eq!(metric.percent_change, 0.0);
    }

    #[test]
    fn test_metric_two_points() {
        let metric = derive_metric(&series(&[100.0, 101.234]));
        assert_eq!(metric.latest, Some(101.234));
        assert_eq!(metric.previous, Some(100.0));
        assert_eq!(metric.percent_change, 1.23);
    }

    #[test]
    fn test_has_change() {
        assert!(derive_metric(&series(&[100.0, 101.0])).has_change());
        assert!(!derive_metric(&series(&[101.5])).has_change());
        assert!(!derive_metric(&series(&[0.0, 3.0])).has_change());
        assert!(!Metric::default().has_change());
    }

    #[test]
    fn test_metric_uses_last_two_points_only() {
        let metric = derive_metric(&series(&[50.0, 200.0, 100.0, 99.0]));
        assert_eq!(metric.percent_change, -1.0);
    }

    #[test]
    fn test_percent_change_zero_previous() {
        assert_eq!(percent_change(Some(10.0), Some(0.0)), 0.0);
        assert_eq!(percent_change(None, Some(1.0)), 0.0);
        assert_eq!(percent_change(Some(1.0), None), 0.0);
    }

    #[test]
    fn test_round2_normalizes_negative_zero() {
        assert_eq!(round2(-0.001).to_string(), "0");
        assert_eq!(round2(1.005 + 0.0001), 1.01);
        assert_eq!(round2(-2.346), -2.35);
    }

    proptest! {
        #[test]
        fn prop_short_series_has_zero_change(v in proptest::option::of(-1e6f64..1e6)) {
            let s = match v {
                Some(v) => series(&[v]),
                None => TimeSeries::empty(),
            };
            let metric = derive_metric(&s);
            prop_assert_eq!(metric.percent_change, 0.0);
            prop_assert_eq!(metric.previous, None);
            prop_assert_eq!(metric.latest, v);
        }

        #[test]
        fn prop_zero_previous_never_divides(last in -1e9f64..1e9) {
            let metric = derive_metric(&series(&[0.0, last]));
            prop_assert_eq!(metric.percent_change, 0.0);
            prop_assert_eq!(metric.previous, Some(0.0));
        }

        #[test]
        fn prop_change_is_always_finite(values in proptest::collection::vec(-1e12f64..1e12, 0..8)) {
            let metric = derive_metric(&series(&values));
            prop_assert!(metric.percent_change.is_finite());
        }
    }
}
