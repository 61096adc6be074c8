//! 여러 시계열을 공통 날짜 축에 정렬.
//!
//! 기준 축은 호출자가 고릅니다(보통 가장 신뢰할 만한 시계열의 최근 K개
//! 날짜). 합집합이나 교집합을 만들지 않으므로, 휴장일이 다른 시계열은
//! 밀리지 않고 해당 날짜만 비어 있게 됩니다.

use crate::domain::{AlignedSeriesSet, TimeSeries};

/// 기준 날짜 축에 이름 붙은 시계열들을 정렬.
///
/// 각 기준 날짜마다 시계열에 같은 라벨이 있으면 그 값을, 없으면 `None`을
/// 채웁니다. 결과의 모든 값 벡터 길이는 `reference.len()`과 같습니다.
/// 같은 이름이 여러 번 주어지면 마지막 것이 남습니다.
pub fn align(reference: &[String], series: &[(&str, &TimeSeries)]) -> AlignedSeriesSet {
    let mut set = AlignedSeriesSet::new(reference.to_vec());

    for (name, source) in series {
        let lookup = source.lookup();
        let values: Vec<Option<f64>> = reference
            .iter()
            .map(|label| lookup.get(label.as_str()).copied())
            .collect();

        if let Err(e) = set.insert(*name, values) {
            // 길이는 구성상 항상 일치하므로 이름 충돌("labels")만 해당
            tracing::warn!(series = %name, error = %e, "정렬 시계열 추가 실패");
        }
    }

    set
}
