//! 시계열 타입.
//!
//! 날짜 라벨은 불투명한 문자열 키입니다. 달력 객체로 파싱하지 않고
//! 정렬(오름차순 문자열 비교)과 동등 비교에만 사용합니다.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{BriefError, BriefResult};

/// 시계열의 한 점 (날짜 라벨, 값).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// 날짜 라벨 (예: "2025-01-31")
    pub date: String,
    /// 값 (종가, 금리 등)
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

/// 단일 소스/단일 종목의 시계열.
///
/// # 불변식
///
/// - 날짜 라벨 오름차순
/// - 날짜 라벨 중복 없음
/// - 값은 항상 유한수 (NaN/무한대 제외)
///
/// 소스 실패 시 빈 시계열이 되며 `None`으로 표현하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries {
    points: Vec<SeriesPoint>,
}

impl TimeSeries {
    /// 빈 시계열.
    pub fn empty() -> Self {
        Self::default()
    }

    /// 임의 순서의 점 목록으로 시계열 생성.
    ///
    /// 날짜 오름차순으로 정렬하고, 같은 날짜가 여러 번 나오면 마지막 값을
    /// 사용합니다. 유한수가 아닌 값은 버립니다.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = SeriesPoint>,
    {
        let mut points: Vec<SeriesPoint> = points
            .into_iter()
            .filter(|p| p.value.is_finite() && !p.date.is_empty())
            .collect();

        // 안정 정렬: 같은 날짜끼리는 입력 순서 유지
        points.sort_by(|a, b| a.date.cmp(&b.date));

        let mut deduped: Vec<SeriesPoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }

        Self { points: deduped }
    }

    /// (날짜, 값) 쌍 목록으로 시계열 생성.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self::from_points(pairs.into_iter().map(|(d, v)| SeriesPoint::new(d, v)))
    }

    /// 최근 `n`개만 남긴 시계열.
    pub fn tail(mut self, n: usize) -> Self {
        if self.points.len() > n {
            self.points.drain(..self.points.len() - n);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// 마지막(최신) 점.
    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    /// 끝에서 `offset`번째 점 (0 = 최신).
    pub fn from_end(&self, offset: usize) -> Option<&SeriesPoint> {
        self.points
            .len()
            .checked_sub(offset + 1)
            .and_then(|idx| self.points.get(idx))
    }

    /// 최근 `k`개의 날짜 라벨. 정렬 기준 축으로 사용합니다.
    pub fn recent_labels(&self, k: usize) -> Vec<String> {
        let start = self.points.len().saturating_sub(k);
        self.points[start..].iter().map(|p| p.date.clone()).collect()
    }

    /// 날짜 → 값 조회 맵.
    pub fn lookup(&self) -> BTreeMap<&str, f64> {
        self.points
            .iter()
            .map(|p| (p.date.as_str(), p.value))
            .collect()
    }
}

/// 공통 날짜 축에 정렬된 시계열 묶음.
///
/// # 불변식
///
/// 모든 값 벡터의 길이 == `labels.len()`.
///
/// JSON에서는 `{"labels": [...], "<이름>": [값 또는 null, ...]}` 형태이며,
/// 역직렬화 시 길이 불변식을 검증합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAlignedSeriesSet")]
pub struct AlignedSeriesSet {
    labels: Vec<String>,
    #[serde(flatten)]
    series: BTreeMap<String, Vec<Option<f64>>>,
}

#[derive(Deserialize)]
struct RawAlignedSeriesSet {
    labels: Vec<String>,
    #[serde(flatten)]
    series: BTreeMap<String, Vec<Option<f64>>>,
}

impl TryFrom<RawAlignedSeriesSet> for AlignedSeriesSet {
    type Error = BriefError;

    fn try_from(raw: RawAlignedSeriesSet) -> BriefResult<Self> {
        let mut set = Self::new(raw.labels);
        for (name, values) in raw.series {
            set.insert(name, values)?;
        }
        Ok(set)
    }
}

impl AlignedSeriesSet {
    /// 기준 날짜 축만 있는 빈 묶음.
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            series: BTreeMap::new(),
        }
    }

    /// 이름 붙은 값 벡터 추가. 길이가 축과 다르면 거부합니다.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> BriefResult<()> {
        let name = name.into();
        if name == "labels" {
            return Err(BriefError::InvalidInput(
                "'labels'는 시계열 이름으로 사용할 수 없습니다".to_string(),
            ));
        }
        if values.len() != self.labels.len() {
            return Err(BriefError::LengthMismatch {
                name,
                expected: self.labels.len(),
                actual: values.len(),
            });
        }
        self.series.insert(name, values);
        Ok(())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn get(&self, name: &str) -> Option<&[Option<f64>]> {
        self.series.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
