//! 헤더 + 행 형태의 CSV 응답을 시계열로 변환.
//!
//! Stooq 일봉과 FRED 시계열이 같은 파서를 씁니다. 잘못된 행은 개별적으로
//! 건너뛰며, 한 행의 오류가 나머지를 버리게 하지 않습니다.

use brief_core::{SeriesPoint, TimeSeries};

use crate::error::{Result, SourceError};

/// 열 선택 방법.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Column<'a> {
    /// 헤더 이름 (대소문자 무시)
    Named(&'a str),
    /// 0부터 시작하는 위치
    Index(usize),
}

/// 파싱 결과.
#[derive(Debug)]
pub(crate) struct ParsedSeries {
    pub series: TimeSeries,
    pub skipped: usize,
}

/// 결측치 표기 (FRED는 ".", Stooq는 빈 칸이나 "nan"/"N/D")
fn is_missing(raw: &str) -> bool {
    raw.is_empty() || raw == "." || raw.eq_ignore_ascii_case("nan") || raw.eq_ignore_ascii_case("n/d")
}

pub(crate) fn parse_csv_series(body: &str, date: Column<'_>, value: Column<'_>) -> Result<ParsedSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader.headers()?.clone();
    let resolve = |column: Column<'_>| -> Option<usize> {
        match column {
            Column::Named(name) => headers.iter().position(|h| h.eq_ignore_ascii_case(name)),
            Column::Index(idx) => (idx < headers.len()).then_some(idx),
        }
    };

    let (date_idx, value_idx) = match (resolve(date), resolve(value)) {
        (Some(d), Some(v)) if d != v => (d, v),
        _ => {
            let preview: String = body.chars().take(40).collect();
            return Err(SourceError::Parse(format!(
                "필수 열 없음 (헤더: {:?}, 본문: {:?})",
                headers.iter().collect::<Vec<_>>(),
                preview
            )));
        }
    };

    let mut points = Vec::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                tracing::trace!(error = %e, "CSV 행 파싱 실패, 건너뜀");
                skipped += 1;
                continue;
            }
        };

        let (Some(date), Some(raw)) = (record.get(date_idx), record.get(value_idx)) else {
            skipped += 1;
            continue;
        };

        if date.is_empty() || is_missing(raw) {
            skipped += 1;
            continue;
        }

        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => points.push(SeriesPoint::new(date, v)),
            _ => skipped += 1,
        }
    }

    Ok(ParsedSeries {
        series: TimeSeries::from_points(points),
        skipped,
    })
}
