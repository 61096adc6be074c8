//! 표시용 문자열 포맷터.

use chrono::{DateTime, Utc};
use chrono_tz::Asia::Seoul;

use crate::metric::Metric;

/// 값이 없을 때 표시하는 자리표시자.
pub const PLACEHOLDER: &str = "-";

/// 천 단위 구분 쉼표가 들어간 가격 문자열.
///
/// ```
/// use brief_core::format::fmt_price;
/// assert_eq!(fmt_price(1234567.891, 2), "1,234,567.89");
/// assert_eq!(fmt_price(-999.5, 1), "-999.5");
/// ```
pub fn fmt_price(value: f64, digits: usize) -> String {
    let raw = format!("{:.*}", digits, value);
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// 값이 있으면 가격 문자열, 없으면 `"-"`.
pub fn fmt_price_opt(value: Option<f64>, digits: usize) -> String {
    value
        .map(|v| fmt_price(v, digits))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// 부호 포함 변동률 (예: `+1.23%`, `-0.40%`).
pub fn fmt_signed_pct(pct: f64) -> String {
    format!("{:+.2}%", pct)
}

/// 방향 화살표. 0 이상은 상승으로 봅니다.
pub fn direction_glyph(pct: f64) -> &'static str {
    if pct >= 0.0 {
        "↑"
    } else {
        "↓"
    }
}

/// 가격 + 방향 + 절대 변동률 (예: `181.20 (↑1.25%)`).
/// 전일 대비 변동률을 계산할 수 없으면 `"-"`.
pub fn fmt_price_with_change(metric: &Metric) -> String {
    match metric.latest {
        Some(price) if metric.has_change() => format!(
            "{} ({}{:.2}%)",
            fmt_price(price, 2),
            direction_glyph(metric.percent_change),
            metric.percent_change.abs()
        ),
        _ => PLACEHOLDER.to_string(),
    }
}

/// KST 기준 생성 시각 문자열 (예: `2025-01-31 07:30 KST`).
pub fn format_kst(at: DateTime<Utc>) -> String {
    at.with_timezone(&Seoul).format("%Y-%m-%d %H:%M KST").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fmt_price_grouping() {
        assert_eq!(fmt_price(0.0, 2), "0.00");
        assert_eq!(fmt_price(999.0, 2), "999.00");
        assert_eq!(fmt_price(1000.0, 2), "1,000.00");
        assert_eq!(fmt_price(6123.456, 2), "6,123.46");
        assert_eq!(fmt_price(104.1234, 3), "104.123");
        assert_eq!(fmt_price(-12345.0, 0), "-12,345");
    }

    #[test]
    fn test_fmt_price_opt() {
        assert_eq!(fmt_price_opt(None, 2), "-");
        assert_eq!(fmt_price_opt(Some(71.5), 2), "71.50");
    }

    #[test]
    fn test_fmt_signed_pct() {
        assert_eq!(fmt_signed_pct(1.234), "+1.23%");
        assert_eq!(fmt_signed_pct(-0.4), "-0.40%");
        assert_eq!(fmt_signed_pct(0.0), "+0.00%");
    }

    #[test]
    fn test_fmt_price_with_change() {
        let up = Metric { latest: Some(181.2), previous: Some(178.97), percent_change: 1.25 };
        let down = Metric { latest: Some(1500.0), previous: Some(1538.46), percent_change: -2.5 };
        assert_eq!(fmt_price_with_change(&up), "181.20 (↑1.25%)");
        assert_eq!(fmt_price_with_change(&down), "1,500.00 (↓2.50%)");
        assert_eq!(fmt_price_with_change(&Metric::default()), "-");
    }

    #[test]
    fn test_fmt_price_with_change_needs_previous() {
        let single = Metric { latest: Some(181.2), previous: None, percent_change: 0.0 };
        assert_eq!(fmt_price_with_change(&single), "-");

        let zero_prev = Metric { latest: Some(5.0), previous: Some(0.0), percent_change: 0.0 };
        assert_eq!(fmt_price_with_change(&zero_prev), "-");
    }

    #[test]
    fn test_format_kst() {
        let at = Utc.with_ymd_and_hms(2025, 1, 30, 22, 30, 0).unwrap();
        assert_eq!(format_kst(at), "2025-01-31 07:30 KST");
    }
}
