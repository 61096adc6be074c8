//! 연준 FOMC 일정 페이지 스크래퍼.
//!
//! 페이지 구조가 자주 바뀌므로 HTML 선택자 대신 화면에 보이는 텍스트 줄을
//! 기준으로 읽습니다. 네트워크 호출과 파싱을 분리해 두었고, 파싱은
//! [`extract_events`] 순수 함수로 고정 샘플 문서에 대해 테스트합니다.
//!
//! ## 파싱 규칙
//! 1. `"{year} FOMC Meetings"`와 정확히 같은 줄을 기준점으로 삼음 (없으면 빈 목록)
//! 2. 기준점 뒤 최대 80줄, 다른 연도의 기준점이 나오면 중단
//! 3. 월 이름 줄은 현재 월을 바꿈
//! 4. `28-29`, `18-19*` 같은 날짜 줄은 정례회의 (`*`는 SEP 발표)
//! 5. `Minutes`, `Press Conference` 등 키워드 줄은 일반 일정
//! 6. 최대 6건

use brief_core::format::PLACEHOLDER;
use brief_core::EventItem;
use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::node::Node;
use scraper::Html;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::http::get_text;

/// FOMC 일정 페이지 URL.
pub const FOMC_CALENDAR_URL: &str =
    "https://www.federalreserve.gov/monetarypolicy/fomccalendars.htm";

/// 최대 일정 수.
pub const MAX_EVENTS: usize = 6;

/// 기준점 이후 살펴볼 최대 줄 수.
const SCAN_WINDOW: usize = 80;

const EVENT_KEYWORDS: [&str; 5] = [
    "Meeting",
    "Minutes",
    "Press Conference",
    "Statement",
    "Testimony",
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MEETING_TITLE: &str = "FOMC 정례회의";
const SEP_NOTE: &str = "SEP 발표 회의";
const OFFICIAL_NOTE: &str = "연준 공식 일정";

static DATE_RANGE_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})(?:\s*[-–]\s*(\d{1,2}))?(\*)?(?:\s|$)").ok());

static ANCHOR_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\d{4} FOMC Meetings$").ok());

/// 문서에서 보이는 텍스트 줄 추출 (script/style 제외, 빈 줄 제거).
pub fn visible_lines(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| matches!(e.name(), "script" | "style" | "noscript" | "title"))
        });
        if hidden {
            continue;
        }
        lines.extend(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        );
    }

    lines
}

/// 일정 페이지 HTML에서 해당 연도의 FOMC 일정 추출.
pub fn extract_events(html: &str, year: i32) -> Vec<EventItem> {
    extract_from_lines(&visible_lines(html), year)
}

/// 텍스트 줄에서 FOMC 일정 추출.
pub fn extract_from_lines(lines: &[String], year: i32) -> Vec<EventItem> {
    let anchor = format!("{} FOMC Meetings", year);
    let Some(start) = lines.iter().position(|l| *l == anchor) else {
        debug!(year = year, "FOMC 기준점 없음");
        return Vec::new();
    };

    let mut events: Vec<EventItem> = Vec::new();
    let mut month: Option<&str> = None;

    for line in lines.iter().skip(start + 1).take(SCAN_WINDOW) {
        if events.len() >= MAX_EVENTS {
            break;
        }
        let line = line.as_str();

        if is_anchor(line) {
            break;
        }

        if is_month_line(line) {
            month = Some(line);
            continue;
        }

        let date = leading_date(line);

        if EVENT_KEYWORDS.iter().any(|k| line.contains(k)) {
            let title = date.as_ref().map_or(line, |d| d.rest);
            // "Statement:" 같은 빈 라벨은 건너뜀
            if title.is_empty() || title.ends_with(':') {
                continue;
            }
            push_unique(
                &mut events,
                EventItem {
                    when: compose_when(month, date.as_ref().map(|d| d.range.as_str())),
                    title: title.to_string(),
                    note: OFFICIAL_NOTE.to_string(),
                },
            );
            continue;
        }

        if let (Some(m), Some(d)) = (month, date) {
            push_unique(
                &mut events,
                EventItem {
                    when: compose_when(Some(m), Some(d.range.as_str())),
                    title: MEETING_TITLE.to_string(),
                    note: (if d.sep { SEP_NOTE } else { OFFICIAL_NOTE }).to_string(),
                },
            );
        }
    }

    events
}

fn push_unique(events: &mut Vec<EventItem>, event: EventItem) {
    if !events.contains(&event) {
        events.push(event);
    }
}

fn is_anchor(line: &str) -> bool {
    ANCHOR_RE.as_ref().is_some_and(|re| re.is_match(line))
}

/// `"March"`, `"Apr/May"` 같은 월 표기인지.
fn is_month_line(line: &str) -> bool {
    line.split('/').all(|part| {
        let part = part.trim();
        part.len() >= 3
            && MONTHS
                .iter()
                .any(|m| m.to_ascii_lowercase().starts_with(&part.to_ascii_lowercase()))
    })
}

struct DateToken<'a> {
    range: String,
    sep: bool,
    rest: &'a str,
}

fn leading_date(line: &str) -> Option<DateToken<'_>> {
    let caps = DATE_RANGE_RE.as_ref()?.captures(line)?;
    let first = caps.get(1)?.as_str();
    let range = match caps.get(2) {
        Some(last) => format!("{}-{}", first, last.as_str()),
        None => first.to_string(),
    };
    let end = caps.get(0)?.end();
    Some(DateToken {
        range,
        sep: caps.get(3).is_some(),
        rest: line[end..].trim(),
    })
}

fn compose_when(month: Option<&str>, range: Option<&str>) -> String {
    match (month, range) {
        (Some(m), Some(r)) => format!("{} {}", m, r),
        (Some(m), None) => m.to_string(),
        (None, Some(r)) => r.to_string(),
        (None, None) => PLACEHOLDER.to_string(),
    }
}

/// FOMC 일정 클라이언트.
#[derive(Debug, Clone)]
pub struct FomcClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl FomcClient {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            url: FOMC_CALENDAR_URL.to_string(),
            timeout,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// 올해 FOMC 일정 조회. 실패 시 빈 목록.
    pub async fn fetch_schedule(&self) -> Vec<EventItem> {
        self.fetch_schedule_for(Utc::now().year()).await
    }

    pub async fn fetch_schedule_for(&self, year: i32) -> Vec<EventItem> {
        match self.try_fetch_schedule(year).await {
            Ok(events) => {
                if events.is_empty() {
                    info!(year = year, "FOMC 일정을 찾지 못함");
                } else {
                    debug!(year = year, count = events.len(), "FOMC 일정 수신");
                }
                events
            }
            Err(e) => {
                warn!(year = year, error = %e, "FOMC 일정 조회 실패, 빈 목록 사용");
                Vec::new()
            }
        }
    }

    pub async fn try_fetch_schedule(&self, year: i32) -> Result<Vec<EventItem>> {
        let html = get_text(&self.client, &self.url, &[], self.timeout).await?;
        Ok(extract_events(&html, year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{build_client, DEFAULT_TIMEOUT};

    const CALENDAR: &str = r#"<html><head><title>2025 FOMC Meetings</title>
<style>.panel { color: red; }</style></head>
<body>
<h4>2025 FOMC Meetings</h4>
<div class="panel"><div>January</div><div>28-29</div><div>Statement:</div><a href="/s.pdf">PDF</a></div>
<div class="panel"><div>March</div><div>18-19*</div><a>Press Conference</a></div>
<div class="panel"><div>May</div><div>6-7</div></div>
<div class="panel"><div>June</div><div>16–17*</div></div>
<div class="panel"><div>July</div><div>29-30</div></div>
<div class="panel"><div>September</div><div>16-17*</div></div>
<div class="panel"><div>October</div><div>28-29</div></div>
<h4>2026 FOMC Meetings</h4>
<div class="panel"><div>January</div><div>27-28</div></div>
<script>var anchor = "2027 FOMC Meetings";</script>
</body></html>"#;

    fn ev(when: &str, title: &str, note: &str) -> EventItem {
        EventItem {
            when: when.into(),
            title: title.into(),
            note: note.into(),
        }
    }

    #[test]
    fn test_visible_lines_skip_hidden() {
        let lines = visible_lines(CALENDAR);
        assert_eq!(lines[0], "2025 FOMC Meetings");
        assert!(!lines.iter().any(|l| l.contains("color")));
        assert!(!lines.iter().any(|l| l.contains("2027")));
    }

    #[test]
    fn test_extract_events_cap_and_notes() {
        let events = extract_events(CALENDAR, 2025);
        assert_eq!(
            events,
            vec![
                ev("January 28-29", MEETING_TITLE, OFFICIAL_NOTE),
                ev("March 18-19", MEETING_TITLE, SEP_NOTE),
                ev("March", "Press Conference", OFFICIAL_NOTE),
                ev("May 6-7", MEETING_TITLE, OFFICIAL_NOTE),
                ev("June 16-17", MEETING_TITLE, SEP_NOTE),
                ev("July 29-30", MEETING_TITLE, OFFICIAL_NOTE),
            ]
        );
    }

    #[test]
    fn test_extract_events_stops_at_next_year() {
        let lines: Vec<String> = ["2025 FOMC Meetings", "December", "9-10*", "2026 FOMC Meetings", "January", "27-28"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            extract_from_lines(&lines, 2025),
            vec![ev("December 9-10", MEETING_TITLE, SEP_NOTE)]
        );
        assert_eq!(
            extract_events(CALENDAR, 2026),
            vec![ev("January 27-28", MEETING_TITLE, OFFICIAL_NOTE)]
        );
    }

    #[test]
    fn test_extract_events_missing_anchor() {
        assert!(extract_events(CALENDAR, 2024).is_empty());
        assert!(extract_events("<html><body>Service unavailable</body></html>", 2025).is_empty());
        assert!(extract_events("", 2025).is_empty());
    }

    #[test]
    fn test_keyword_line_with_leading_date() {
        let lines: Vec<String> = ["2025 FOMC Meetings", "Apr/May", "30-1", "19 Minutes of the meeting released", "Testimony"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            extract_from_lines(&lines, 2025),
            vec![
                ev("Apr/May 30-1", MEETING_TITLE, OFFICIAL_NOTE),
                ev("Apr/May 19", "Minutes of the meeting released", OFFICIAL_NOTE),
                ev("Apr/May", "Testimony", OFFICIAL_NOTE),
            ]
        );
    }

    #[test]
    fn test_date_without_month_is_ignored() {
        let lines: Vec<String> = ["2025 FOMC Meetings", "28-29", "2025"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(extract_from_lines(&lines, 2025).is_empty());
    }

    #[test]
    fn test_is_month_line() {
        assert!(is_month_line("March"));
        assert!(is_month_line("Apr/May"));
        assert!(is_month_line("Oct/Nov"));
        assert!(!is_month_line("Ma"));
        assert!(!is_month_line("Statement"));
        assert!(!is_month_line("28-29"));
    }

    #[tokio::test]
    async fn test_fetch_schedule_from_mock() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/monetarypolicy/fomccalendars.htm")
            .with_body(CALENDAR)
            .create_async()
            .await;

        let client = FomcClient::new(build_client(DEFAULT_TIMEOUT).unwrap(), DEFAULT_TIMEOUT)
            .with_url(format!("{}/monetarypolicy/fomccalendars.htm", server.url()));
        let events = client.fetch_schedule_for(2025).await;

        mock.assert_async().await;
        assert_eq!(events.len(), MAX_EVENTS);
    }

    #[tokio::test]
    async fn test_fetch_schedule_fails_closed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = FomcClient::new(build_client(DEFAULT_TIMEOUT).unwrap(), DEFAULT_TIMEOUT)
            .with_url(server.url());
        assert!(client.fetch_schedule_for(2025).await.is_empty());
    }
}
