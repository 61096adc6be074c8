//! Google 뉴스 RSS 검색 클라이언트.
//!
//! 검색어별 RSS 피드를 받아 상위 뉴스 목록으로 정리합니다.
//!
//! ## 엔드포인트
//! - `GET /rss/search?q={query}&hl=ko&gl=KR&ceid=KR:ko`
//!
//! ## 정리 규칙
//! - 제목 `"헤드라인 - 언론사"`는 마지막 `" - "` 기준으로 나눔
//! - 요약은 태그 제거, 엔티티 복원, 공백 정리 후 140자로 자름
//! - 같은 헤드라인(대소문자/공백 무시)은 한 번만
//! - 최대 5건

use brief_core::format::PLACEHOLDER;
use brief_core::NewsItem;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{Result, SourceError};
use crate::http::get_text;

/// Google 뉴스 기본 URL.
pub const NEWS_BASE_URL: &str = "https://news.google.com";

/// 요약 최대 길이 (문자 수).
pub const SUMMARY_MAX_CHARS: usize = 140;

/// 검색어당 최대 뉴스 수.
pub const MAX_NEWS_ITEMS: usize = 5;

const ELLIPSIS: char = '…';

static CDATA_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").ok());

static TAG_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"<[^>]*>").ok());

/// RSS `<item>` 하나의 원문.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub description: String,
}

/// RSS 본문에서 항목 추출.
///
/// RSS를 HTML 파서로 읽기 때문에 CDATA 구간은 미리 풀어 둡니다.
pub fn parse_feed(body: &str) -> Vec<FeedEntry> {
    let unwrapped = match CDATA_RE.as_ref() {
        Some(re) => re.replace_all(body, "$1").into_owned(),
        None => body.to_string(),
    };
    let document = Html::parse_document(&unwrapped);

    let (Ok(item_sel), Ok(title_sel), Ok(desc_sel)) = (
        Selector::parse("item"),
        Selector::parse("title"),
        Selector::parse("description"),
    ) else {
        return Vec::new();
    };

    document
        .select(&item_sel)
        .filter_map(|item| {
            let title = item
                .select(&title_sel)
                .next()
                .map(|t| t.text().collect::<String>())?;
            let description = item
                .select(&desc_sel)
                .next()
                .map(|d| d.text().collect::<String>())
                .unwrap_or_default();
            Some(FeedEntry {
                title: collapse_whitespace(&title),
                description,
            })
        })
        .filter(|entry| !entry.title.is_empty())
        .collect()
}

/// 제목을 (헤드라인, 언론사)로 분리.
pub fn split_source(raw_title: &str) -> (String, String) {
    match raw_title.rsplit_once(" - ") {
        Some((headline, source)) if !headline.trim().is_empty() && !source.trim().is_empty() => {
            (headline.trim().to_string(), source.trim().to_string())
        }
        _ => (raw_title.trim().to_string(), PLACEHOLDER.to_string()),
    }
}

/// 요약 정리: 태그 제거, 엔티티 복원, 공백 정리, 길이 제한.
pub fn clean_summary(raw: &str) -> String {
    let stripped = match TAG_RE.as_ref() {
        Some(re) => re.replace_all(raw, " ").into_owned(),
        None => raw.to_string(),
    };
    truncate_chars(&collapse_whitespace(&decode_entities(&stripped)), SUMMARY_MAX_CHARS)
}

/// `max`자를 넘으면 잘라서 말줄임표를 붙입니다. 말줄임표까지 `max`자 이내.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.truncate(out.trim_end().len());
    out.push(ELLIPSIS);
    out
}

/// 제목에 강조 키워드가 단어 단위로 들어있는지 (대소문자 구분).
pub fn is_starred(title: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .any(|k| contains_word(title, k))
}

fn contains_word(haystack: &str, word: &str) -> bool {
    haystack.match_indices(word).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + word.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// 피드 항목을 뉴스 목록으로 정리 (중복 제거, 최대 `limit`건).
pub fn build_news(entries: Vec<FeedEntry>, highlight: &[String], limit: usize) -> Vec<NewsItem> {
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for entry in entries {
        if items.len() >= limit {
            break;
        }
        let (headline, source) = split_source(&entry.title);
        if headline.is_empty() || !seen.insert(dedup_key(&headline)) {
            continue;
        }
        items.push(NewsItem {
            starred: is_starred(&headline, highlight),
            short_reason: clean_summary(&entry.description),
            title: headline,
            source,
        });
    }

    items
}

fn dedup_key(headline: &str) -> String {
    collapse_whitespace(headline).to_lowercase()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// 뉴스 RSS 클라이언트.
#[derive(Debug, Clone)]
pub struct NewsClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl NewsClient {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            base_url: NEWS_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// 검색어로 상위 뉴스 조회. 실패 시 빈 목록.
    pub async fn fetch_news(&self, query: &str, highlight: &[String]) -> Vec<NewsItem> {
        match self.try_fetch_news(query, highlight).await {
            Ok(items) => {
                debug!(query = query, count = items.len(), "뉴스 수신");
                items
            }
            Err(e) => {
                warn!(query = query, error = %e, "뉴스 조회 실패, 빈 목록 사용");
                Vec::new()
            }
        }
    }

    pub async fn try_fetch_news(&self, query: &str, highlight: &[String]) -> Result<Vec<NewsItem>> {
        let url = format!("{}/rss/search", self.base_url);
        let body = get_text(
            &self.client,
            &url,
            &[("q", query), ("hl", "ko"), ("gl", "KR"), ("ceid", "KR:ko")],
            self.timeout,
        )
        .await?;

        let entries = parse_feed(&body);
        if entries.is_empty() {
            return Err(SourceError::Empty(format!("RSS 항목 없음: {}", query)));
        }
        Ok(build_news(entries, highlight, MAX_NEWS_ITEMS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{build_client, DEFAULT_TIMEOUT};
    use mockito::Matcher;

    const FEED: &str = r##"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<rss version="2.0"><channel><title>"미국 증시" - Google 뉴스</title>
<item><title>엔비디아, 신고가 경신 - 한국경제</title><link>https://news.google.com/a1</link><description>&lt;a href="https://news.google.com/a1"&gt;엔비디아, 신고가 경신&lt;/a&gt;&amp;nbsp;&amp;nbsp;&lt;font color="#6f6f6f"&gt;한국경제&lt;/font&gt;</description><source url="https://www.hankyung.com">한국경제</source></item>
<item><title><![CDATA[NVDA earnings beat & guidance - Reuters]]></title><description><![CDATA[<p>Nvidia &amp; partners <b>beat</b></p>]]></description></item>
<item><title>엔비디아,  신고가 경신 - 연합뉴스</title><description>중복</description></item>
<item><title>뉴욕증시, 금리 부담에 혼조 - 연합뉴스</title><description>혼조 마감</description></item>
<item><title>달러 강세 지속 - 매일경제</title><description>달러</description></item>
<item><title>유가 급락 - 서울경제</title><description>유가</description></item>
<item><title>국채금리 상승 - 이데일리</title><description>금리</description></item>
</channel></rss>"##;

    #[test]
    fn test_parse_feed_items_only() {
        let entries = parse_feed(FEED);
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[0].title, "엔비디아, 신고가 경신 - 한국경제");
        assert_eq!(entries[1].title, "NVDA earnings beat & guidance - Reuters");
    }

    #[test]
    fn test_build_news_dedup_and_limit() {
        let items = build_news(parse_feed(FEED), &["NVDA".to_string()], MAX_NEWS_ITEMS);

        assert_eq!(items.len(), 5);
        assert_eq!(items[0].title, "엔비디아, 신고가 경신");
        assert_eq!(items[0].source, "한국경제");
        assert_eq!(items[0].short_reason, "엔비디아, 신고가 경신 한국경제");
        assert!(!items[0].starred);

        assert_eq!(items[1].short_reason, "Nvidia & partners beat");
        assert!(items[1].starred);

        // 중복 헤드라인은 빠지고 다음 항목이 올라옴
        assert_eq!(items[2].title, "뉴욕증시, 금리 부담에 혼조");
        assert_eq!(items[4].title, "유가 급락");
    }

    #[test]
    fn test_build_news_dedup_ignores_case() {
        let entries = vec![
            FeedEntry {
                title: "NVDA Rally - Reuters".to_string(),
                description: "first".to_string(),
            },
            FeedEntry {
                title: "nvda rally - Bloomberg".to_string(),
                description: "second".to_string(),
            },
        ];
        let items = build_news(entries, &[], MAX_NEWS_ITEMS);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source, "Reuters");
        assert_eq!(items[0].short_reason, "first");
    }

    #[test]
    fn test_split_source() {
        assert_eq!(
            split_source("Fed holds rates - steady - Bloomberg"),
            ("Fed holds rates - steady".to_string(), "Bloomberg".to_string())
        );
        assert_eq!(
            split_source("제목만 있음"),
            ("제목만 있음".to_string(), "-".to_string())
        );
    }

    #[test]
    fn test_clean_summary_truncates() {
        let long = "가".repeat(200);
        let summary = clean_summary(&long);
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS);
        assert!(summary.ends_with('…'));

        let spaced = format!("{} {}", "a".repeat(SUMMARY_MAX_CHARS - 2), "b".repeat(10));
        let summary = clean_summary(&spaced);
        assert!(summary.chars().count() <= SUMMARY_MAX_CHARS);
        assert_eq!(summary, format!("{}…", "a".repeat(SUMMARY_MAX_CHARS - 2)));

        let exact = "a".repeat(SUMMARY_MAX_CHARS);
        assert_eq!(clean_summary(&exact), exact);
    }

    #[test]
    fn test_clean_summary_entities() {
        assert_eq!(clean_summary("A &amp;lt; B &quot;x&quot;"), "A &lt; B \"x\"");
        assert_eq!(clean_summary("<b>굵게</b>\n\n  본문"), "굵게 본문");
    }

    #[test]
    fn test_is_starred_whole_word() {
        let keywords = vec!["NVDA".to_string(), "TSLA".to_string()];
        assert!(is_starred("NVDA hits record", &keywords));
        assert!(is_starred("(TSLA) 급등", &keywords));
        assert!(!is_starred("NVDAX fund launch", &keywords));
        assert!(!is_starred("nvda lower case", &keywords));
        assert!(!is_starred("anything", &[]));
    }

    #[tokio::test]
    async fn test_fetch_news_from_mock() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rss/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "미국 증시".into()),
                Matcher::UrlEncoded("ceid".into(), "KR:ko".into()),
            ]))
            .with_body(FEED)
            .create_async()
            .await;

        let client = NewsClient::new(build_client(DEFAULT_TIMEOUT).unwrap(), DEFAULT_TIMEOUT)
            .with_base_url(server.url());
        let items = client.fetch_news("미국 증시", &[]).await;

        mock.assert_async().await;
        assert_eq!(items.len(), 5);
    }

    #[tokio::test]
    async fn test_fetch_news_non_feed_fails_closed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", Matcher::Any)
            .with_body("<html><body>captcha</body></html>")
            .create_async()
            .await;

        let client = NewsClient::new(build_client(DEFAULT_TIMEOUT).unwrap(), DEFAULT_TIMEOUT)
            .with_base_url(server.url());
        assert!(client.fetch_news("증시", &[]).await.is_empty());
    }
}
