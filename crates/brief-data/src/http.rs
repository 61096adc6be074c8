//! 공용 HTTP 클라이언트 구성.

use reqwest::Client;
use std::time::Duration;

use crate::error::{Result, SourceError};

/// 요청당 기본 타임아웃.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(25);

const USER_AGENT: &str = "Mozilla/5.0 (compatible; market-brief/0.1; +daily snapshot)";

/// 어댑터들이 공유하는 reqwest 클라이언트 생성.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .user_agent(USER_AGENT)
        .build()
        .map_err(SourceError::from)
}

/// GET 요청 후 본문 문자열 반환.
///
/// reqwest 타임아웃과 별개로 `tokio::time::timeout`으로 한 번 더 감싸서,
/// 본문 수신이 늘어져도 요청당 시간이 제한되도록 합니다.
pub(crate) async fn get_text(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
    timeout: Duration,
) -> Result<String> {
    match tokio::time::timeout(timeout, send_and_read(client, url, query)).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout(format!(
            "{} ({}초)",
            url,
            timeout.as_secs()
        ))),
    }
}

async fn send_and_read(client: &Client, url: &str, query: &[(&str, &str)]) -> Result<String> {
    let response = client.get(url).query(query).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_text_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = build_client(DEFAULT_TIMEOUT).unwrap();
        let url = format!("{}/missing", server.url());
        let err = get_text(&client, &url, &[], DEFAULT_TIMEOUT)
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_get_text_passes_query() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/q")
            .match_query(mockito::Matcher::UrlEncoded("id".into(), "DGS10".into()))
            .with_body("ok")
            .create_async()
            .await;

        let client = build_client(DEFAULT_TIMEOUT).unwrap();
        let url = format!("{}/q", server.url());
        let body = get_text(&client, &url, &[("id", "DGS10")], DEFAULT_TIMEOUT)
            .await
            .unwrap();

        assert_eq!(body, "ok");
    }
}
