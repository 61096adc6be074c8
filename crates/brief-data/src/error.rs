//! 데이터 소스 오류 타입.
//!
//! 이 오류는 어댑터 내부에서만 쓰입니다. 공개 `fetch_*` 진입점은 오류를
//! 로그로 남기고 빈 결과를 돌려줍니다.

use thiserror::Error;

/// 데이터 소스 관련 오류.
#[derive(Debug, Error)]
pub enum SourceError {
    /// 전송 계층 오류 (연결 실패, TLS 등)
    #[error("HTTP 요청 실패: {0}")]
    Http(#[from] reqwest::Error),

    /// 2xx가 아닌 응답
    #[error("HTTP 상태 오류 ({status}): {url}")]
    Status { status: u16, url: String },

    /// 요청 시간 초과
    #[error("요청 시간 초과: {0}")]
    Timeout(String),

    /// 응답 형식 오류
    #[error("파싱 실패: {0}")]
    Parse(String),

    /// 응답은 정상이지만 쓸 데이터가 없음
    #[error("데이터 없음: {0}")]
    Empty(String),
}

impl SourceError {
    /// 일시적 장애인지 여부 (로그 레벨 판단용).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Parse(_) | Self::Empty(_) => false,
        }
    }
}

impl From<csv::Error> for SourceError {
    fn from(err: csv::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_transient() {
        assert!(SourceError::Timeout("x".into()).is_transient());
        assert!(SourceError::Status { status: 503, url: "u".into() }.is_transient());
        assert!(SourceError::Status { status: 429, url: "u".into() }.is_transient());
        assert!(!SourceError::Status { status: 404, url: "u".into() }.is_transient());
        assert!(!SourceError::Parse("bad".into()).is_transient());
    }
}
