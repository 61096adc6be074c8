//! 에러 타입 정의.
//!
//! 데이터 소스 실패는 어댑터 안에서 빈 결과로 복구되므로 여기에 오지 않습니다.
//! 실행을 실패시키는 것은 설정 오류와 스냅샷 저장 실패뿐입니다.

use std::path::PathBuf;
use thiserror::Error;

/// Collector 에러 타입
#[derive(Debug, Error)]
pub enum CollectorError {
    /// 설정 에러
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP 클라이언트 생성 실패
    #[error("Data source setup error: {0}")]
    SourceSetup(#[from] brief_data::SourceError),

    /// 스냅샷 직렬화 실패
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 스냅샷 저장 실패
    #[error("Snapshot write error ({}): {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CollectorError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;
