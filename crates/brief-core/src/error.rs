//! 핵심 도메인 에러 타입.

use thiserror::Error;

/// 도메인 불변식 위반 에러.
///
/// 파이프라인 자체는 실패하지 않으며, 이 에러는 외부에서 들어온 문서
/// (역직렬화된 스냅샷 등)가 불변식을 깨뜨릴 때만 발생합니다.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BriefError {
    /// 정렬된 시계열 길이가 기준 날짜 축과 다름
    #[error("시계열 길이 불일치 ({name}): 기대 {expected}, 실제 {actual}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 도메인 작업을 위한 Result 타입.
pub type BriefResult<T> = Result<T, BriefError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_message() {
        let err = BriefError::LengthMismatch {
            name: "spx".to_string(),
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "시계열 길이 불일치 (spx): 기대 3, 실제 2"
        );
    }
}
