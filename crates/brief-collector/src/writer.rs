//! 스냅샷 파일 저장.
//!
//! 같은 디렉터리에 임시 파일을 쓴 뒤 이름을 바꿔서, 읽는 쪽이 반쯤 쓰인
//! 파일을 보지 않도록 합니다. 저장 실패는 실행 실패로 올라갑니다.

use brief_core::Snapshot;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{CollectorError, Result};

/// 스냅샷 저장기.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    path: PathBuf,
}

impl SnapshotWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 보기 좋게 들여쓴 JSON으로 저장 (이전 파일 전체 교체).
    pub async fn write(&self, snapshot: &Snapshot) -> Result<()> {
        let json = to_pretty_json(snapshot)?;

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| CollectorError::write(dir, e))?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                CollectorError::Config(format!(
                    "스냅샷 경로에 파일 이름이 없습니다: {}",
                    self.path.display()
                ))
            })?;
        let tmp = dir.join(format!(".{}.tmp", file_name));

        tokio::fs::write(&tmp, json.as_bytes())
            .await
            .map_err(|e| CollectorError::write(&tmp, e))?;

        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(CollectorError::write(&self.path, e));
        }

        info!(path = %self.path.display(), bytes = json.len(), "스냅샷 저장 완료");
        Ok(())
    }
}

/// 스냅샷 JSON 문자열 (끝에 줄바꿈 포함).
pub fn to_pretty_json(snapshot: &Snapshot) -> Result<String> {
    let mut json = serde_json::to_string_pretty(snapshot)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::{assemble, SnapshotInputs};
    use chrono::{TimeZone, Utc};

    fn sample() -> Snapshot {
        let at = Utc.with_ymd_and_hms(2025, 1, 31, 22, 30, 0).unwrap();
        assemble(SnapshotInputs::default(), at)
    }

    #[tokio::test]
    async fn test_write_creates_parent_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("latest.json");
        let writer = SnapshotWriter::new(&path);
        let snapshot = sample();

        writer.write(&snapshot).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: Snapshot = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, snapshot);
        assert!(raw.contains("\"updatedAt\": \"2025-02-01 07:30 KST\""));
        assert!(!dir.path().join("data").join(".latest.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_replaces_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latest.json");
        std::fs::write(&path, "old contents that are not json").unwrap();

        SnapshotWriter::new(&path).write(&sample()).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with('{'));
    }

    #[tokio::test]
    async fn test_write_failure_is_surfaced() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let writer = SnapshotWriter::new(blocker.join("latest.json"));
        let err = writer.write(&sample()).await.unwrap_err();
        assert!(matches!(err, CollectorError::Write { .. }));
    }
}
