//! 스냅샷 파일 출력.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use radar_core::{RadarResult, Snapshot};

/// 요약 파일 이름.
pub const SUMMARY_FILENAME: &str = "stress_summary.txt";

/// 스냅샷 레코드를 `<dir>/stress_summary.txt`에 JSON으로 기록합니다.
///
/// 디렉토리가 없으면 생성합니다.
pub fn write_snapshot(dir: &Path, snapshot: &Snapshot) -> RadarResult<PathBuf> {
    fs::create_dir_all(dir)?;

    let path = dir.join(SUMMARY_FILENAME);
    fs::write(&path, snapshot.to_json_pretty()?)?;

    info!(path = %path.display(), "Snapshot written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use radar_core::Score;

    #[test]
    fn test_write_snapshot_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output");
        let snapshot = Snapshot::new(
            Score::clamped(46.9),
            Score::clamped(30.05),
            Score::clamped(70.0),
            vec!["CPI this week.".to_string()],
            Local::now(),
        );

        let path = write_snapshot(&out, &snapshot).unwrap();
        assert_eq!(path, out.join("stress_summary.txt"));

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["overall"], 46);
        assert_eq!(value["status"], "STRESSED");
        assert_eq!(value["equities"], 30);
        assert_eq!(value["crypto"], 70);
        assert_eq!(value["notes"][0], "CPI this week.");
        assert!(value["generated"].is_string());
    }
}
