use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 遞迴掃描檔名以指定字尾結尾的檔案
///
/// 比對使用原始檔名字串，區分大小寫；同一資料夾內依檔名排序，
/// 讓每次執行的處理順序一致。
pub fn scan_video_files(directory: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut video_files = Vec::new();

    for entry in WalkDir::new(directory)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(extension) {
            video_files.push(entry.into_path());
        }
    }

    Ok(video_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_video_files_recursive_and_ordered() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("season1");
        fs::create_dir_all(&nested).unwrap();

        fs::write(temp_dir.path().join("b.mp4"), b"b").unwrap();
        fs::write(temp_dir.path().join("a.mp4"), b"a").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), b"n").unwrap();
        fs::write(temp_dir.path().join("upper.MP4"), b"u").unwrap();
        fs::write(nested.join("c.mp4"), b"c").unwrap();

        let files = scan_video_files(temp_dir.path(), ".mp4").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(temp_dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            names,
            vec![
                PathBuf::from("a.mp4"),
                PathBuf::from("b.mp4"),
                PathBuf::from("season1/c.mp4"),
            ]
        );
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(scan_video_files(temp_dir.path(), ".mp4").unwrap().is_empty());
    }
}
