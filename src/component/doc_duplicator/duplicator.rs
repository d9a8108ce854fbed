use crate::tools::validate_file_exists;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct DuplicationReport {
    pub created: Vec<PathBuf>,
}

/// 產生 `<主檔名>_<標籤>.<副檔名>`，與輸入檔位於同一資料夾
#[must_use]
pub fn labeled_copy_path(input: &Path, label: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match input.extension() {
        Some(ext) => format!("{stem}_{label}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{label}"),
    };

    input.with_file_name(file_name)
}

/// 將輸入檔逐位元組複製為每個標籤一份
///
/// 輸入檔不存在時不會產生任何檔案。某一份複製失敗時立即回報該目標路徑，
/// 已完成的複製保留不回復。
pub fn duplicate_with_labels<F>(
    input: &Path,
    labels: &[String],
    mut on_created: F,
) -> Result<DuplicationReport>
where
    F: FnMut(&Path),
{
    validate_file_exists(input)?;

    let mut report = DuplicationReport::default();

    for label in labels {
        let target = labeled_copy_path(input, label);
        fs::copy(input, &target).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                input.display(),
                target.display()
            )
        })?;

        on_created(&target);
        report.created.push(target);
    }

    info!(
        "Duplicated {} into {} copies",
        input.display(),
        report.created.len()
    );

    Ok(report)
}
