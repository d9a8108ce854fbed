use super::backend::RecognitionError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no screenshot available, take a screenshot first")]
    NoScreenshot,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
    #[error("screenshot failed: {0}")]
    Capture(String),
    #[error(transparent)]
    Recognition(#[from] RecognitionError),
    #[error("clipboard error: {0}")]
    Clipboard(String),
    #[error("failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// 撤銷結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Undone {
    pub path: PathBuf,
    /// 是否實際刪除了檔案
    pub removed: bool,
}

/// 截圖歷史，最新的項目在最後
///
/// 撤銷會刪除底層檔案，重做只恢復路徑紀錄，檔案不會回來。
#[derive(Debug, Default)]
pub struct CaptureSession {
    history: Vec<PathBuf>,
    redo_stack: Vec<PathBuf>,
}

impl CaptureSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            history: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    #[must_use]
    pub fn history(&self) -> &[PathBuf] {
        &self.history
    }

    #[must_use]
    pub fn redo_stack(&self) -> &[PathBuf] {
        &self.redo_stack
    }

    /// 新的截圖會使重做紀錄失效
    pub fn record_screenshot(&mut self, path: PathBuf) {
        self.history.push(path);
        self.redo_stack.clear();
    }

    pub fn latest(&self) -> Result<&Path, SessionError> {
        self.history
            .last()
            .map(PathBuf::as_path)
            .ok_or(SessionError::NoScreenshot)
    }

    /// 移出最新項目並刪除檔案；刪除失敗時紀錄已移動
    pub fn undo(&mut self) -> Result<Undone, SessionError> {
        let path = self.history.pop().ok_or(SessionError::NothingToUndo)?;
        self.redo_stack.push(path.clone());

        if !path.exists() {
            return Ok(Undone {
                path,
                removed: false,
            });
        }

        match std::fs::remove_file(&path) {
            Ok(()) => Ok(Undone {
                path,
                removed: true,
            }),
            Err(source) => Err(SessionError::Remove { path, source }),
        }
    }

    pub fn redo(&mut self) -> Result<PathBuf, SessionError> {
        let path = self.redo_stack.pop().ok_or(SessionError::NothingToRedo)?;
        self.history.push(path.clone());
        Ok(path)
    }
}
