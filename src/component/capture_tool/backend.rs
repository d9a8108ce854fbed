//! 外部能力：截圖程式、OCR 引擎與系統剪貼簿

use anyhow::{Context, Result, bail};
use arboard::Clipboard;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// 參數中代表輸出路徑的佔位字串
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("image not found: {0}")]
    ImageMissing(PathBuf),
    #[error("OCR engine failed: {0}")]
    Engine(String),
    #[error("no text detected in image")]
    NoTextDetected,
}

pub trait ScreenCapturer {
    /// 擷取目前畫面並寫入 `output`
    fn capture(&self, output: &Path) -> Result<()>;
}

pub trait TextRecognizer {
    fn recognize(&self, image: &Path) -> Result<String, RecognitionError>;
}

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// 以外部程式截圖，例如 `screencapture -x {output}`
#[derive(Debug, Clone)]
pub struct CommandCapturer {
    program: String,
    args: Vec<String>,
}

impl CommandCapturer {
    #[must_use]
    pub const fn new(program: String, args: Vec<String>) -> Self {
        Self { program, args }
    }

    fn build_command(&self, output: &Path) -> Command {
        let output = output.to_string_lossy();
        let mut cmd = Command::new(&self.program);
        cmd.args(
            self.args
                .iter()
                .map(|arg| arg.replace(OUTPUT_PLACEHOLDER, &output)),
        );
        cmd
    }
}

impl ScreenCapturer for CommandCapturer {
    fn capture(&self, output: &Path) -> Result<()> {
        // 先移除上一張截圖，避免程式沒有寫檔時誤用舊圖
        if output.exists() {
            fs::remove_file(output).with_context(|| {
                format!("Failed to remove previous screenshot {}", output.display())
            })?;
        }

        debug!("Running capture program {} {:?}", self.program, self.args);

        let status = self
            .build_command(output)
            .status()
            .with_context(|| format!("Failed to launch {}", self.program))?;

        if !status.success() {
            bail!("{} exited with {status}", self.program);
        }
        if !output.exists() {
            bail!(
                "{} succeeded but {} was not written",
                self.program,
                output.display()
            );
        }
        Ok(())
    }
}

/// 呼叫 tesseract CLI：`tesseract <image> stdout -l <lang>`
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    program: String,
    language: String,
}

impl TesseractRecognizer {
    #[must_use]
    pub const fn new(program: String, language: String) -> Self {
        Self { program, language }
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &Path) -> Result<String, RecognitionError> {
        if !image.is_file() {
            return Err(RecognitionError::ImageMissing(image.to_path_buf()));
        }

        let output = Command::new(&self.program)
            .arg(image)
            .arg("stdout")
            .args(["-l", &self.language])
            .output()
            .map_err(|e| RecognitionError::Engine(format!("{}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognitionError::Engine(stderr.trim().to_string()));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let text = text.trim_end();
        if text.trim().is_empty() {
            return Err(RecognitionError::NoTextDetected);
        }
        Ok(text.to_string())
    }
}

/// 系統剪貼簿
///
/// 在 Linux 上剪貼簿內容由本程序持有，因此實例會保留到工具結束。
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    #[must_use]
    pub const fn new() -> Self {
        Self { clipboard: None }
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new().context("Clipboard unavailable")?,
        };
        self.clipboard
            .insert(clipboard)
            .set_text(text.to_owned())
            .context("Failed to write clipboard")?;
        debug!("Copied {} chars to clipboard", text.chars().count());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_capture_command_substitutes_output() {
        let capturer = CommandCapturer::new(
            "screencapture".to_string(),
            vec!["-x".to_string(), "{output}".to_string()],
        );
        let cmd = capturer.build_command(Path::new("shots/a.png"));
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();

        assert_eq!(cmd.get_program(), "screencapture");
        assert_eq!(args, vec!["-x", "shots/a.png"]);
    }

    #[test]
    fn test_recognizer_reports_missing_image() {
        let temp_dir = TempDir::new().unwrap();
        let recognizer = TesseractRecognizer::new("tesseract".to_string(), "eng".to_string());

        let result = recognizer.recognize(&temp_dir.path().join("gone.png"));
        assert!(matches!(result, Err(RecognitionError::ImageMissing(_))));
    }

    #[test]
    fn test_recognizer_reports_missing_engine() {
        let temp_dir = TempDir::new().unwrap();
        let image = temp_dir.path().join("shot.png");
        std::fs::write(&image, b"not really a png").unwrap();
        let recognizer =
            TesseractRecognizer::new("definitely-not-an-ocr-engine".to_string(), "eng".to_string());

        assert!(matches!(
            recognizer.recognize(&image),
            Err(RecognitionError::Engine(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_does_not_reuse_previous_screenshot() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("screenshot.png");
        std::fs::write(&output, b"OLD SHOT").unwrap();

        // `true` 成功結束但不寫入任何檔案
        let capturer = CommandCapturer::new("true".to_string(), vec!["{output}".to_string()]);

        assert!(capturer.capture(&output).is_err());
        assert!(!output.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_accepts_freshly_written_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("screenshot.png");
        std::fs::write(&output, b"OLD SHOT").unwrap();

        let capturer = CommandCapturer::new(
            "sh".to_string(),
            vec!["-c".to_string(), "printf NEW > \"$0\"".to_string(), "{output}".to_string()],
        );

        capturer.capture(&output).unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), b"NEW");
    }

    #[test]
    fn test_capture_fails_when_program_missing() {
        let temp_dir = TempDir::new().unwrap();
        let capturer = CommandCapturer::new("definitely-not-a-capture-tool".to_string(), vec![]);

        assert!(capturer.capture(&temp_dir.path().join("a.png")).is_err());
    }
}
