//! 指令迴圈：解析指令、呼叫外部能力並更新 `CaptureSession`

use super::backend::{ClipboardSink, ScreenCapturer, TextRecognizer};
use super::command::CaptureCommand;
use super::session::{CaptureSession, SessionError};
use crate::tools::ensure_parent_exists;
use anyhow::Result;
use log::{info, warn};
use rust_i18n::t;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// 單一指令的成功結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Captured(PathBuf),
    Recognized(String),
    Copied(String),
    Undone { path: PathBuf, removed: bool },
    Redone(PathBuf),
    Exit,
    Usage,
}

pub struct CaptureShell<C, R, K> {
    capturer: C,
    recognizer: R,
    clipboard: K,
    screenshot_path: PathBuf,
}

impl<C, R, K> CaptureShell<C, R, K>
where
    C: ScreenCapturer,
    R: TextRecognizer,
    K: ClipboardSink,
{
    pub const fn new(capturer: C, recognizer: R, clipboard: K, screenshot_path: PathBuf) -> Self {
        Self {
            capturer,
            recognizer,
            clipboard,
            screenshot_path,
        }
    }

    pub fn execute(
        &mut self,
        session: &mut CaptureSession,
        command: &CaptureCommand,
    ) -> Result<Outcome, SessionError> {
        match command {
            CaptureCommand::Screenshot => self.screenshot(session),
            CaptureCommand::Ocr => {
                let text = self.recognize_latest(session)?;
                Ok(Outcome::Recognized(text))
            }
            CaptureCommand::Copy => {
                let text = self.recognize_latest(session)?;
                self.clipboard
                    .set_text(&text)
                    .map_err(|e| SessionError::Clipboard(format!("{e:#}")))?;
                Ok(Outcome::Copied(text))
            }
            CaptureCommand::Undo => {
                let undone = session.undo()?;
                Ok(Outcome::Undone {
                    path: undone.path,
                    removed: undone.removed,
                })
            }
            CaptureCommand::Redo => session.redo().map(Outcome::Redone),
            CaptureCommand::Exit => Ok(Outcome::Exit),
            CaptureCommand::Unknown(_) => Ok(Outcome::Usage),
        }
    }

    fn screenshot(&self, session: &mut CaptureSession) -> Result<Outcome, SessionError> {
        let path = self.screenshot_path.clone();
        ensure_parent_exists(&path).map_err(|e| SessionError::Capture(format!("{e:#}")))?;
        self.capturer
            .capture(&path)
            .map_err(|e| SessionError::Capture(format!("{e:#}")))?;

        session.record_screenshot(path.clone());
        info!("Screenshot saved to {}", path.display());
        Ok(Outcome::Captured(path))
    }

    /// `ocr` 與 `copy` 共用的辨識路徑
    fn recognize_latest(&self, session: &CaptureSession) -> Result<String, SessionError> {
        let image = session.latest()?;
        Ok(self.recognizer.recognize(image)?)
    }

    /// 讀取指令直到 `exit` 或輸入結束
    pub fn run_loop<I, O>(
        &mut self,
        session: &mut CaptureSession,
        input: I,
        output: &mut O,
    ) -> Result<()>
    where
        I: BufRead,
        O: Write,
    {
        writeln!(
            output,
            "{}",
            t!("capture.started", usage = CaptureCommand::USAGE)
        )?;

        let mut lines = input.lines();
        loop {
            write!(output, "{}", t!("capture.prompt"))?;
            output.flush()?;

            let Some(line) = lines.next() else {
                writeln!(output)?;
                break;
            };
            let command = CaptureCommand::parse(&line?);

            match self.execute(session, &command) {
                Ok(Outcome::Exit) => {
                    writeln!(output, "{}", t!("capture.exiting"))?;
                    break;
                }
                Ok(outcome) => render_outcome(output, &outcome)?,
                Err(e) => {
                    warn!("{command:?} failed: {e}");
                    writeln!(output, "{}", render_error(&command, &e))?;
                }
            }
        }

        Ok(())
    }
}

fn render_outcome<O: Write>(output: &mut O, outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Captured(path) => {
            writeln!(output, "{}", t!("capture.saved", path = path.display()))?;
        }
        Outcome::Recognized(text) => {
            writeln!(output, "{}\n{text}", t!("capture.ocr_text"))?;
            writeln!(output, "{}", t!("capture.ocr_success"))?;
        }
        Outcome::Copied(_) => writeln!(output, "{}", t!("capture.copied"))?,
        Outcome::Undone { path, removed } => {
            if *removed {
                writeln!(output, "{}", t!("capture.undone_removed", path = path.display()))?;
            } else {
                writeln!(output, "{}", t!("capture.undone", path = path.display()))?;
            }
        }
        Outcome::Redone(path) => {
            writeln!(output, "{}", t!("capture.redone", path = path.display()))?;
        }
        Outcome::Usage => writeln!(
            output,
            "{}",
            t!("capture.invalid", usage = CaptureCommand::USAGE)
        )?,
        Outcome::Exit => {}
    }
    Ok(())
}

fn render_error(command: &CaptureCommand, error: &SessionError) -> String {
    match (command, error) {
        (CaptureCommand::Ocr, SessionError::NoScreenshot) => t!("capture.no_screenshot").into_owned(),
        (CaptureCommand::Copy, SessionError::NoScreenshot) => t!("capture.no_text").into_owned(),
        (_, SessionError::NothingToUndo) => t!("capture.nothing_to_undo").into_owned(),
        (_, SessionError::NothingToRedo) => t!("capture.nothing_to_redo").into_owned(),
        (_, SessionError::Recognition(e)) => t!("capture.ocr_error", error = e).into_owned(),
        _ => t!("capture.error", error = error).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::capture_tool::backend::RecognitionError;
    use std::cell::RefCell;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use std::rc::Rc;
    use tempfile::TempDir;

    struct FakeCapturer;

    impl ScreenCapturer for FakeCapturer {
        fn capture(&self, output: &Path) -> Result<()> {
            fs::write(output, b"fake png")?;
            Ok(())
        }
    }

    struct FakeRecognizer;

    impl TextRecognizer for FakeRecognizer {
        fn recognize(&self, image: &Path) -> Result<String, RecognitionError> {
            if image.exists() {
                Ok("hello world".to_string())
            } else {
                Err(RecognitionError::ImageMissing(image.to_path_buf()))
            }
        }
    }

    #[derive(Clone, Default)]
    struct FakeClipboard(Rc<RefCell<Option<String>>>);

    impl ClipboardSink for FakeClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            *self.0.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    fn fake_shell(
        dir: &Path,
    ) -> (
        CaptureShell<FakeCapturer, FakeRecognizer, FakeClipboard>,
        FakeClipboard,
    ) {
        let clipboard = FakeClipboard::default();
        let shell = CaptureShell::new(
            FakeCapturer,
            FakeRecognizer,
            clipboard.clone(),
            dir.join("screenshots/screenshot.png"),
        );
        (shell, clipboard)
    }

    #[test]
    fn test_screenshot_creates_folder_and_records() {
        let temp_dir = TempDir::new().unwrap();
        let (mut shell, _) = fake_shell(temp_dir.path());
        let mut session = CaptureSession::new();

        let outcome = shell
            .execute(&mut session, &CaptureCommand::Screenshot)
            .unwrap();

        let expected = temp_dir.path().join("screenshots/screenshot.png");
        assert_eq!(outcome, Outcome::Captured(expected.clone()));
        assert!(expected.exists());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_ocr_and_copy_on_empty_history() {
        let temp_dir = TempDir::new().unwrap();
        let (mut shell, clipboard) = fake_shell(temp_dir.path());
        let mut session = CaptureSession::new();

        assert!(matches!(
            shell.execute(&mut session, &CaptureCommand::Ocr),
            Err(SessionError::NoScreenshot)
        ));
        assert!(matches!(
            shell.execute(&mut session, &CaptureCommand::Copy),
            Err(SessionError::NoScreenshot)
        ));
        assert!(clipboard.0.borrow().is_none());
    }

    #[test]
    fn test_copy_places_recognized_text_on_clipboard() {
        let temp_dir = TempDir::new().unwrap();
        let (mut shell, clipboard) = fake_shell(temp_dir.path());
        let mut session = CaptureSession::new();

        shell.execute(&mut session, &CaptureCommand::Screenshot).unwrap();
        let outcome = shell.execute(&mut session, &CaptureCommand::Copy).unwrap();

        assert_eq!(outcome, Outcome::Copied("hello world".to_string()));
        assert_eq!(clipboard.0.borrow().as_deref(), Some("hello world"));
    }

    #[test]
    fn test_copy_after_undo_redo_fails_without_touching_clipboard() {
        let temp_dir = TempDir::new().unwrap();
        let (mut shell, clipboard) = fake_shell(temp_dir.path());
        let mut session = CaptureSession::new();

        shell.execute(&mut session, &CaptureCommand::Screenshot).unwrap();
        shell.execute(&mut session, &CaptureCommand::Undo).unwrap();
        shell.execute(&mut session, &CaptureCommand::Redo).unwrap();

        assert!(matches!(
            shell.execute(&mut session, &CaptureCommand::Copy),
            Err(SessionError::Recognition(RecognitionError::ImageMissing(_)))
        ));
        assert!(clipboard.0.borrow().is_none());
    }

    struct FailingCapturer;

    impl ScreenCapturer for FailingCapturer {
        fn capture(&self, _output: &Path) -> Result<()> {
            anyhow::bail!("capture program wrote nothing")
        }
    }

    #[test]
    fn test_failed_capture_is_not_recorded() {
        let temp_dir = TempDir::new().unwrap();
        let mut shell = CaptureShell::new(
            FailingCapturer,
            FakeRecognizer,
            FakeClipboard::default(),
            temp_dir.path().join("screenshot.png"),
        );
        let mut session = CaptureSession::new();

        assert!(matches!(
            shell.execute(&mut session, &CaptureCommand::Screenshot),
            Err(SessionError::Capture(_))
        ));
        assert!(session.history().is_empty());
    }

    fn run_script(script: &str) -> (CaptureSession, String) {
        let temp_dir = TempDir::new().unwrap();
        let (mut shell, _) = fake_shell(temp_dir.path());
        let mut session = CaptureSession::new();
        let mut output = Vec::new();

        shell
            .run_loop(&mut session, Cursor::new(script), &mut output)
            .unwrap();

        (session, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_run_loop_stops_on_exit() {
        let (session, output) =
            run_script("screenshot\nocr\ncopy\nbogus\nUNDO\nredo\nocr\nexit\nscreenshot\n");

        // exit 之後的 screenshot 不會被執行
        assert_eq!(session.history().len(), 1);
        assert!(session.redo_stack().is_empty());

        assert!(output.contains("Screenshot saved to"));
        assert!(output.contains("OCR Extracted Text:\nhello world"));
        assert!(output.contains("Text copied to clipboard!"));
        assert!(output.contains("Invalid command! Try: screenshot, ocr, copy, undo, redo, exit"));
        assert!(output.contains("Undone action: Removed"));
        assert!(output.contains("Redone action: Restored"));
        assert!(output.contains("Error performing OCR: image not found"));
        assert!(output.trim_end().ends_with("Exiting application."));
        assert_eq!(output.matches("Screenshot saved to").count(), 1);
    }

    #[test]
    fn test_run_loop_ends_at_eof_and_survives_errors() {
        let (session, output) = run_script("ocr\ncopy\nundo\nredo\n");

        assert!(session.history().is_empty());
        assert!(output.contains("No screenshot available for OCR. Take a screenshot first!"));
        assert!(output.contains("No text to copy. Perform OCR first!"));
        assert!(output.contains("No action to undo!"));
        assert!(output.contains("No action to redo!"));
        assert!(!output.contains("Exiting application."));
    }
}
