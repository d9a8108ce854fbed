use super::backend::{CommandCapturer, SystemClipboard, TesseractRecognizer};
use super::session::CaptureSession;
use super::shell::CaptureShell;
use crate::config::CaptureSettings;
use anyhow::Result;
use console::style;
use log::info;
use rust_i18n::t;
use std::io;

/// 截圖 / OCR / 剪貼簿工具
pub struct CaptureTool {
    settings: CaptureSettings,
}

impl CaptureTool {
    pub const fn new(settings: CaptureSettings) -> Self {
        Self { settings }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style(t!("capture.title")).cyan().bold());

        let mut shell = CaptureShell::new(
            CommandCapturer::new(
                self.settings.capture_program.clone(),
                self.settings.capture_args.clone(),
            ),
            TesseractRecognizer::new(
                self.settings.ocr_program.clone(),
                self.settings.ocr_language.clone(),
            ),
            SystemClipboard::new(),
            self.settings.screenshot_path.clone(),
        );
        let mut session = CaptureSession::new();

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        shell.run_loop(&mut session, stdin.lock(), &mut stdout)?;

        info!(
            "Capture session ended with {} screenshot(s) in history",
            session.history().len()
        );
        Ok(())
    }
}
