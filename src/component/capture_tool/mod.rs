//! 截圖 / OCR / 剪貼簿互動工具
//!
//! 逐行讀取指令，截圖紀錄保存在 `CaptureSession` 的復原/重做堆疊中

mod backend;
mod command;
mod main;
mod session;
mod shell;

pub use backend::{
    ClipboardSink, CommandCapturer, RecognitionError, ScreenCapturer, SystemClipboard,
    TesseractRecognizer, TextRecognizer,
};
pub use command::CaptureCommand;
pub use main::CaptureTool;
pub use session::{CaptureSession, SessionError, Undone};
pub use shell::{CaptureShell, Outcome};
