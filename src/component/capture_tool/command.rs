/// 互動迴圈可接受的指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureCommand {
    Screenshot,
    Ocr,
    Copy,
    Undo,
    Redo,
    Exit,
    Unknown(String),
}

impl CaptureCommand {
    pub const USAGE: &'static str = "screenshot, ocr, copy, undo, redo, exit";

    /// 去除前後空白並忽略大小寫
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let command = line.trim().to_lowercase();
        match command.as_str() {
            "screenshot" => Self::Screenshot,
            "ocr" => Self::Ocr,
            "copy" => Self::Copy,
            "undo" => Self::Undo,
            "redo" => Self::Redo,
            "exit" => Self::Exit,
            _ => Self::Unknown(command),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive_and_trimmed() {
        assert_eq!(CaptureCommand::parse("  ScreenShot\n"), CaptureCommand::Screenshot);
        assert_eq!(CaptureCommand::parse("OCR"), CaptureCommand::Ocr);
        assert_eq!(CaptureCommand::parse("exit"), CaptureCommand::Exit);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            CaptureCommand::parse("Paste"),
            CaptureCommand::Unknown("paste".to_string())
        );
        assert_eq!(CaptureCommand::parse(""), CaptureCommand::Unknown(String::new()));
    }
}
