use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// 最近使用路徑的保留數量
pub const MAX_RECENT_PATHS: usize = 10;

/// 預設的 2024 年雙週區間
pub const DEFAULT_DATE_RANGES: [&str; 16] = [
    "04-04-2024_04-19-2024",
    "04-22-2024_05-03-2024",
    "05-06-2024_05-17-2024",
    "05-20-2024_05-31-2024",
    "06-03-2024_06-14-2024",
    "06-17-2024_06-28-2024",
    "07-01-2024_07-12-2024",
    "07-15-2024_07-26-2024",
    "07-29-2024_08-09-2024",
    "08-12-2024_08-23-2024",
    "08-26-2024_09-06-2024",
    "09-09-2024_09-20-2024",
    "09-23-2024_10-04-2024",
    "10-07-2024_10-18-2024",
    "10-21-2024_11-01-2024",
    "11-04-2024_11-11-2024",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::ZhTw => "zh-TW",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::En => write!(f, "English"),
            Self::ZhTw => write!(f, "繁體中文"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocDuplicatorSettings {
    pub input_file: String,
    pub date_ranges: Vec<String>,
}

impl Default for DocDuplicatorSettings {
    fn default() -> Self {
        Self {
            input_file: "your_file.docx".to_string(),
            date_ranges: DEFAULT_DATE_RANGES.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    /// 截圖固定寫入的路徑
    pub screenshot_path: PathBuf,
    /// 外部截圖程式，參數中的 `{output}` 會替換為輸出路徑
    pub capture_program: String,
    pub capture_args: Vec<String>,
    pub ocr_program: String,
    pub ocr_language: String,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        let (capture_program, capture_args) = default_capture_command();
        Self {
            screenshot_path: PathBuf::from("screenshots/screenshot.png"),
            capture_program: capture_program.to_string(),
            capture_args: capture_args.iter().map(ToString::to_string).collect(),
            ocr_program: "tesseract".to_string(),
            ocr_language: "eng".to_string(),
        }
    }
}

#[cfg(target_os = "macos")]
const fn default_capture_command() -> (&'static str, &'static [&'static str]) {
    ("screencapture", &["-x", "{output}"])
}

#[cfg(target_os = "windows")]
const fn default_capture_command() -> (&'static str, &'static [&'static str]) {
    (
        "powershell",
        &[
            "-NoProfile",
            "-Command",
            "Add-Type -AssemblyName System.Windows.Forms,System.Drawing; \
             $b=[System.Windows.Forms.SystemInformation]::VirtualScreen; \
             $i=New-Object System.Drawing.Bitmap $b.Width,$b.Height; \
             $g=[System.Drawing.Graphics]::FromImage($i); \
             $g.CopyFromScreen($b.Left,$b.Top,0,0,$i.Size); \
             $i.Save('{output}')",
        ],
    )
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const fn default_capture_command() -> (&'static str, &'static [&'static str]) {
    ("gnome-screenshot", &["-f", "{output}"])
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoComposerSettings {
    pub intro_path: PathBuf,
    pub outro_path: PathBuf,
    pub input_directory: PathBuf,
    pub output_directory: PathBuf,
    /// 檔名結尾比對，區分大小寫
    pub video_extension: String,
    pub output_suffix: String,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub video_codec: String,
    pub preset: String,
}

impl Default for VideoComposerSettings {
    fn default() -> Self {
        Self {
            intro_path: PathBuf::from("INTRO.mp4"),
            outro_path: PathBuf::from("OUTRO.mp4"),
            input_directory: PathBuf::from("input"),
            output_directory: PathBuf::from("output"),
            video_extension: ".mp4".to_string(),
            output_suffix: "_COMBINED".to_string(),
            width: 2560,
            height: 1440,
            fps: 60,
            video_codec: "libx264".to_string(),
            preset: "slow".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UserSettings {
    pub language: Language,
    pub recent_paths: Vec<String>,
    pub doc_duplicator: DocDuplicatorSettings,
    pub capture: CaptureSettings,
    pub video_composer: VideoComposerSettings,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: UserSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let json = r#"{"language":"zh-TW","video_composer":{"fps":30}}"#;
        let settings: UserSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.language, Language::ZhTw);
        assert_eq!(settings.video_composer.fps, 30);
        assert_eq!(settings.video_composer.width, 2560);
        assert_eq!(settings.video_composer.output_suffix, "_COMBINED");
        assert_eq!(settings.doc_duplicator.date_ranges.len(), 16);
        assert_eq!(
            settings.capture.screenshot_path,
            PathBuf::from("screenshots/screenshot.png")
        );
    }

    #[test]
    fn test_language_locale_names() {
        assert_eq!(Language::En.as_str(), "en");
        assert_eq!(Language::ZhTw.as_str(), "zh-TW");
    }
}
