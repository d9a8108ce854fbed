use crate::config::VideoComposerSettings;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 合成後的輸出路徑：`<輸出資料夾>/<主檔名><字尾><副檔名>`
#[must_use]
pub fn combined_output_path(
    source: &Path,
    output_directory: &Path,
    extension: &str,
    suffix: &str,
) -> PathBuf {
    let file_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = file_name.strip_suffix(extension).unwrap_or(&file_name);
    output_directory.join(format!("{base}{suffix}{extension}"))
}

/// 參與串接的片段
#[derive(Debug, Clone)]
pub struct ClipSource {
    pub path: PathBuf,
    pub duration_seconds: f64,
    pub has_audio: bool,
}

#[derive(Debug, Clone)]
pub struct EncodeOptions {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub video_codec: String,
    pub preset: String,
}

impl From<&VideoComposerSettings> for EncodeOptions {
    fn from(settings: &VideoComposerSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            fps: settings.fps,
            video_codec: settings.video_codec.clone(),
            preset: settings.preset.clone(),
        }
    }
}

/// 片頭 + 主影片 + 片尾 的單次 ffmpeg 串接
pub struct ConcatCommand {
    clips: Vec<ClipSource>,
    destination_path: PathBuf,
    options: EncodeOptions,
}

impl ConcatCommand {
    #[must_use]
    pub fn new(
        intro: ClipSource,
        main: ClipSource,
        outro: ClipSource,
        destination_path: PathBuf,
        options: EncodeOptions,
    ) -> Self {
        Self {
            clips: vec![intro, main, outro],
            destination_path,
            options,
        }
    }

    #[must_use]
    pub fn destination_path(&self) -> &Path {
        &self.destination_path
    }

    #[must_use]
    pub fn expected_duration(&self) -> f64 {
        self.clips.iter().map(|clip| clip.duration_seconds).sum()
    }

    /// 每個片段先縮放到相同解析度與幀率，沒有音軌的片段補上等長靜音
    fn filter_graph(&self) -> String {
        let EncodeOptions {
            width, height, fps, ..
        } = self.options;
        let mut graph = String::new();

        for (index, clip) in self.clips.iter().enumerate() {
            let _ = write!(
                graph,
                "[{index}:v:0]scale={width}:{height},setsar=1,fps={fps},format=yuv420p[v{index}];"
            );
            if clip.has_audio {
                let _ = write!(
                    graph,
                    "[{index}:a:0]aformat=sample_rates=48000:channel_layouts=stereo[a{index}];"
                );
            } else {
                let _ = write!(
                    graph,
                    "anullsrc=r=48000:cl=stereo,atrim=duration={:.3}[a{index}];",
                    clip.duration_seconds
                );
            }
        }

        for index in 0..self.clips.len() {
            let _ = write!(graph, "[v{index}][a{index}]");
        }
        let _ = write!(graph, "concat=n={}:v=1:a=1[outv][outa]", self.clips.len());

        graph
    }

    #[must_use]
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new("ffmpeg");

        cmd.args(["-hide_banner", "-nostdin", "-loglevel", "error", "-y"]);
        for clip in &self.clips {
            cmd.arg("-i").arg(&clip.path);
        }

        let fps = self.options.fps.to_string();
        cmd.args([
            "-filter_complex", &self.filter_graph(),
            "-map", "[outv]",
            "-map", "[outa]",
            "-c:v", &self.options.video_codec,
            "-preset", &self.options.preset,
            "-r", &fps,
            "-c:a", "aac",
            "-b:a", "192k",
            "-movflags", "+faststart",
        ]);
        cmd.arg(&self.destination_path);

        cmd
    }
}
