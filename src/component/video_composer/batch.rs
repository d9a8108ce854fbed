use super::concat_command::{ClipSource, ConcatCommand, EncodeOptions, combined_output_path};
use crate::config::VideoComposerSettings;
use crate::tools::{
    ensure_directory_exists, get_video_info, scan_video_files, validate_directory_exists,
    validate_file_exists,
};
use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 輸出長度與三段長度總和的容許誤差
pub const DURATION_TOLERANCE_SECONDS: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeJob {
    pub source: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Default)]
pub struct ComposeSummary {
    pub completed: Vec<PathBuf>,
    pub interrupted: bool,
}

pub struct BatchComposer {
    settings: VideoComposerSettings,
    shutdown_signal: Arc<AtomicBool>,
}

impl BatchComposer {
    pub const fn new(settings: VideoComposerSettings, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            settings,
            shutdown_signal,
        }
    }

    /// 驗證片頭片尾與輸入資料夾，並列出要處理的影片
    pub fn plan(&self) -> Result<Vec<ComposeJob>> {
        let settings = &self.settings;
        validate_file_exists(&settings.intro_path)?;
        validate_file_exists(&settings.outro_path)?;
        validate_directory_exists(&settings.input_directory)?;

        let jobs: Vec<ComposeJob> = scan_video_files(&settings.input_directory, &settings.video_extension)?
            .into_iter()
            .map(|source| {
                let output = combined_output_path(
                    &source,
                    &settings.output_directory,
                    &settings.video_extension,
                    &settings.output_suffix,
                );
                ComposeJob { source, output }
            })
            .collect();

        // 不同子資料夾中的同名檔案會輸出到同一路徑，後者覆蓋前者
        for output in duplicate_outputs(&jobs) {
            warn!(
                "Several source videos map to {}, later ones overwrite earlier ones",
                output.display()
            );
        }

        Ok(jobs)
    }

    /// 依序合成；任一檔案失敗即中止剩餘工作
    pub fn run<F>(&self, jobs: &[ComposeJob], mut on_finished: F) -> Result<ComposeSummary>
    where
        F: FnMut(&ComposeJob),
    {
        let mut summary = ComposeSummary::default();
        if jobs.is_empty() {
            return Ok(summary);
        }

        ensure_directory_exists(&self.settings.output_directory)?;

        // 片頭片尾只需探測一次
        let intro = probe_clip(&self.settings.intro_path)?;
        let outro = probe_clip(&self.settings.outro_path)?;
        let options = EncodeOptions::from(&self.settings);

        for job in jobs {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                warn!("Shutdown requested, stopping before {}", job.source.display());
                summary.interrupted = true;
                break;
            }

            let main = probe_clip(&job.source)?;
            let command = ConcatCommand::new(
                intro.clone(),
                main,
                outro.clone(),
                job.output.clone(),
                options.clone(),
            );

            info!("Composing {} -> {}", job.source.display(), job.output.display());
            if let Err(e) = encode(&command) {
                self.resolve_encode_failure(job, e, summary.completed.len())?;
                summary.interrupted = true;
                break;
            }
            verify_duration(&command);

            on_finished(job);
            summary.completed.push(job.output.clone());
        }

        Ok(summary)
    }

    /// Ctrl-C 也會中斷 ffmpeg；此時視為使用者中斷並刪除不完整的輸出
    fn resolve_encode_failure(
        &self,
        job: &ComposeJob,
        error: anyhow::Error,
        finished: usize,
    ) -> Result<()> {
        if !self.shutdown_signal.load(Ordering::SeqCst) {
            return Err(error.context(format!(
                "Composing {} failed after {finished} finished file(s)",
                job.source.display()
            )));
        }

        warn!("Encoding of {} interrupted: {error:#}", job.source.display());
        discard_partial_output(&job.output);
        Ok(())
    }
}

/// 回傳被多個來源影片共用的輸出路徑，每個只列一次
#[must_use]
pub fn duplicate_outputs(jobs: &[ComposeJob]) -> Vec<&Path> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for job in jobs {
        let output = job.output.as_path();
        if !seen.insert(output) && !duplicates.contains(&output) {
            duplicates.push(output);
        }
    }

    duplicates
}

fn discard_partial_output(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => info!("Removed partial output {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove partial output {}: {e}", path.display()),
    }
}

fn probe_clip(path: &Path) -> Result<ClipSource> {
    let info = get_video_info(path)?;
    debug!(
        "{}: {}x{}, {:.2}s, audio: {}",
        path.display(),
        info.width,
        info.height,
        info.duration_seconds,
        info.has_audio
    );
    Ok(ClipSource {
        path: path.to_path_buf(),
        duration_seconds: info.duration_seconds,
        has_audio: info.has_audio,
    })
}

fn encode(command: &ConcatCommand) -> Result<()> {
    let output = command
        .build_command()
        .output()
        .context("Failed to run ffmpeg")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("ffmpeg exited with {}: {}", output.status, stderr.trim());
    }
    Ok(())
}

/// 只記錄警告，不視為失敗
fn verify_duration(command: &ConcatCommand) {
    let expected = command.expected_duration();
    match get_video_info(command.destination_path()) {
        Ok(info) if (info.duration_seconds - expected).abs() > DURATION_TOLERANCE_SECONDS => {
            warn!(
                "{} is {:.2}s long, expected {:.2}s",
                command.destination_path().display(),
                info.duration_seconds,
                expected
            );
        }
        Ok(_) => {}
        Err(e) => warn!("Could not verify output duration: {e:#}"),
    }
}
