use super::batch::BatchComposer;
use crate::config::Config;
use crate::config::save::save_settings;
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rust_i18n::t;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub struct VideoComposer {
    shutdown_signal: Arc<AtomicBool>,
}

impl VideoComposer {
    pub const fn new(shutdown_signal: Arc<AtomicBool>) -> Self {
        Self { shutdown_signal }
    }

    pub fn run(&self, config: &mut Config) -> Result<()> {
        println!("{}", style(t!("composer.title")).cyan().bold());

        self.prompt_paths(config)?;
        if let Err(e) = save_settings(&config.settings) {
            warn!("Failed to save settings: {e}");
        }

        let settings = config.settings.video_composer.clone();
        let composer = BatchComposer::new(settings.clone(), Arc::clone(&self.shutdown_signal));

        println!("{}", style(t!("composer.scanning")).dim());
        let jobs = composer.plan()?;

        if jobs.is_empty() {
            println!("{}", style(t!("composer.no_videos")).yellow());
            return Ok(());
        }

        println!(
            "{}",
            style(t!("composer.found", count = jobs.len())).green()
        );
        for (index, job) in jobs.iter().enumerate() {
            println!("  {index}: {}", job.source.display());
        }
        println!(
            "{}",
            style(t!(
                "composer.encoding_with",
                width = settings.width,
                height = settings.height,
                fps = settings.fps,
                codec = settings.video_codec
            ))
            .dim()
        );

        if !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("composer.confirm"))
            .default(true)
            .interact()?
        {
            println!("{}", style(t!("common.cancelled")).yellow());
            return Ok(());
        }

        let progress_bar = ProgressBar::new(jobs.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        progress_bar.set_message(t!("composer.encoding").into_owned());

        let result = composer.run(&jobs, |job| {
            progress_bar.println(format!("{} {}", t!("composer.written"), job.output.display()));
            progress_bar.inc(1);
        });

        let summary = match result {
            Ok(summary) => summary,
            Err(e) => {
                progress_bar.abandon_with_message(t!("composer.halted").into_owned());
                return Err(e);
            }
        };

        if summary.interrupted {
            progress_bar.abandon_with_message(t!("common.interrupted").into_owned());
        } else {
            progress_bar.finish_with_message(t!("common.done").into_owned());
        }

        println!();
        println!("{}", style(t!("composer.summary_title")).cyan().bold());
        println!(
            "  {}",
            t!("composer.summary_done", done = summary.completed.len(), total = jobs.len())
        );
        info!(
            "Video composer finished {} of {} file(s)",
            summary.completed.len(),
            jobs.len()
        );

        Ok(())
    }

    /// 以上次的設定作為預設值詢問路徑
    fn prompt_paths(&self, config: &mut Config) -> Result<()> {
        let settings = &mut config.settings.video_composer;

        settings.intro_path = prompt_path(&t!("composer.prompt_intro"), &settings.intro_path)?;
        settings.outro_path = prompt_path(&t!("composer.prompt_outro"), &settings.outro_path)?;
        settings.input_directory =
            prompt_path(&t!("composer.prompt_input"), &settings.input_directory)?;
        settings.output_directory =
            prompt_path(&t!("composer.prompt_output"), &settings.output_directory)?;

        Ok(())
    }
}

fn prompt_path(prompt: &str, default: &Path) -> Result<PathBuf> {
    let path: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default.display().to_string())
        .interact_text()?;
    Ok(PathBuf::from(path.trim()))
}
