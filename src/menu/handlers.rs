use crate::component::{CaptureTool, DocDuplicator, VideoComposer};
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use log::error;
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

fn report_error(e: &anyhow::Error) {
    error!("{e:#}");
    eprintln!("{} {:#}", style(t!("common.error_prefix")).red().bold(), e);
}

pub fn run_doc_duplicator(term: &Term, config: &mut Config) -> Result<()> {
    let duplicator = DocDuplicator::new();

    if let Err(e) = duplicator.run(config) {
        report_error(&e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_capture_tool(term: &Term, config: &Config) -> Result<()> {
    let tool = CaptureTool::new(config.settings.capture.clone());

    if let Err(e) = tool.run() {
        report_error(&e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_video_composer(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let composer = VideoComposer::new(Arc::clone(shutdown_signal));

    if let Err(e) = composer.run(config) {
        report_error(&e);
    }

    pause(term)?;
    Ok(())
}
