//! 文件複製主流程

use super::date_ranges::{MAX_PERIODS, biweekly_ranges, parse_date};
use super::duplicator::duplicate_with_labels;
use crate::config::Config;
use crate::config::save::{add_recent_path, save_settings};
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use log::warn;
use rust_i18n::t;
use std::path::PathBuf;

pub struct DocDuplicator;

impl DocDuplicator {
    pub const fn new() -> Self {
        Self
    }

    pub fn run(&self, config: &mut Config) -> Result<()> {
        println!("{}", style(t!("duplicator.title")).cyan().bold());

        let input_file = self.prompt_input_file(&config.settings.doc_duplicator.input_file)?;
        let Some(labels) = self.prompt_labels(&config.settings.doc_duplicator.date_ranges)? else {
            return Ok(());
        };

        let input = PathBuf::from(&input_file);
        duplicate_with_labels(&input, &labels, |created| {
            println!(
                "{} {}",
                style(t!("duplicator.created")).green(),
                created.display()
            );
        })?;

        println!("{}", style(t!("duplicator.completed")).green().bold());

        // 記住這次使用的檔案
        config.settings.doc_duplicator.input_file = input_file.clone();
        add_recent_path(&mut config.settings, &input_file);
        if let Err(e) = save_settings(&config.settings) {
            warn!("Failed to save settings: {e}");
        }

        Ok(())
    }

    fn prompt_input_file(&self, default: &str) -> Result<String> {
        let path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("duplicator.prompt_input"))
            .default(default.to_string())
            .interact_text()?;
        Ok(path.trim().to_string())
    }

    /// 選擇已儲存的標籤或產生雙週區間，ESC 回傳 None
    fn prompt_labels(&self, saved: &[String]) -> Result<Option<Vec<String>>> {
        let options = vec![
            t!("duplicator.opt_saved", count = saved.len()),
            t!("duplicator.opt_generate"),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("duplicator.prompt_labels"))
            .items(&options)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => Ok(Some(saved.to_vec())),
            Some(1) => {
                let start: String = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt(t!("duplicator.prompt_start"))
                    .validate_with(|input: &String| {
                        parse_date(input).map(|_| ()).map_err(|e| e.to_string())
                    })
                    .interact_text()?;
                let count: usize = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt(t!("duplicator.prompt_count", max = MAX_PERIODS))
                    .default(16)
                    .validate_with(|count: &usize| {
                        if *count <= MAX_PERIODS {
                            Ok(())
                        } else {
                            Err(t!("duplicator.too_many", max = MAX_PERIODS).into_owned())
                        }
                    })
                    .interact_text()?;
                Ok(Some(biweekly_ranges(parse_date(&start)?, count)?))
            }
            _ => Ok(None),
        }
    }
}

impl Default for DocDuplicator {
    fn default() -> Self {
        Self::new()
    }
}
