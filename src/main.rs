use anyhow::Result;
use console::{Term, style};
use desk_toolkit::config::Config;
use desk_toolkit::init;
use desk_toolkit::menu::show_main_menu;
use desk_toolkit::signal::setup_shutdown_signal;
use log::{info, warn};
use rust_i18n::t;

rust_i18n::i18n!("locales", fallback = "en");

fn main() -> Result<()> {
    init::init();
    let term = Term::stdout();
    let shutdown_signal = setup_shutdown_signal();

    // 載入設定並套用語系
    let mut config = Config::new()?;
    rust_i18n::set_locale(config.settings.language.as_str());

    loop {
        match show_main_menu(&term, &shutdown_signal, &mut config) {
            Ok(true) => {}
            Ok(false) => {
                term.clear_screen()?;
                println!("\n{}", style(t!("main_menu.goodbye")).green().bold());
                info!("Program exited normally");
                break;
            }
            Err(e) => {
                warn!("Program error: {e}");
                eprintln!("{} {}", style(t!("common.error_prefix")).red().bold(), e);
                break;
            }
        }
    }

    Ok(())
}
