use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use is_terminal::IsTerminal;
use ratatui::{backend::CrosstermBackend, Terminal};

use jarbis::config::AppConfig;
use jarbis::core::hero::card::ConfiguredCard;
use jarbis::core::hero::DisplayMode;
use jarbis::core::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load();
    let interactive = io::stdout().is_terminal();

    let _log_guard = if interactive {
        logging::init_tui(&config.data_dir())
    } else {
        logging::init(&config.data_dir())
    };
    log::info!("Jarbis v{} starting", jarbis::VERSION);

    let card = Arc::new(ConfiguredCard::from_config(&config)?);

    // Piped output: generate once and print the hero as JSON.
    if !interactive {
        card.set_mode(DisplayMode::Edit).await;
        card.regenerate().await?;
        println!("{}", serde_json::to_string_pretty(&card.properties().await)?);
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(config.tui.tick_rate_ms);
    let result = jarbis::tui::app::run(&mut terminal, card, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
