use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tubeview_core::AdsConfig;

mod ads;
mod app;
mod controls;
mod embed;
mod ui;

use app::App;

/// Terminal front-end for watching YouTube videos: paste a URL, play it
/// in an embedded player, drive it with transport controls.
#[derive(Parser)]
#[command(name = "tubeview", version, about)]
struct Cli {
    /// YouTube URL to load on startup
    url: Option<String>,
}

fn main() -> Result<()> {
    // Setup logger
    env_logger::init();

    let cli = Cli::parse();
    let ads_config = AdsConfig::from_env();
    ads::bootstrap(&ads_config);

    // Restore the terminal before the default panic output runs.
    let orig_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        orig_hook(panic_info);
    }));

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let mut app = App::new(&ads_config);
    if let Some(url) = cli.url {
        app.input_cursor = url.chars().count();
        app.input = url;
        app.submit_url();
    }

    let result = run(&mut terminal, &mut app);

    // The embed (and with it the external player process) is torn down
    // here, before the terminal is handed back.
    drop(app);

    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("terminal draw failed")?;

        // Short poll keeps the UI responsive while the 1-second position
        // poll inside the adapter runs at its own cadence.
        if event::poll(Duration::from_millis(100)).context("event poll failed")? {
            if let Event::Key(key) = event::read().context("event read failed")? {
                app.handle_key(key);
            }
        }

        app.update();
    }
    Ok(())
}
