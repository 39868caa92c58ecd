//! Holdings Dashboard - Terminal UI for live holdings and trades
//!
//! Each tab is fed by its own synchronizer. Terminal focus pauses and
//! resumes polling the same way page visibility does in a browser.

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use holdings_dashboard::bin_common::{config_path_from_args, parse_args};
use holdings_dashboard::dashboard::application::visualizer::{ui, App};
use holdings_dashboard::dashboard::infrastructure::init_file_tracing;
use holdings_dashboard::dashboard::DashboardConfig;

/// Input poll timeout, also the redraw cadence
const TICK: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = parse_args();
    let config_path = config_path_from_args(&args);
    let config = DashboardConfig::load_or_default(&config_path)?;

    // Logging would corrupt the alternate screen, so it only goes to a file
    if let Some(log_file) = &config.log_file {
        if let Some(parent) = Path::new(log_file).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        init_file_tracing(&config.log_level, log_file)?;
        config.log();
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let mut app = App::initialize(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableFocusChange)?;
    terminal.show_cursor()?;

    app.shutdown();
    drop(app);
    runtime.shutdown_timeout(Duration::from_secs(1));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::FocusGained => app.set_focus(true),
                Event::FocusLost => app.set_focus(false),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
