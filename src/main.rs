mod app;
mod catalog;
mod cli;
mod clock;
mod config;
mod dashboard;
mod logging;
mod report;
mod session;
mod task;
mod ui;

use anyhow::{Context, Result};
use app::App;
use catalog::Catalog;
use clap::Parser;
use cli::{Cli, Command};
use clock::Clock;
use config::Config;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use session::Session;
use std::{io, time::Duration};
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(dir) = cli.log_dir {
        config.log_dir = Some(dir);
    }

    let is_report = matches!(cli.command, Some(Command::Report { .. }));
    let _log_guard = logging::init(config.log_dir.as_deref(), is_report)?;

    let catalog = config.catalog()?;
    info!(
        rooms = catalog.rooms().len(),
        tasks = catalog.total_tasks(),
        custom = config.rooms.is_some(),
        "catalog loaded"
    );

    match cli.command {
        Some(Command::Report { format }) => {
            let session = Session::new(Clock::System);
            let model = dashboard::project(&catalog, &session);
            report::write_report(&mut io::stdout().lock(), &model, format)
                .context("failed to write report")?;
        }
        None => run_dashboard(catalog, config.tick_rate())?,
    }
    Ok(())
}

fn run_dashboard(catalog: Catalog, tick_rate: Duration) -> Result<()> {
    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(catalog, Session::new(Clock::System));
    info!(week = app.session.current_week(), "dashboard started");

    let result = ui::run_app(&mut terminal, &mut app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("dashboard terminal error")
}
