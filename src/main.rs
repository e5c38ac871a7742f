//! taginput - a terminal tag input widget with typeahead search.
//!
//! The binary hosts the widget in a small demo application: tags are typed
//! or imported from a file, suggestions come from an optional remote
//! endpoint, and the confirmed tags are printed on exit.

mod api;
mod app;
mod cache;
mod commands;
mod config;
mod error;
mod events;
mod logging;
mod model;
mod tasks;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::app::App;
use crate::config::Config;
use crate::events::EventHandler;
use crate::tasks::{create_task_channel, SearchMessage};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "taginput", about, version)]
struct Args {
    /// Path to the configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file with tag seeds to import on startup.
    #[arg(long)]
    import: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logging::init()?;

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load()?,
    };

    let (mut rx, spawner) = create_task_channel();
    let mut app = App::new(config, spawner)?;

    if let Some(path) = &args.import {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading seed file {}", path.display()))?;
        let source: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("parsing seed file {}", path.display()))?;
        app.import_seeds(&source)?;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &mut rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    // Print the confirmed tags so the widget is usable in pipelines.
    for tag in app.shutdown() {
        println!("{}", tag.text());
    }

    logging::shutdown();
    result
}

/// The main event loop: draw, drain completed searches, handle input.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    rx: &mut UnboundedReceiver<SearchMessage>,
) -> anyhow::Result<()> {
    let events = EventHandler::new();

    while !app.should_quit() {
        terminal.draw(|frame| app.render(frame))?;

        while let Ok(message) = rx.try_recv() {
            app.handle_search_message(message);
        }

        let event = events.next()?;
        app.handle_event(event);
    }

    Ok(())
}
