use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use crossterm::cursor::SetCursorStyle;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod config;
mod error;
mod events;
mod explorer;
mod files;
mod gemini;
mod prompts;
mod text_layout;
mod theme;
mod transcript;
mod ui;
mod worker;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;

use app::App;
use config::AgentConfig;
use error::StartupError;
use events::AppEvent;
use gemini::GeminiClient;
use theme::Theme;
use worker::TaskRunner;

const MAX_COMPLETIONS_PER_LOOP: usize = 32;
const LOG_FILTER_ENV: &str = "ANX_LOG";

/// Terminal assistant that chats with Gemini and creates or edits files with it.
#[derive(Debug, Parser)]
#[command(name = "anx-agent", version)]
struct Args {
    /// TOML config file with a [gemini] section.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory the explorer starts in.
    #[arg(long, default_value = ".")]
    dir: PathBuf,
    /// TOML theme file; missing or invalid files fall back to built-in colors.
    #[arg(long, default_value = "theme.toml")]
    theme: PathBuf,
    /// Write tracing output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "startup failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), StartupError> {
    init_logging(args.log_file.as_deref())?;

    // Everything fallible happens before the terminal switches modes.
    let config = AgentConfig::load(args.config.as_deref())?;
    let client = GeminiClient::new(&config.gemini).map_err(StartupError::Client)?;
    let runner = TaskRunner::new(Arc::new(client));
    let theme = Theme::load_or_default(&args.theme);
    tracing::info!(
        model = %config.gemini.model,
        dir = %args.dir.display(),
        "starting session"
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetCursorStyle::SteadyBar)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    let result = run_app(&mut terminal, App::new(args.dir), &theme, &runner);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        SetCursorStyle::DefaultUserShape,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    tracing::info!("session ended");
    result.map_err(StartupError::from)
}

fn init_logging(log_file: Option<&Path>) -> Result<(), StartupError> {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| StartupError::LogFile {
                    path: path.to_path_buf(),
                    source,
                })?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
    }
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    theme: &Theme,
    runner: &TaskRunner,
) -> io::Result<()> {
    while app.running {
        for completion in runner.drain_completions_limited(MAX_COMPLETIONS_PER_LOOP) {
            if let Some(task) = app.on_completion(completion) {
                runner.spawn(task);
            }
        }

        terminal.draw(|frame| ui::render(frame, &app, theme))?;

        match events::next_event()? {
            AppEvent::ScrollUp => {
                let size = terminal.size()?;
                let screen = Rect::new(0, 0, size.width, size.height);
                app.scroll_transcript_up(ui::transcript_max_scroll(screen, &app));
            }
            AppEvent::ScrollDown => app.scroll_transcript_down(),
            event => {
                if let Some(task) = app.handle_event(event) {
                    runner.spawn(task);
                }
            }
        }
    }
    Ok(())
}
