use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::{Backend, CrosstermBackend};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use tiptoi_core::{ClientConfig, GmeClient, SystemDestinations};

mod action;
mod app;
mod backend;
mod input;
mod launcher;
mod model;
mod theme;
mod tui_event;
mod view;

use app::App;
use launcher::Launcher;
use tui_event::{AppEvent, BackendCommand};

/// tiptoi TUI: pick a product from the vendor catalog and download its audio file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {}

/// How the interactive session ended.
enum Outcome {
    Quit,
    Downloaded(PathBuf),
    CatalogUnavailable(String),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _args = Args::parse();
    let _log_guard = init_logging();

    let client = GmeClient::new(ClientConfig::default())?;

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    match result? {
        Outcome::Quit => {}
        Outcome::Downloaded(path) => println!("Downloaded {}", path.display()),
        Outcome::CatalogUnavailable(error) => {
            anyhow::bail!("failed to load catalog: {error}")
        }
    }
    Ok(())
}

async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    client: GmeClient,
) -> anyhow::Result<Outcome> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let launcher = Launcher::new(event_tx.clone());

    // Terminal input is read on its own thread and joins the same queue as
    // background completions. Detached: it dies with the process.
    let input_tx = event_tx;
    std::thread::spawn(move || {
        while let Ok(evt) = event::read() {
            if input_tx.send(AppEvent::Input(evt)).is_err() {
                break;
            }
        }
    });

    let mut app = App::new(theme::Theme::default(), Box::new(SystemDestinations));
    let size = terminal.size()?;
    app.update(action::Action::Resize(size.width, size.height));

    let launch = |cmd: BackendCommand| {
        tracing::debug!(?cmd, "launching");
        launcher.launch(cmd.kind(), backend::execute(client.clone(), cmd));
    };

    if let Some(cmd) = app.start() {
        launch(cmd);
    }

    let mut tick = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            maybe_event = event_rx.recv() => {
                let Some(evt) = maybe_event else { break };
                if let Some(cmd) = app.dispatch(evt) {
                    launch(cmd);
                }
            }
            _ = tick.tick() => {
                app.update(action::Action::Tick);
            }
        }

        if app.should_quit {
            // One last frame so a completed download is visible before exit.
            terminal.draw(|f| app.view(f))?;
            break;
        }
    }

    if let Some(error) = app.fatal_error.take() {
        return Ok(Outcome::CatalogUnavailable(error));
    }
    Ok(match app.session.downloaded_path.take() {
        Some(path) => Outcome::Downloaded(path),
        None => Outcome::Quit,
    })
}

/// Log to a daily file under the cache dir; the terminal belongs to the UI.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = dirs::cache_dir()?.join("tiptoi").join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "tiptoi-tui.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_ansi(false)
        .with_env_filter(EnvFilter::new("info,tiptoi_core=debug,tiptoi_tui=debug"))
        .try_init()
        .ok()?;

    Some(guard)
}
