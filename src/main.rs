use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};
use tokio::runtime::Runtime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sentiwatch::app::write_export;
use sentiwatch::config::{Overrides, Settings};
use sentiwatch::data::Dashboard;
use sentiwatch::source::{EndpointUrls, HttpFetcher, Poller};
use sentiwatch::ui::{self, Theme};
use sentiwatch::{events, App};

#[derive(Parser, Debug)]
#[command(name = "sentiwatch")]
#[command(about = "Terminal dashboard for live sentiment-analysis statistics")]
struct Args {
    /// Path to a TOML/YAML/JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the sentiment backend (overrides config)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Polling interval, e.g. "1s" or "500ms" (overrides config)
    #[arg(short, long)]
    refresh: Option<String>,

    /// Log file path (overrides config)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch every endpoint once, export the dashboard to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    settings.apply_overrides(Overrides {
        base_url: args.base_url,
        refresh: args.refresh,
        log_file: args.log_file,
    })?;

    init_logging(&settings.log_path())?;
    info!(base_url = %settings.base_url, refresh = %settings.refresh, "starting");

    let rt = Runtime::new()?;
    let fetcher = HttpFetcher::new(&settings.base_url, settings.request_timeout()?)?;
    let poller = Poller::new(
        Arc::new(fetcher),
        EndpointUrls::from_settings(&settings),
        settings.refresh_interval()?,
    );

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_to_file(&rt, &poller, &export_path);
    }

    let handle = poller.spawn_on(rt.handle());
    let app = App::new(handle, Theme::auto_detect());
    let result = run_tui(app);

    rt.shutdown_timeout(Duration::from_secs(1));
    result
}

/// Send tracing output to a log file; stdout belongs to the TUI.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Run the TUI until the user quits
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);
    app.quit();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 16;

    while app.running {
        let _ = app.reload_data();

        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = Paragraph::new(msg)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow));
                let centered =
                    Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5u16.min(area.height));
                frame.render_widget(paragraph, centered);
                return;
            }

            ui::render(frame, app, area);
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Fetch all endpoints once and write the resulting dashboard to a JSON file
fn export_to_file(rt: &Runtime, poller: &Poller, export_path: &Path) -> Result<()> {
    let mut dashboard = Dashboard::new();
    for (endpoint, result) in rt.block_on(poller.fetch_once()) {
        match result {
            Ok(update) => dashboard.apply(update),
            Err(error) => {
                warn!(%endpoint, %error, "export fetch failed");
                eprintln!("Failed to fetch {}: {}", endpoint, error);
            }
        }
    }

    if dashboard.is_empty() {
        bail!("no endpoint returned data; nothing to export");
    }
    write_export(&dashboard, export_path)?;

    println!("Exported dashboard to: {}", export_path.display());
    Ok(())
}
