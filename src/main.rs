// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

mod app;
mod channel;
mod data;
mod events;
mod records;
mod settings;
mod ui;
mod vitals;

use app::{App, View};
use channel::MessageChannel;
use records::PatientStore;
use settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "wardwatch")]
#[command(about = "Demo bedside patient-monitor TUI with simulated vitals and MQTT care-team updates")]
struct Args {
    /// Directory of per-patient JSON record documents
    #[arg(short, long, default_value = "patients")]
    records: PathBuf,

    /// Optional TOML config file (broker host, port, keepalive, namespace)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vitals refresh interval in seconds
    #[arg(long, default_value = "5")]
    refresh: u64,

    /// Open the monitor for this patient id immediately
    #[arg(short, long)]
    patient: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing()?;

    let settings = Settings::load(args.config.as_deref())?;
    let store = PatientStore::load(&args.records)?;

    // The TUI loop stays synchronous; the broker link runs on this runtime.
    let rt = tokio::runtime::Runtime::new()?;
    let channel = MessageChannel::new(settings.broker.clone());

    let mut app = App::new(store, channel, rt.handle().clone());
    if let Some(ref id) = args.patient {
        app.open_patient(id);
    }

    let result = run_tui(&mut app, Duration::from_secs(args.refresh.max(1)));

    app.shutdown();
    result
}

/// Log to a file when RUST_LOG is set; the terminal belongs to the TUI.
fn init_tracing() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = std::fs::File::create("wardwatch.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Run the TUI, restoring the terminal on the way out.
fn run_tui(app: &mut App, refresh_interval: Duration) -> Result<()> {
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
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Run the main loop
    let result = run_app(&mut terminal, app, refresh_interval);

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

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 14;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(0, area.height / 2 - 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header with link status
            ui::common::render_header(frame, app, chunks[0]);

            // Render tabs
            ui::common::render_tabs(frame, app, chunks[1]);

            // Render current view
            match app.current_view {
                View::Patients => ui::patients::render(frame, app, chunks[2]),
                View::Monitor => ui::monitor::render(frame, app, chunks[2]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout so ticks stay on schedule
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

        // Advance the vitals feed on its refresh interval
        if last_refresh.elapsed() >= refresh_interval {
            app.tick();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}
