use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use mushaf::app::{AppCommand, AppState};
use mushaf::async_tasks::{AsyncTaskRunner, TaskMessage};
use mushaf::audio::{AudioController, ProcessBackend};
use mushaf::bookmarks::BookmarkStore;
use mushaf::cli::Cli;
use mushaf::constants::{
    AUDIO_TICK_MS, FRAME_DURATION_MS, MIN_TERMINAL_HEIGHT, MIN_TERMINAL_WIDTH, RESIZE_DEBOUNCE_MS,
};
use mushaf::error::{AppError, Result};
use mushaf::persistence::PersistenceManager;
use mushaf::quran::{AudioCatalog, SectionIndex};
use mushaf::types::Config;
use mushaf::ui;
use mushaf::ui::theme::PagePalette;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Validate CLI arguments
    cli.validate().map_err(AppError::Other)?;

    // Initialize logging if requested; the guard flushes on drop
    let _log_guard = match &cli.log_file {
        Some(log_file) => {
            let guard = init_logging(log_file)?;
            tracing::info!("=== Mushaf reader starting ===");
            tracing::info!("Log file: {}", log_file);
            Some(guard)
        }
        None => None,
    };

    // Check terminal size
    let (width, height) = crossterm::terminal::size()?;
    if width < MIN_TERMINAL_WIDTH || height < MIN_TERMINAL_HEIGHT {
        tracing::error!(
            "Terminal too small: {}x{} (minimum: {}x{})",
            width,
            height,
            MIN_TERMINAL_WIDTH,
            MIN_TERMINAL_HEIGHT
        );
        return Err(AppError::TerminalTooSmall);
    }
    tracing::debug!("Terminal size: {}x{}", width, height);

    // Background detection talks to the terminal, so it runs before raw mode
    let palette = PagePalette::detect();

    // Setup terminal
    setup_terminal()?;
    tracing::debug!("Terminal setup completed");

    // Setup Ctrl-C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        tracing::info!("Ctrl-C received, shutting down");
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| AppError::Other(format!("Failed to set Ctrl-C handler: {}", e)))?;

    // Run the application
    let result = run_app(cli, palette, running).await;

    // Cleanup terminal
    cleanup_terminal()?;
    tracing::debug!("Terminal cleanup completed");

    result
}

fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide)?;

    // Set panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal();
        original_hook(panic_info);
    }));

    Ok(())
}

fn cleanup_terminal() -> Result<()> {
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

fn init_logging(log_file: &str) -> Result<WorkerGuard> {
    let path = Path::new(log_file);
    let file_name = path
        .file_name()
        .ok_or_else(|| AppError::Other(format!("Invalid log file path: {}", log_file)))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    // Truncate any previous log
    std::fs::File::create(path)
        .map_err(|e| AppError::Other(format!("Failed to open log file: {}", e)))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    // Only our crate logs unless RUST_LOG says otherwise
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mushaf=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| AppError::Other(format!("Failed to initialize logging: {}", e)))?;

    Ok(guard)
}

async fn run_app(cli: Cli, palette: PagePalette, running: Arc<AtomicBool>) -> Result<()> {
    // Create backend and terminal
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    // Create task channel
    let (task_tx, mut task_rx) = mpsc::unbounded_channel();

    // Initialize persistence and app state
    let persistence = PersistenceManager::new().map_err(|e| {
        tracing::error!("Failed to initialize persistence: {:#}", e);
        AppError::Other(format!("Failed to initialize persistence: {:#}", e))
    })?;
    let saved_config = persistence.load_config().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {:#}. Using defaults.", e);
        Config::default()
    });

    let mut app = initialize_app_state(&cli, &persistence, saved_config.clone())?;
    app.palette = palette;

    // Create task runner
    let task_runner = AsyncTaskRunner::new(task_tx);

    // Create resize debouncer
    let resize_tx = task_runner.spawn_resize_debouncer(RESIZE_DEBOUNCE_MS);

    // Marks arrive as a message; the reader is usable before they do
    task_runner.spawn_load_marks(app.bookmark_store.clone());
    let ticker = task_runner.spawn_audio_ticker(AUDIO_TICK_MS);

    // Run main event loop
    run_event_loop(
        &mut terminal,
        &mut app,
        &mut task_rx,
        &task_runner,
        running,
        &resize_tx,
    )
    .await?;

    ticker.abort();
    app.stop_audio();

    // Save state before quitting
    save_app_state(&app, &persistence, saved_config).await;

    tracing::info!("Mushaf reader shutting down");
    Ok(())
}

fn initialize_app_state(
    cli: &Cli,
    persistence: &PersistenceManager,
    mut config: Config,
) -> Result<AppState> {
    tracing::debug!("Initializing application state");

    // CLI overrides
    if let Some(direction) = cli.direction() {
        config.direction = direction;
    }
    if let Some(dir) = &cli.pages_dir {
        config.pages_dir = Some(dir.clone());
    }
    if let Some(dir) = &cli.audio_dir {
        config.audio_dir = Some(dir.clone());
    }
    if let Some(player) = &cli.player {
        config.player_command = player.clone();
    }
    tracing::debug!(
        "Config: direction={:?}, jump_delay_ms={}, player='{}'",
        config.direction,
        config.jump_delay_ms,
        config.player_command
    );

    let audio_dir = config
        .audio_dir
        .clone()
        .unwrap_or_else(|| persistence.config_dir().join("audio"));
    let catalog = AudioCatalog::load(&audio_dir);
    tracing::info!("{} narrated pages in {}", catalog.len(), audio_dir.display());

    let audio = AudioController::new(
        Box::new(ProcessBackend::new(&config.player_command)),
        catalog,
        Duration::from_secs(config.playback_ceiling_secs),
    );

    let index = SectionIndex::global();
    let start_page = cli.start_page(|id| index.start_page(id));
    if let Some(page) = start_page {
        tracing::info!("Opening at page {}", page);
    }

    let marks = BookmarkStore::new(Arc::new(persistence.marks_store()));
    let mut app = AppState::new(config, marks, audio, start_page);

    // Get terminal size and lay out the page view
    let (width, height) = crossterm::terminal::size()?;
    app.update_viewport_size(width, height);
    tracing::debug!("Viewport initialized: {}x{}", width, height);

    Ok(app)
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    task_rx: &mut mpsc::UnboundedReceiver<TaskMessage>,
    task_runner: &AsyncTaskRunner,
    running: Arc<AtomicBool>,
    resize_tx: &mpsc::UnboundedSender<(u16, u16)>,
) -> Result<()> {
    let frame_duration = Duration::from_millis(FRAME_DURATION_MS);

    while running.load(Ordering::SeqCst) && !app.should_quit {
        let frame_start = Instant::now();

        // Process all pending task messages (non-blocking)
        while let Ok(msg) = task_rx.try_recv() {
            handle_task_message(app, msg);
        }
        dispatch_commands(app, task_runner);

        // Render UI
        terminal.draw(|f| {
            ui::layout::render(f, app);
        })?;

        // Poll for input events (non-blocking)
        if event::poll(Duration::from_millis(0))? {
            let ev = event::read()?;
            handle_event(app, ev, resize_tx)?;
            dispatch_commands(app, task_runner);
        }

        // Sleep to maintain frame rate
        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            tokio::time::sleep(frame_duration - elapsed).await;
        }
    }

    Ok(())
}

fn handle_task_message(app: &mut AppState, msg: TaskMessage) {
    match msg {
        TaskMessage::MarksLoaded { marks } => {
            tracing::info!(
                "Marks loaded: reading={:?}, hifdh={:?}, memorized={}",
                marks.reading,
                marks.hifdh,
                marks.hifdh_pages.len()
            );
            app.handle_marks_loaded(marks);
        }

        TaskMessage::MarkSaved { kind, page, saved } => {
            tracing::debug!("Mark {:?} at page {} saved={}", kind, page, saved);
            app.handle_mark_saved(kind, page, saved);
        }

        TaskMessage::HifdhPagesUpdated { pages } => {
            // The in-memory list was updated when the key was pressed
            tracing::debug!("Stored memorized pages: {}", pages.len());
        }

        TaskMessage::AutoSaveUpdated { enabled } => {
            tracing::debug!("Auto-save stored: {}", enabled);
        }

        TaskMessage::BookmarkSaved { page, saved } => {
            if !saved {
                tracing::warn!("Bookmark {:?} was not stored", page);
            }
        }

        TaskMessage::ScrollDue {
            generation,
            display_index,
        } => {
            app.apply_scroll(generation, display_index);
        }

        TaskMessage::AudioTick => {
            app.audio_tick();
        }

        TaskMessage::ResizeComplete { width, height } => {
            tracing::info!("Resize complete: {}x{}", width, height);
            app.update_viewport_size(width, height);
        }
    }
}

/// Hand queued side effects to the task runner
fn dispatch_commands(app: &mut AppState, task_runner: &AsyncTaskRunner) {
    for command in app.take_commands() {
        match command {
            AppCommand::Scroll {
                generation,
                display_index,
                delay,
            } => task_runner.spawn_delayed_scroll(generation, display_index, delay),
            AppCommand::SaveMark { kind, page } => {
                task_runner.spawn_save_mark(app.bookmark_store.clone(), kind, page)
            }
            AppCommand::ToggleHifdhPage(page) => {
                task_runner.spawn_toggle_hifdh_page(app.bookmark_store.clone(), page)
            }
            AppCommand::SetAutoSave(enabled) => {
                task_runner.spawn_set_auto_save(app.bookmark_store.clone(), enabled)
            }
            AppCommand::SaveBookmark(page) => {
                task_runner.spawn_save_bookmark(app.bookmark_store.clone(), page)
            }
        }
    }
}

fn handle_event(
    app: &mut AppState,
    ev: Event,
    resize_tx: &mpsc::UnboundedSender<(u16, u16)>,
) -> Result<()> {
    match ev {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            ui::handle_key_event(app, key)?;
        }
        Event::Resize(width, height) => {
            // Update viewport immediately for UI
            app.update_viewport_size(width, height);

            // Send to debouncer for the settled size
            let _ = resize_tx.send((width, height));
        }
        _ => {}
    }
    Ok(())
}

async fn save_app_state(app: &AppState, persistence: &PersistenceManager, mut config: Config) {
    if let Some(page) = app.quit_save_target() {
        tracing::info!("Auto-saving reading mark at page {}", page);
        app.bookmark_store.save_reading_mark(page).await;
    }

    // CLI overrides are per-session; only a direction toggled in the reader persists
    if app.direction_toggled() {
        config.direction = app.navigator.direction();
    }
    if let Err(e) = persistence.save_config(&config) {
        tracing::error!("Failed to save config: {:#}", e);
    }
}
