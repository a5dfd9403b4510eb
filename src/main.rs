mod audio;
mod cli;
mod config;
mod controller;
mod error;
mod logging;
mod model;
mod playback;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;
use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::Mutex;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rodio::OutputStream;

use view::AppView;
use audio::{RodioOutput, StandardFetcher};
use controller::AppController;
use model::{AppModel, Catalog, ImageResolver};
use playback::{PlaybackController, OUTPUT_POLL_INTERVAL};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();

    let file_config = config::find_config_file(args.config.as_deref())
        .and_then(|path| match config::load_config(&path) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                eprintln!("Warning: ignoring config file {}: {}", path.display(), e);
                None
            }
        });
    let config = config::Config::resolve(file_config, &args);

    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== jukebox-rs starting ===");
    tracing::debug!(?config, "Configuration resolved");

    // The stream owns the device and must stay alive on this task
    let (_stream, stream_handle) = OutputStream::try_default().context("no audio output device available")?;
    let output = RodioOutput::new(stream_handle, config.volume);

    let catalog = Arc::new(Catalog::default());
    let playback = PlaybackController::new(
        catalog,
        config.playback_config(),
        Box::new(output),
        Arc::new(StandardFetcher::new()),
    );
    let output_listener = playback.start_output_listener(OUTPUT_POLL_INTERVAL);

    let model = Arc::new(Mutex::new(AppModel::new(ImageResolver::new())));
    let controller = AppController::new(model.clone(), playback, config.cell_width_px);
    model.lock().await.set_volume(config.volume).await;

    let state_listener = controller.start_player_event_listener();

    let controller_for_mount = controller.clone();
    tokio::spawn(async move {
        controller_for_mount.mount_song_list().await;
    });

    if config.autoplay {
        let controller_for_init = controller.clone();
        let start_song = config.start_song.clone();
        tokio::spawn(async move {
            controller_for_init.initialize_playback(start_song).await;
        });
    }

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (columns, _rows) = crossterm::terminal::size()?;
    controller.handle_resize(columns).await;

    let res = run_app(&mut terminal, model.clone(), controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    output_listener.abort();
    state_listener.abort();

    tracing::info!("jukebox-rs shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> Result<()> {
    loop {
        let (now_playing, ui_state, song_list, should_quit) = {
            let model_guard = model.lock().await;

            // Auto-clear old errors (after 5 seconds)
            model_guard.auto_clear_old_errors().await;

            (
                model_guard.get_now_playing().await,
                model_guard.get_ui_state().await,
                model_guard.get_song_list().await,
                model_guard.should_quit().await,
            )
        };

        if should_quit {
            break;
        }

        let mut progress_area = None;
        terminal.draw(|f| {
            progress_area = Some(AppView::render(f, &now_playing, &ui_state, &song_list));
        })?;
        if let Some(area) = progress_area {
            controller.set_progress_area(area).await;
        }

        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;
            if let Err(e) = controller.handle_event(event).await {
                tracing::warn!(error = %e, "Event handling failed");
            }
        }
    }

    Ok(())
}
