use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::catalog::load_catalog;
use crate::library::LibraryStore;
use crate::logging;
use crate::player::PlaybackController;
use crate::storage::FileStore;

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (mut settings, settings_problem) = settings::load_settings();
    let _log_guard = logging::init(&settings);
    if let Some(problem) = settings_problem {
        warn!("{problem}");
    }

    // An explicit catalog path on the command line wins over the config.
    if let Some(path) = env::args().nth(1) {
        settings.catalog.path = PathBuf::from(path);
    }

    let catalog = load_catalog(&settings.catalog.path);

    let data_dir = settings.data_dir().unwrap_or_else(|| PathBuf::from("."));
    let store = FileStore::new(data_dir);
    info!(dir = %store.dir().display(), "using data directory");
    let library = LibraryStore::load(store, settings.storage.library_key.clone());

    let (audio_player, device_events) = AudioPlayer::spawn(settings.audio.clone());
    let player = PlaybackController::new(audio_player, settings.catalog.songs_dir.clone());
    let mut app = App::new(catalog, library, player);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(&mut terminal, &settings, &mut app, &device_events, &mut state)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.player
        .device()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    info!("bye");

    run_result
}
