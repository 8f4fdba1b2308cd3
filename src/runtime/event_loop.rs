use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, View};
use crate::audio::{AudioDevice, DeviceEvent};
use crate::config;
use crate::storage::KeyValueStore;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// What a key press asks for.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Action {
    Quit,
    CursorDown,
    CursorUp,
    CursorTop,
    CursorBottom,
    PlaySelected,
    TogglePlay,
    Next,
    Previous,
    SeekBy(f64),
    ToggleFavorite,
    ToggleView,
    Show(View),
    ClosePlayer,
}

/// Main terminal event loop: pumps device events into the controller, draws,
/// and handles input. Returns `Ok(())` when shutdown is requested.
pub fn run<S: KeyValueStore, D: AudioDevice>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<S, D>,
    device_events: &Receiver<DeviceEvent>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(ev) = device_events.try_recv() {
            app.player.handle_event(ev);
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let Some(action) = action_for(key, settings, state) else {
                    continue;
                };
                if apply(action, app) {
                    return Ok(());
                }
            }
        }
    }
}

/// Map a key press to an action. `gg` needs two presses.
pub fn action_for(
    key: KeyEvent,
    settings: &config::Settings,
    state: &mut EventLoopState,
) -> Option<Action> {
    let step = f64::from(settings.controls.seek_step_percent);

    if key.code == KeyCode::Char('g') {
        if state.pending_gg {
            state.pending_gg = false;
            return Some(Action::CursorTop);
        }
        state.pending_gg = true;
        return None;
    }
    // g pending should clear on any other key
    state.pending_gg = false;

    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
        KeyCode::Char('G') => Action::CursorBottom,
        KeyCode::Enter => Action::PlaySelected,
        KeyCode::Char('p') | KeyCode::Char(' ') => Action::TogglePlay,
        KeyCode::Char('l') => Action::Next,
        KeyCode::Char('h') => Action::Previous,
        KeyCode::Char('L') => Action::SeekBy(step),
        KeyCode::Char('H') => Action::SeekBy(-step),
        KeyCode::Char('f') => Action::ToggleFavorite,
        KeyCode::Tab => Action::ToggleView,
        KeyCode::Char('1') => Action::Show(View::Catalog),
        KeyCode::Char('2') => Action::Show(View::Library),
        KeyCode::Char('x') | KeyCode::Esc => Action::ClosePlayer,
        _ => return None,
    };
    Some(action)
}

/// Apply `action` to the app. Returns true when the app should quit.
pub fn apply<S: KeyValueStore, D: AudioDevice>(action: Action, app: &mut App<S, D>) -> bool {
    match action {
        Action::Quit => return true,
        Action::CursorDown => app.next(),
        Action::CursorUp => app.prev(),
        Action::CursorTop => app.select_first(),
        Action::CursorBottom => app.select_last(),
        Action::PlaySelected => app.play_selected(),
        Action::TogglePlay => app.player.toggle_play(),
        Action::Next => app.player.next(),
        Action::Previous => app.player.previous(),
        Action::SeekBy(delta) => app.player.seek_by(delta),
        Action::ToggleFavorite => app.toggle_favorite_selected(),
        Action::ToggleView => app.toggle_view(),
        Action::Show(view) => app.show(view),
        Action::ClosePlayer => app.player.close(),
    }
    false
}
