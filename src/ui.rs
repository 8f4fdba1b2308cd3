//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`: the track
//! list for the current view, a status box, the controls footer and, while a
//! track is selected, the modal player on top of the list.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::{App, View};
use crate::audio::AudioDevice;
use crate::config::{ControlsSettings, UiSettings};
use crate::player::PlaybackSession;
use crate::storage::KeyValueStore;

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("gg/G".to_string(), "top/bottom".to_string());
    map.insert("enter".to_string(), "play selected song".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next song".to_string());
    // H/L is filled dynamically from config.
    map.insert("f".to_string(), "add/remove library".to_string());
    map.insert("tab".to_string(), "home/library".to_string());
    map.insert("x".to_string(), "close player".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating the seek step.
fn controls_text(seek_step_percent: u8) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "h/l", "H/L", "enter", "space/p", "gg/G", "f", "tab", "x", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] seek -/+{}%", seek_step_percent))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Elapsed/total text for the player, derived from progress.
fn time_text(session: &PlaybackSession) -> String {
    match session.duration {
        Some(total) => {
            let elapsed = total.mul_f64(session.progress / 100.0);
            format!("{} / {}", format_mmss(elapsed), format_mmss(total))
        }
        None => "--:-- / --:--".to_string(),
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Compute the visible window of a list so the selected row stays centered.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

fn status_text<S: KeyValueStore, D: AudioDevice>(app: &App<S, D>) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!(" VIEW: {}", app.view.title()));
    parts.push(format!("Songs: {}", app.catalog.len()));
    parts.push(format!("Library: {}", app.library.len()));

    if app.catalog.rejected() > 0 {
        parts.push(format!("Skipped records: {}", app.catalog.rejected()));
    }

    match app.player.session() {
        Some(s) => {
            let state = if s.is_playing() { "Playing" } else { "Paused" };
            parts.push(format!("{}: {}", state, s.track().display()));
        }
        None => parts.push("Stopped".to_string()),
    }

    if let Some(notice) = &app.notice {
        parts.push(notice.clone());
    }

    parts.join(" • ")
}

fn draw_list<S: KeyValueStore, D: AudioDevice>(frame: &mut Frame, app: &App<S, D>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.view.title()));

    let tracks = app.displayed();
    if tracks.is_empty() {
        let empty = Paragraph::new(app.view.empty_text())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .block(block.padding(Padding::top(area.height.saturating_sub(2) / 2)));
        frame.render_widget(empty, area);
        return;
    }

    // Only build ListItems for the visible window.
    let playing_id = app.player.current_track().map(|t| t.id().to_string());
    let list_height = area.height.saturating_sub(2) as usize;
    let (start, end, selected_in_window) =
        visible_window(tracks.len(), list_height, app.selected.min(tracks.len() - 1));

    let items: Vec<ListItem> = tracks[start..end]
        .iter()
        .map(|t| {
            // Stored favorites may predate a catalog edit; prefer the current record.
            let t = app.catalog.get(t.id()).unwrap_or(t);
            let heart = if app.is_favorite(t) { "♥" } else { " " };
            let now = if playing_id.as_deref() == Some(t.id()) {
                "♪"
            } else {
                " "
            };
            ListItem::new(format!("{heart}{now} {}", t.display()))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    state.select(Some(selected_in_window));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_player(frame: &mut Frame, session: &PlaybackSession, ui: &UiSettings, area: Rect) {
    let popup = centered_rect_sized(64, 12, area);
    frame.render_widget(Clear, popup);

    let outer = Block::default()
        .borders(Borders::ALL)
        .title(" now playing (x closes) ")
        .title_alignment(Alignment::Center);
    let inner = outer.inner(popup);
    frame.render_widget(outer, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(2),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let track = session.track();
    let mut lines = vec![track.title.clone(), track.artist.clone()];
    if ui.show_artwork {
        if let Some(art) = &track.artwork {
            lines.push(art.clone());
        }
    }
    let meta = Paragraph::new(lines.join("\n"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(meta, rows[0]);

    let gauge = Gauge::default()
        .block(Block::bordered())
        .gauge_style(Style::default().fg(Color::Green))
        .ratio((session.progress / 100.0).clamp(0.0, 1.0))
        .label(time_text(session));
    frame.render_widget(gauge, rows[1]);

    let toggle = if session.is_playing() { "⏸" } else { "▶" };
    let controls = Paragraph::new(format!("⏮    {toggle}    ⏭")).alignment(Alignment::Center);
    frame.render_widget(controls, rows[2]);
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<S: KeyValueStore, D: AudioDevice>(
    frame: &mut Frame,
    app: &App<S, D>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" playdeck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status_par = Paragraph::new(status_text(app))
        .block(Block::bordered().title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    draw_list(frame, app, chunks[2]);

    // The player sits on top of the list and leaves header/status/footer visible.
    if let Some(session) = app.player.session() {
        draw_player(frame, session, ui_settings, chunks[2]);
    }

    let footer_text = controls_text(controls_settings.seek_step_percent);
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}
