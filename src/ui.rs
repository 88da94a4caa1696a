//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::App;
use crate::config::{ControlsSettings, UiSettings};
use crate::mixer::{FadePhase, Indicator, TrackSnapshot};

const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("g/G", "top/bottom"),
    ("enter/space/p", "play/stop"),
    ("r", "rewind"),
    ("R", "reset all"),
    ("q", "quit"),
];

/// Render the controls help text, incorporating the volume step.
fn controls_text(volume_step: f32) -> String {
    let mut parts: Vec<String> = CONTROLS
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect();
    parts.insert(3, format!("[+/-] volume ±{:.2}", volume_step));
    parts.join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Fraction of the track already played, in `[0.0, 1.0]`.
fn progress_ratio(position: Duration, length: Option<Duration>) -> f64 {
    match length {
        Some(len) if !len.is_zero() => (position.as_secs_f64() / len.as_secs_f64()).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

fn fade_marker(phase: FadePhase) -> &'static str {
    match phase {
        FadePhase::Steady => " ",
        FadePhase::FadingIn => "↗",
        FadePhase::FadingOut => "↘",
    }
}

/// One list row: indicator, fade direction, times, volume and id.
fn track_line(app: &App, snap: &TrackSnapshot) -> String {
    let icon = match app.indicator(&snap.id) {
        Indicator::Playing => "▶",
        Indicator::Paused => "⏸",
    };
    let total = snap
        .length
        .map(format_mmss)
        .unwrap_or_else(|| "--:--".to_string());
    format!(
        "{} {} {} / {}  vol {:.2}  {}",
        icon,
        fade_marker(snap.fade),
        format_mmss(snap.position),
        total,
        snap.target_volume,
        snap.id
    )
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    snapshots: &[TrackSnapshot],
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" segue ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();
        let playing: Vec<&str> = snapshots
            .iter()
            .filter(|s| s.playing)
            .map(|s| s.id.as_str())
            .collect();
        if playing.is_empty() {
            parts.push("Silent".to_string());
        } else {
            parts.push(format!("Playing: {}", playing.join(" → ")));
        }
        if let Some(dir) = &app.current_dir {
            parts.push(format!("Dir: {}", dir));
        }
        parts.join(" • ")
    };
    let status_par = Paragraph::new(status).block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(" status "),
    );
    frame.render_widget(status_par, chunks[1]);

    // Track list
    let items: Vec<ListItem> = snapshots
        .iter()
        .map(|snap| ListItem::new(track_line(app, snap)))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if app.has_tracks() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, chunks[2], &mut state);

    // Progress of the selected track
    let selected = app
        .selected_id()
        .and_then(|id| snapshots.iter().find(|s| s.id == id));
    let (ratio, label) = match selected {
        Some(snap) => (
            progress_ratio(snap.position, snap.length),
            format!("{} {}", snap.id, format_mmss(snap.position)),
        ),
        None => (0.0, String::new()),
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, chunks[3]);

    let footer = Paragraph::new(controls_text(controls_settings.volume_step))
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
    frame.render_widget(footer, chunks[4]);
}
