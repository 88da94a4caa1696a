use std::io::Stdout;
use std::sync::mpsc::Receiver;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::App;
use crate::config;
use crate::error::Result;
use crate::mixer::{IndicatorUpdate, Mixer};
use crate::ui;

/// Main terminal event loop: drains indicator updates, draws, and maps keys to
/// mixer commands. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    mixer: &Mixer,
    indicator_rx: &Receiver<IndicatorUpdate>,
) -> Result<()> {
    loop {
        while let Ok(update) = indicator_rx.try_recv() {
            app.apply_indicator(update);
        }

        let snapshots = mixer.snapshot();
        app.reconcile(&snapshots);
        terminal.draw(|f| ui::draw(f, app, &snapshots, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, mixer) {
                    quit_softly(settings, mixer);
                    return Ok(());
                }
            }
        }
    }
}

/// Apply one key press. Returns `true` when the user asked to quit.
fn handle_key_event(key: KeyEvent, settings: &config::Settings, app: &mut App, mixer: &Mixer) -> bool {
    let step = settings.controls.volume_step;
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('g') | KeyCode::Home => app.first(),
        KeyCode::Char('G') | KeyCode::End => app.last(),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('p') => {
            if let Some(id) = app.selected_id() {
                mixer.toggle(id);
            }
        }
        KeyCode::Char('r') => {
            if let Some(id) = app.selected_id() {
                mixer.rewind(id);
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            if let Some(id) = app.selected_id() {
                mixer.adjust_volume(id, step);
            }
        }
        KeyCode::Char('-') => {
            if let Some(id) = app.selected_id() {
                mixer.adjust_volume(id, -step);
            }
        }
        KeyCode::Char('R') => mixer.reset_all(),
        _ => {}
    }
    false
}

/// Fade everything out before the output stream goes away.
fn quit_softly(settings: &config::Settings, mixer: &Mixer) {
    if !settings.mixer.fade_out_on_quit {
        return;
    }
    let playing = mixer.snapshot().iter().any(|s| s.playing);
    if !playing {
        return;
    }
    info!("fading out before quit");
    mixer.stop_all();
    let timing = mixer.timing();
    thread::sleep(timing.full + timing.tick);
}
