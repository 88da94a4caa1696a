use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::open_default_output;
use crate::error::{Error, Result};
use crate::library::scan;
use crate::logging;
use crate::mixer::{IndicatorUpdate, Notifier};

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<()> {
    let (settings, config_problem) = settings::load_settings();

    match logging::init(&settings.logging) {
        Ok(path) => info!(log = ?path, "segue starting"),
        Err(e) => eprintln!("segue: logging disabled: {e}"),
    }
    if let Some(msg) = config_problem {
        warn!("{msg}");
    }

    let dir = env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| {
        env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });

    let tracks = scan(&dir, &settings.library);
    if tracks.is_empty() {
        return Err(Error::EmptyLibrary(dir));
    }
    info!(dir = ?dir, tracks = tracks.len(), "library scanned");

    let stream = open_default_output()?;
    let (indicator_tx, indicator_rx) = mpsc::channel::<IndicatorUpdate>();
    let notifier: Arc<dyn Notifier> = Arc::new(indicator_tx);
    let (mixer, engine) = startup::build_mixer(&stream, &tracks, &settings, notifier)?;

    let mut app = App::new(tracks.iter().map(|t| t.id.clone()).collect());
    app.set_current_dir(dir.display().to_string());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mixer, &indicator_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    engine.shutdown();
    info!("segue stopped");

    run_result
}
