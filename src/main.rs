//! cadastro - terminal client for person registration
//!
//! Registers people against a headless content backend, with cascading
//! state and city selection, and shows a registered person's details.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use cadastro::application::{App, Completion, Worker};
use cadastro::infrastructure::{Cli, Config, HttpPersonApi, PersonApi, init_logging};
use cadastro::presentation::{InputHandler, render_ui};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Entry point for the cadastro terminal client.
///
/// Reads configuration, sets up logging and the terminal, and runs the
/// event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the log file cannot be
/// opened, or terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;
    let config = Config::from_cli(cli)?;

    let api: Arc<dyn PersonApi> = Arc::new(HttpPersonApi::new(config.api_url.clone()));
    let (worker, completions) = Worker::new(api);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.start_route);
    let res = run_app(&mut terminal, &mut app, &worker, &completions);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("Terminal failure: {err}");
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Each pass applies finished backend jobs, hands newly issued jobs to the
/// worker, redraws, and waits briefly for a key press. Runs until the app
/// asks to quit.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    worker: &Worker,
    completions: &Receiver<Completion>,
) -> io::Result<()> {
    loop {
        while let Ok(done) = completions.try_recv() {
            app.complete(done.ticket, done.outcome);
        }
        for (ticket, job) in app.take_jobs() {
            worker.dispatch(ticket, job);
        }
        app.tick(Instant::now());

        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    InputHandler::handle_key_event(app, key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
