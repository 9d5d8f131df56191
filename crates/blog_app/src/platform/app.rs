use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use blog_core::{update, BlogState, Msg};
use engine_logging::{engine_info, engine_warn, LogDestination};

use super::config::{load_config, DEFAULT_CONFIG_FILE};
use super::effects::EffectRunner;
use super::ui::commands::{parse_command, Command};
use super::ui::constants::{HELP_LINES, PROMPT};
use super::ui::render;

/// Everything the main loop reacts to.
#[derive(Debug)]
pub(crate) enum AppEvent {
    Core(Msg),
    Show,
    Help,
    Invalid(String),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = load_config(&config_path)?.with_env(|key| std::env::var(key).ok());

    // The terminal shows the rendered blog, so logs go to the file only.
    engine_logging::initialize(LogDestination::File, config.log_level()?, &config.log_file);
    engine_info!(
        "Starting blog composer: endpoint={} output_dir={:?}",
        config.endpoint,
        config.output_dir
    );

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.engine_config(), event_tx.clone())
        .context("failed to start generation engine")?;
    spawn_input_reader(event_tx);

    let mut out = io::stdout();
    write_lines(&mut out, HELP_LINES.iter().map(|line| line.to_string()))?;
    writeln!(out, "Models: {}", config.models.join(", "))?;
    write!(out, "{PROMPT}")?;
    out.flush()?;

    let mut state = BlogState::new();
    while let Ok(event) = event_rx.recv() {
        // Coalesce whatever else is already queued into one render.
        let mut inbox = vec![event];
        inbox.extend(event_rx.try_iter());

        let mut show = false;
        for event in inbox {
            match event {
                AppEvent::Core(msg) => {
                    let (next, effects) = update(std::mem::take(&mut state), msg);
                    state = next;
                    runner.enqueue(effects);
                }
                AppEvent::Show => show = true,
                AppEvent::Help => {
                    write_lines(&mut out, HELP_LINES.iter().map(|line| line.to_string()))?;
                }
                AppEvent::Invalid(message) => writeln!(out, "{message}")?,
                AppEvent::Quit => {
                    engine_info!("Quit requested");
                    return Ok(());
                }
            }
        }

        if state.consume_dirty() || show {
            write_lines(&mut out, render::render(&state.view()))?;
        }
        write!(out, "{PROMPT}")?;
        out.flush()?;
    }

    Ok(())
}

/// Reads stdin on its own thread; end of input quits.
fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    engine_warn!("Failed to read input: {}", err);
                    break;
                }
            };
            let event = match parse_command(&line) {
                Ok(Command::Core(msg)) => AppEvent::Core(msg),
                Ok(Command::Show) => AppEvent::Show,
                Ok(Command::Help) => AppEvent::Help,
                Ok(Command::Quit) => AppEvent::Quit,
                Err(err) => AppEvent::Invalid(err.to_string()),
            };
            if event_tx.send(event).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::Quit);
    });
}

fn write_lines(out: &mut impl Write, lines: impl IntoIterator<Item = String>) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
