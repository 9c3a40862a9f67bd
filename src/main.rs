mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::{error, info, warn};

use formation_shooter::input::{self, InputAdapter};
use formation_shooter::{logging, Engine, GameConfig, Result};

#[derive(Parser, Debug)]
#[command(name = "formation_shooter", version, about = "Terminal formation shooter")]
struct Cli {
    /// TOML file overriding the default field, formation and timing constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write logs (RUST_LOG sets the level)
    #[arg(long, default_value = logging::DEFAULT_LOG_FILE)]
    log_file: PathBuf,
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Restart,
}

/// Fixed-cadence scheduler.  The loop is the only owner of the engine:
/// input arrives through `rx` and is applied between ticks, so every tick
/// runs to completion before the next intent is handled.
fn game_loop<W: Write>(
    out: &mut W,
    engine: &mut Engine,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<LoopExit> {
    let frame = engine.config().timing.tick_interval();
    let mut adapter = InputAdapter::new(&engine.config().timing);

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(key_event) = ev else {
                continue;
            };
            if key_event.kind == KeyEventKind::Press {
                match key_event.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return Ok(LoopExit::Quit);
                    }
                    KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(LoopExit::Quit);
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') if engine.is_game_over() => {
                        return Ok(LoopExit::Restart);
                    }
                    _ => {}
                }
            }
            if let Some((key, action)) = input::translate(&key_event) {
                adapter.handle(key, action, frame_start, engine);
            }
        }

        // ── Advance the simulation ────────────────────────────────────────────
        if !engine.is_game_over() {
            adapter.poll(frame_start, engine);
            engine.tick();
        }

        display::render(out, engine, terminal::size()?)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init(&cli.log_file)?;

    // Load config before entering raw mode so errors print normally
    let config = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            GameConfig::load(path)?
        }
        None => GameConfig::default(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    let keyboard_enhanced =
        push_keyboard_enhancement(&mut out, terminal::supports_keyboard_enhancement());
    if !keyboard_enhanced {
        warn!("terminal does not report key releases; using hold window");
    }

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                error!(%err, "terminal event read failed");
                break;
            }
        }
    });

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        error!(%err, "game aborted");
    }
    result
}

/// Request key-release (and key-repeat) events when the terminal supports
/// them.  Writing the escape sequence always succeeds, so support has to
/// come from the terminal's reply to a capability query.  Returns whether
/// the flags were pushed and must be popped on exit.
fn push_keyboard_enhancement<W: Write>(out: &mut W, supported: std::io::Result<bool>) -> bool {
    match supported {
        Ok(true) => {
            let flags = KeyboardEnhancementFlags::REPORT_EVENT_TYPES;
            match out.execute(PushKeyboardEnhancementFlags(flags)) {
                Ok(_) => true,
                Err(err) => {
                    warn!(%err, "cannot enable keyboard enhancement");
                    false
                }
            }
        }
        Ok(false) => false,
        Err(err) => {
            warn!(%err, "keyboard enhancement query failed");
            false
        }
    }
}

/// Play games back to back until the player quits.  A restart builds a
/// fresh engine; the engine itself has no reset path.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: &GameConfig) -> Result<()> {
    loop {
        let mut engine = Engine::new(config.clone());
        let exit = game_loop(out, &mut engine, rx)?;
        let snapshot = engine.snapshot();
        match exit {
            LoopExit::Quit => {
                info!(score = snapshot.score, ticks = snapshot.tick_count, "quit");
                return Ok(());
            }
            LoopExit::Restart => {
                info!(score = snapshot.score, outcome = ?engine.outcome(), "restart");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn enhancement_pushed_when_supported() {
        let mut out = Vec::new();
        assert!(push_keyboard_enhancement(&mut out, Ok(true)));
        assert!(!out.is_empty());
    }

    #[test]
    fn unsupported_terminal_gets_no_escape_sequence() {
        let mut out = Vec::new();
        assert!(!push_keyboard_enhancement(&mut out, Ok(false)));
        assert!(out.is_empty());
    }

    #[test]
    fn failed_query_counts_as_unsupported() {
        let mut out = Vec::new();
        let query = Err(io::Error::new(io::ErrorKind::TimedOut, "no reply"));
        assert!(!push_keyboard_enhancement(&mut out, query));
        assert!(out.is_empty());
    }
}
