mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::{info, warn};

use display::{GlyphSheet, TerminalSurface, COLS, ROWS};
use key_crossing::config::GameConfig;
use key_crossing::engine::{Engine, Phase, Schedule};
use key_crossing::entities::Direction;
use key_crossing::logger;
use key_crossing::resources::{Resources, Sprite};

// ── Input mapping ─────────────────────────────────────────────────────────────

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Feed one terminal event to the engine.
///
/// Directions fire on key release when the terminal reports releases
/// (keyboard-enhancement capable terminals), otherwise on press.
fn handle_event<H, R>(
    engine: &mut Engine<H, R>,
    ev: Event,
    releases_reported: bool,
    now: Duration,
) -> Flow
where
    H: Send + 'static,
    R: rand::Rng,
{
    match ev {
        Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) => {
            if kind == KeyEventKind::Press && is_quit(code, modifiers) {
                return Flow::Quit;
            }
            let trigger = if releases_reported {
                KeyEventKind::Release
            } else {
                KeyEventKind::Press
            };
            if kind == trigger {
                engine.key_up(direction_for(code));
            }
        }
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(_),
            ..
        }) => {
            engine.click(now);
        }
        _ => {}
    }
    Flow::Continue
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drive the engine until the player quits.
///
/// While running, every pending event is drained, then one frame is run and
/// the thread sleeps out the rest of the frame interval.  Once the engine
/// halts (game over) the loop blocks on input; a click resumes it.
fn run<W: Write>(
    out: W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    releases_reported: bool,
) -> anyhow::Result<()> {
    let sprites = Resources::load(&Sprite::ALL, GlyphSheet);
    let mut engine = Engine::new(config.rules.clone(), sprites, thread_rng());
    let mut surface = TerminalSurface::new(out);

    let start = Instant::now();
    let mut halted = false;

    loop {
        let frame_start = Instant::now();

        if halted {
            // Nothing animates on the game-over screen; wait for input
            let ev = rx.recv().context("input thread stopped")?;
            if let Flow::Quit = handle_event(&mut engine, ev, releases_reported, start.elapsed()) {
                return Ok(());
            }
            halted = engine.phase() == Phase::GameOver;
            continue;
        }

        while let Ok(ev) = rx.try_recv() {
            if let Flow::Quit = handle_event(&mut engine, ev, releases_reported, start.elapsed()) {
                return Ok(());
            }
        }

        if engine.frame(start.elapsed(), &mut surface)? == Schedule::Halt {
            halted = true;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < config.frame {
            thread::sleep(config.frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config = GameConfig::from_env()?;
    logger::init(config.log_path.as_deref())?;
    info!(?config, "starting");

    let (width, height) = terminal::size()?;
    if (width as usize) < COLS || (height as usize) <= ROWS {
        warn!(width, height, "terminal smaller than the play field");
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release events from the terminal.
    // Kitty-protocol terminals support this; others fall back to presses.
    let releases_reported = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

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
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &config, releases_reported);

    // Always restore the terminal
    if releases_reported {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        warn!(%err, "exiting with error");
    }
    result
}
