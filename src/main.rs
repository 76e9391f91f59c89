mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use boss_battle::config::{ArenaConfig, Tunables};
use boss_battle::input::{Action, FrameInput};
use boss_battle::scene::SceneManager;

use display::TerminalCanvas;

#[derive(Parser, Debug)]
#[command(name = "boss_battle")]
#[command(about = "Single-screen boss fight in the terminal")]
struct Args {
    /// Arena width in world units
    #[arg(long, default_value_t = 800.0)]
    width: f64,
    /// Arena height in world units
    #[arg(long, default_value_t = 608.0)]
    height: f64,
    /// Wall thickness in world units
    #[arg(long, default_value_t = 32.0)]
    wall: f64,
    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Where log output goes (the terminal is busy drawing the game)
    #[arg(long, default_value = "boss_battle.log")]
    log_file: PathBuf,
}

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 8;

/// Longest step fed to the simulation, so a stalled terminal can't teleport
/// anything through a wall.
const MAX_DT: f64 = 0.1;

fn action_for(code: &KeyCode) -> Option<Action> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::Right),
        KeyCode::Char(' ') => Some(Action::Attack),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
        _ => None,
    }
}

/// Tracks the frame each action was last seen and which went down this frame.
#[derive(Default)]
struct KeyTracker {
    last_seen: HashMap<Action, u64>,
    pressed: Vec<Action>,
}

impl KeyTracker {
    fn apply(&mut self, ev: KeyEvent, frame: u64) {
        if ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL) {
            self.pressed.push(Action::Quit);
            return;
        }
        let Some(action) = action_for(&ev.code) else {
            return;
        };
        match ev.kind {
            KeyEventKind::Press => {
                self.last_seen.insert(action, frame);
                self.pressed.push(action);
            }
            KeyEventKind::Repeat => {
                self.last_seen.insert(action, frame);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&action);
            }
        }
    }

    /// Snapshot for this frame; clears the pressed edges.
    fn frame_input(&mut self, frame: u64) -> FrameInput {
        let mut input = FrameInput::new();
        for action in Action::ALL {
            let held = self
                .last_seen
                .get(&action)
                .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
                .unwrap_or(false);
            input.set_held(action, held);
        }
        for action in self.pressed.drain(..) {
            input.set_pressed(action, true);
        }
        input
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop<W: Write>(
    out: &mut W,
    scenes: &mut SceneManager,
    arena: ArenaConfig,
    frame_budget: Duration,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let mut keys = KeyTracker::default();
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key) = ev {
                keys.apply(key, frame);
            }
        }
        let input = keys.frame_input(frame);

        let dt = last.elapsed().as_secs_f64().min(MAX_DT);
        last = Instant::now();

        if !scenes.update(&input, dt) {
            info!(frame, "quit requested");
            return Ok(());
        }

        let (cols, rows) = terminal::size().context("failed to query terminal size")?;
        let mut canvas = TerminalCanvas::new(cols, rows, arena);
        scenes.draw(&mut canvas);
        canvas.present(out).context("failed to draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let arena = ArenaConfig {
        width: args.width,
        height: args.height,
        wall_thickness: args.wall,
    };
    let tunables = Tunables::default();
    arena.validate().context("invalid arena")?;
    tunables.validate().context("invalid tunables")?;
    let frame_budget = Duration::from_secs_f64(1.0 / f64::from(args.fps.max(1)));
    info!(?arena, fps = args.fps, "starting boss battle");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for release/repeat events; terminals without the kitty protocol
    // refuse and the hold window covers them.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread; the loop drains the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let mut scenes = SceneManager::standard(arena, tunables);
    let result = game_loop(&mut out, &mut scenes, arena, frame_budget, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
