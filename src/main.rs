mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
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
use env_logger::Env;

use display::Viewport;
use shadow_dungeon::compute::{init_state, tick, Dungeon};
use shadow_dungeon::config::GameConfig;
use shadow_dungeon::input::{FrameInput, GameKey};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<GameKey, u64>, key: GameKey, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

const DIRECTIONS: [GameKey; 4] = [GameKey::Up, GameKey::Down, GameKey::Left, GameKey::Right];

fn map_key(code: KeyCode) -> Option<GameKey> {
    let key = match code {
        KeyCode::Up => GameKey::Up,
        KeyCode::Down => GameKey::Down,
        KeyCode::Left => GameKey::Left,
        KeyCode::Right => GameKey::Right,
        KeyCode::Enter => GameKey::Confirm,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => GameKey::Up,
            's' => GameKey::Down,
            'a' => GameKey::Left,
            'd' => GameKey::Right,
            ' ' => GameKey::ToggleStore,
            'l' => GameKey::UpgradeWeapon,
            'e' => GameKey::BuyHealth,
            'p' => GameKey::StoreRestart,
            'k' => GameKey::Unlock,
            'm' => GameKey::SelectMarine,
            'r' => GameKey::SelectRobot,
            _ => return None,
        },
        _ => return None,
    };
    Some(key)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Direction keys use the `key_frame` hold model: each press/repeat refreshes
/// the frame it was last seen and the key stays live for `HOLD_WINDOW`
/// frames. Every other key is a one-shot press delivered to exactly one tick.
/// The mouse steers the aim point and any button held down fires.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut Dungeon,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let (cols, rows) = terminal::size().context("reading terminal size")?;
    let mut view = Viewport::new(cols, rows, config);

    let mut key_frame: HashMap<GameKey, u64> = HashMap::new();
    let mut pointer = config.player.start;
    let mut fire = false;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut input = FrameInput::new();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                    if code == KeyCode::Esc
                        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
                    {
                        return Ok(());
                    }
                    let Some(key) = map_key(code) else { continue };
                    match kind {
                        KeyEventKind::Press => {
                            if DIRECTIONS.contains(&key) {
                                key_frame.insert(key, frame);
                            } else {
                                input.press(key);
                            }
                        }
                        KeyEventKind::Repeat => {
                            if DIRECTIONS.contains(&key) {
                                key_frame.insert(key, frame);
                            }
                        }
                        KeyEventKind::Release => {
                            key_frame.remove(&key);
                        }
                    }
                }
                Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                    match kind {
                        MouseEventKind::Down(_) => fire = true,
                        MouseEventKind::Up(_) => fire = false,
                        _ => {}
                    }
                    pointer = view.to_world(column, row);
                }
                Event::Resize(cols, rows) => view = Viewport::new(cols, rows, config),
                _ => {}
            }
        }

        for key in DIRECTIONS {
            if is_held(&key_frame, key, frame) {
                input.hold(key);
            }
        }
        input.pointer = pointer;
        input.fire = fire;

        *state = tick(state, &input, config);

        display::render(out, state, &view).context("rendering frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn load_config() -> anyhow::Result<GameConfig> {
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => GameConfig::load(&path)
            .with_context(|| format!("loading dungeon config from {}", path.display())),
        None => GameConfig::builtin().context("parsing built-in dungeon config"),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = load_config()?;
    log::info!("configuration loaded, window {}x{}", config.window.width, config.window.height);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
        .is_ok();

    // Blocking event reads live on their own thread so the game loop never
    // waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut state = init_state(&config);
    let result = game_loop(&mut out, &mut state, &config, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("exiting after {} frames", state.frame);
    result
}
