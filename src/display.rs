//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only translates
//! world pixels into terminal cells and state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use shadow_dungeon::compute::{Dungeon, GameStatus};
use shadow_dungeon::config::GameConfig;
use shadow_dungeon::entities::{Character, EnemyKind, Facing, ObstacleKind, RoomId};
use shadow_dungeon::geometry::{Bounds, Collidable, Point};
use shadow_dungeon::rooms::Room;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_COINS: Color = Color::Yellow;
const C_HUD_KEYS: Color = Color::Cyan;
const C_HUD_WEAPON: Color = Color::Magenta;
const C_PLAYER: Color = Color::White;
const C_WALL: Color = Color::Grey;
const C_TABLE: Color = Color::DarkYellow;
const C_BASKET: Color = Color::Yellow;
const C_RIVER: Color = Color::Blue;
const C_DOOR_LOCKED: Color = Color::Red;
const C_DOOR_OPEN: Color = Color::Green;
const C_TREASURE: Color = Color::Yellow;
const C_KEY: Color = Color::Cyan;
const C_RESTART: Color = Color::DarkGreen;
const C_BULLET: Color = Color::Cyan;
const C_FIREBALL: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Maps the world window onto the terminal's play area: rows 2..rows-2,
/// columns 1..cols-1 (row 0 is the HUD, the last row the controls hint).
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    world_width: f64,
    world_height: f64,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, config: &GameConfig) -> Self {
        Self { cols, rows, world_width: config.window.width, world_height: config.window.height }
    }

    fn play_cols(&self) -> f64 {
        f64::from(self.cols.saturating_sub(2).max(1))
    }

    fn play_rows(&self) -> f64 {
        f64::from(self.rows.saturating_sub(4).max(1))
    }

    /// Terminal cell holding a world point.
    pub fn to_cell(&self, p: Point) -> (u16, u16) {
        let cx = (p.x / self.world_width * self.play_cols()).clamp(0.0, self.play_cols() - 1.0);
        let cy = (p.y / self.world_height * self.play_rows()).clamp(0.0, self.play_rows() - 1.0);
        (1 + cx as u16, 2 + cy as u16)
    }

    /// World point at the centre of a terminal cell (for the mouse pointer).
    pub fn to_world(&self, col: u16, row: u16) -> Point {
        let cx = f64::from(col.saturating_sub(1)) + 0.5;
        let cy = f64::from(row.saturating_sub(2)) + 0.5;
        Point::new(
            (cx / self.play_cols() * self.world_width).clamp(0.0, self.world_width),
            (cy / self.play_rows() * self.world_height).clamp(0.0, self.world_height),
        )
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &Dungeon, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state, view)?;

    let room = state.current_room();
    draw_room(out, room, view)?;

    for bullet in &state.projectiles.bullets {
        draw_glyph(out, view, bullet.position, "•", C_BULLET)?;
    }
    for fireball in &state.projectiles.fireballs {
        draw_glyph(out, view, fireball.position, "✶", C_FIREBALL)?;
    }

    draw_player(out, state, view)?;

    match state.status() {
        GameStatus::Playing if state.current == RoomId::Prep => {
            draw_start_screen(out, state, view)?
        }
        GameStatus::Playing => {}
        status => draw_end_message(out, status, view)?,
    }
    if state.store.visible {
        draw_store(out, view)?;
    }
    draw_controls_hint(out, view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &Dungeon, view: &Viewport) -> std::io::Result<()> {
    let p = &state.player;
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(format!("Health {:>6.1}  ", p.health)))?;
    out.queue(style::SetForegroundColor(C_HUD_COINS))?;
    out.queue(Print(format!("Coins {:>4}  ", p.coins)))?;
    out.queue(style::SetForegroundColor(C_HUD_KEYS))?;
    out.queue(Print(format!("Keys {:>2}  ", p.keys)))?;
    out.queue(style::SetForegroundColor(C_HUD_WEAPON))?;
    out.queue(Print(format!("Weapon {}", p.weapon.level())))?;

    let room_str = format!("[ {} ]", room_title(state.current));
    let rx = view.cols.saturating_sub(room_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(&room_str))?;
    Ok(())
}

fn room_title(id: RoomId) -> &'static str {
    match id {
        RoomId::Prep => "PREPARATION",
        RoomId::BattleA => "BATTLE A",
        RoomId::BattleB => "BATTLE B",
        RoomId::End => "END",
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_glyph<W: Write>(
    out: &mut W,
    view: &Viewport,
    at: Point,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let (col, row) = view.to_cell(at);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

/// Fill every cell covered by `bounds`.
fn fill_bounds<W: Write>(
    out: &mut W,
    view: &Viewport,
    bounds: Bounds,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let (left, top) = view.to_cell(Point::new(bounds.left, bounds.top));
    let (right, bottom) = view.to_cell(Point::new(bounds.right, bounds.bottom));
    out.queue(style::SetForegroundColor(color))?;
    for row in top..=bottom {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print(glyph.repeat(usize::from(right - left) + 1)))?;
    }
    Ok(())
}

fn draw_room<W: Write>(out: &mut W, room: &Room, view: &Viewport) -> std::io::Result<()> {
    for river in &room.hazards {
        fill_bounds(out, view, river.bounds(), "≈", C_RIVER)?;
    }
    if let Some(area) = &room.restart_area {
        fill_bounds(out, view, area.bounds(), "·", C_RESTART)?;
        draw_glyph(out, view, area.position, "↺", C_RESTART)?;
    }
    for door in &room.doors {
        let (glyph, color) = if door.is_unlocked() {
            ("░", C_DOOR_OPEN)
        } else {
            ("▓", C_DOOR_LOCKED)
        };
        fill_bounds(out, view, door.bounds(), glyph, color)?;
    }
    for obstacle in room.obstacles.iter().filter(|o| o.active) {
        let (glyph, color) = match obstacle.kind {
            ObstacleKind::Wall => ("█", C_WALL),
            ObstacleKind::Table => ("╥", C_TABLE),
            ObstacleKind::Basket { .. } => ("U", C_BASKET),
        };
        fill_bounds(out, view, obstacle.bounds(), glyph, color)?;
    }
    for chest in room.treasure_boxes.iter().filter(|b| b.active) {
        draw_glyph(out, view, chest.position, "$", C_TREASURE)?;
    }
    for key in room.keys.iter().filter(|k| k.active) {
        draw_glyph(out, view, key.position, "⚷", C_KEY)?;
    }
    for enemy in room.enemies.iter().filter(|e| e.active) {
        let (glyph, color) = match enemy.kind {
            EnemyKind::BulletKin => ("B", Color::Green),
            EnemyKind::AshenBulletKin => ("A", Color::DarkRed),
            EnemyKind::KeyBulletKin => ("K", Color::Cyan),
        };
        draw_glyph(out, view, enemy.position, glyph, color)?;
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, state: &Dungeon, view: &Viewport) -> std::io::Result<()> {
    let p = &state.player;
    let glyph = match (p.character, p.facing) {
        (Character::Unset, _) => "@",
        (Character::Marine, Facing::Left) => "◄M",
        (Character::Marine, Facing::Right) => "M►",
        (Character::Robot, Facing::Left) => "◄R",
        (Character::Robot, Facing::Right) => "R►",
    };
    draw_glyph(out, view, p.position, glyph, C_PLAYER)
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_start_screen<W: Write>(
    out: &mut W,
    state: &Dungeon,
    view: &Viewport,
) -> std::io::Result<()> {
    let top = view.rows / 3;
    draw_centered(out, view, top, "★  SHADOW  DUNGEON  ★", Color::Cyan)?;
    if state.player.character == Character::Unset {
        draw_centered(out, view, top + 2, "Choose a character to open the door:", Color::White)?;
        draw_centered(out, view, top + 3, "[M] Marine: immune to rivers", Color::Green)?;
        draw_centered(out, view, top + 4, "[R] Robot:  extra coins per kill", Color::Yellow)?;
    } else {
        draw_centered(out, view, top + 2, "The door is open. Good luck.", C_HINT)?;
    }
    Ok(())
}

fn draw_end_message<W: Write>(
    out: &mut W,
    status: GameStatus,
    view: &Viewport,
) -> std::io::Result<()> {
    let (banner, color) = match status {
        GameStatus::GameOver => ("║    GAME  OVER      ║", Color::Red),
        _ => ("║     YOU  WON       ║", Color::Green),
    };
    let top = view.rows / 3;
    draw_centered(out, view, top, "╔════════════════════╗", color)?;
    draw_centered(out, view, top + 1, banner, color)?;
    draw_centered(out, view, top + 2, "╚════════════════════╝", color)?;
    draw_centered(out, view, top + 3, "Stand on ↺ and press ENTER to play again", C_HINT)?;
    Ok(())
}

fn draw_store<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let lines = [
        "╔══════════════ STORE ══════════════╗",
        "║  [L] Upgrade weapon               ║",
        "║  [E] Buy health                   ║",
        "║  [P] Restart game                 ║",
        "║  [SPACE] Close                    ║",
        "╚═══════════════════════════════════╝",
    ];
    let top = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, line) in lines.iter().enumerate() {
        draw_centered(out, view, top + i as u16, line, Color::Yellow)?;
    }
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("WASD: Move  Mouse: Aim/Fire  K: Open box  SPACE: Store  ESC: Quit"))?;
    Ok(())
}
