//! One tick's worth of sampled input, independent of the terminal backend.

use std::collections::HashSet;

use crate::geometry::Point;

/// Game actions, already mapped from physical keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameKey {
    Up,
    Down,
    Left,
    Right,
    /// Show or hide the store (pauses the room).
    ToggleStore,
    UpgradeWeapon,
    BuyHealth,
    /// Restart from inside the store.
    StoreRestart,
    /// Open a treasure box.
    Unlock,
    /// Trigger a restart area.
    Confirm,
    SelectMarine,
    SelectRobot,
}

/// Input sampled once per tick before any entity updates.
#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    held: HashSet<GameKey>,
    pressed: HashSet<GameKey>,
    /// Pointer position in window pixels.
    pub pointer: Point,
    /// Either mouse button is down.
    pub fire: bool,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, key: GameKey) -> bool {
        self.held.contains(&key)
    }

    /// True only on the tick the key went down.
    pub fn was_pressed(&self, key: GameKey) -> bool {
        self.pressed.contains(&key)
    }

    pub fn hold(&mut self, key: GameKey) {
        self.held.insert(key);
    }

    /// A press also counts as held for this tick.
    pub fn press(&mut self, key: GameKey) {
        self.pressed.insert(key);
        self.held.insert(key);
    }

    pub fn with_held(mut self, key: GameKey) -> Self {
        self.hold(key);
        self
    }

    pub fn with_pressed(mut self, key: GameKey) -> Self {
        self.press(key);
        self
    }

    pub fn with_pointer(mut self, pointer: Point) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn with_fire(mut self, fire: bool) -> Self {
        self.fire = fire;
        self
    }

    /// Per-axis velocity from the held direction keys; diagonals are not
    /// normalised.
    pub fn movement(&self, speed: f64) -> Point {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.is_held(GameKey::Left) {
            dx -= speed;
        }
        if self.is_held(GameKey::Right) {
            dx += speed;
        }
        if self.is_held(GameKey::Up) {
            dy -= speed;
        }
        if self.is_held(GameKey::Down) {
            dy += speed;
        }
        Point::new(dx, dy)
    }
}
