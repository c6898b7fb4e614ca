//! Game entity types: plain data plus the small accessors every system
//! shares. Frame behaviour lives in the system modules.

use std::fmt;
use std::str::FromStr;

use crate::geometry::{Collidable, Extent, Movable, Point};

// ── Room identifiers ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoomId {
    Prep,
    BattleA,
    BattleB,
    End,
}

impl RoomId {
    pub const ALL: [RoomId; 4] = [RoomId::Prep, RoomId::BattleA, RoomId::BattleB, RoomId::End];

    /// Slot of this room in `Dungeon::rooms`.
    pub const fn index(self) -> usize {
        match self {
            RoomId::Prep => 0,
            RoomId::BattleA => 1,
            RoomId::BattleB => 2,
            RoomId::End => 3,
        }
    }

    /// Name used by door destinations in the configuration file.
    pub const fn name(self) -> &'static str {
        match self {
            RoomId::Prep => "prep",
            RoomId::BattleA => "A",
            RoomId::BattleB => "B",
            RoomId::End => "end",
        }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoomId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomId::ALL
            .into_iter()
            .find(|id| id.name() == s.trim())
            .ok_or_else(|| s.trim().to_string())
    }
}

// ── Character & weapon tables ────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Character {
    #[default]
    Unset,
    Marine,
    Robot,
}

/// Gameplay differences between characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterTraits {
    /// Rivers deal no damage.
    pub hazard_immune: bool,
    /// Shooter kills pay the configured extra coins.
    pub kill_bonus: bool,
}

impl Character {
    pub const fn traits(self) -> CharacterTraits {
        match self {
            Character::Unset => CharacterTraits { hazard_immune: false, kill_bonus: false },
            Character::Marine => CharacterTraits { hazard_immune: true, kill_bonus: false },
            Character::Robot => CharacterTraits { hazard_immune: false, kill_bonus: true },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum WeaponTier {
    #[default]
    Standard,
    Advanced,
    Elite,
}

impl WeaponTier {
    pub const fn level(self) -> u8 {
        match self {
            WeaponTier::Standard => 0,
            WeaponTier::Advanced => 1,
            WeaponTier::Elite => 2,
        }
    }

    /// The next tier up, `None` at the top.
    pub const fn next(self) -> Option<WeaponTier> {
        match self {
            WeaponTier::Standard => Some(WeaponTier::Advanced),
            WeaponTier::Advanced => Some(WeaponTier::Elite),
            WeaponTier::Elite => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub position: Point,
    /// Position at the start of the current tick; blockers roll back to it.
    pub prev_position: Point,
    pub extent: Extent,
    /// Pixels per tick on each axis.
    pub speed: f64,
    pub health: f64,
    pub coins: u32,
    pub keys: u32,
    pub weapon: WeaponTier,
    pub character: Character,
    pub facing: Facing,
}

impl Player {
    pub fn new(start: Point, extent: Extent, speed: f64, health: f64) -> Self {
        Self {
            position: start,
            prev_position: start,
            extent,
            speed,
            health,
            coins: 0,
            keys: 0,
            weapon: WeaponTier::Standard,
            character: Character::Unset,
            facing: Facing::Right,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Subtract `amount`, flooring health at zero. Returns true once dead.
    pub fn receive_damage(&mut self, amount: f64) -> bool {
        self.health -= amount;
        if self.health <= 0.0 {
            self.health = 0.0;
        }
        self.is_dead()
    }

    /// No upper clamp: bought health may exceed the starting amount.
    pub fn add_health(&mut self, amount: f64) {
        self.health += amount;
    }

    pub fn earn_coins(&mut self, coins: u32) {
        self.coins = self.coins.saturating_add(coins);
    }

    /// Pay `cost` if affordable.
    pub fn spend_coins(&mut self, cost: u32) -> bool {
        match self.coins.checked_sub(cost) {
            Some(rest) => {
                self.coins = rest;
                true
            }
            None => false,
        }
    }

    pub fn earn_key(&mut self) {
        self.keys = self.keys.saturating_add(1);
    }

    pub fn use_key(&mut self) -> bool {
        match self.keys.checked_sub(1) {
            Some(rest) => {
                self.keys = rest;
                true
            }
            None => false,
        }
    }

    /// Step the weapon one tier up. False when already at the top.
    pub fn upgrade_weapon(&mut self) -> bool {
        match self.weapon.next() {
            Some(next) => {
                self.weapon = next;
                true
            }
            None => false,
        }
    }

    /// Characters are chosen once; later selections are ignored.
    pub fn select_character(&mut self, character: Character) -> bool {
        if self.character != Character::Unset || character == Character::Unset {
            return false;
        }
        self.character = character;
        true
    }

    pub fn revert_move(&mut self) {
        self.position = self.prev_position;
    }
}

impl Movable for Player {
    fn move_to(&mut self, destination: Point) {
        self.position = destination;
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    BulletKin,
    AshenBulletKin,
    KeyBulletKin,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Attack {
    /// Contact damage only.
    Melee,
    /// Fires a fireball at the player every `period` ticks.
    Shoots { period: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Movement {
    Stationary,
    Patrol { speed: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathReward {
    /// Base coins; character bonuses are added on top.
    Coins(u32),
    /// Drops a collectible key where the enemy died.
    Key,
}

/// Per-kind behaviour data, resolved from configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyProfile {
    pub health: f64,
    pub attack: Attack,
    pub movement: Movement,
    pub reward: DeathReward,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub position: Point,
    pub extent: Extent,
    pub health: f64,
    pub dead: bool,
    pub active: bool,
    /// Ticks until the next shot; zero means ready.
    pub cooldown: u32,
    pub attack: Attack,
    pub movement: Movement,
    pub reward: DeathReward,
    /// Waypoints for patrolling enemies, empty otherwise.
    pub path: Vec<Point>,
    /// Index of the waypoint currently being approached.
    pub path_index: usize,
}

impl Enemy {
    pub fn new(kind: EnemyKind, position: Point, extent: Extent, profile: EnemyProfile) -> Self {
        Self {
            kind,
            position,
            extent,
            health: profile.health,
            dead: profile.health <= 0.0,
            active: false,
            cooldown: 0,
            attack: profile.attack,
            movement: profile.movement,
            reward: profile.reward,
            path: Vec::new(),
            path_index: 0,
        }
    }

    /// A patrolling enemy starts on the first waypoint, heading for the second.
    pub fn with_path(mut self, path: Vec<Point>) -> Self {
        if let Some(&start) = path.first() {
            self.position = start;
        }
        self.path_index = if path.len() > 1 { 1 } else { 0 };
        self.path = path;
        self
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Death is sticky: once dead, healing past zero never revives.
    pub fn take_damage(&mut self, amount: f64) {
        self.health -= amount;
        if self.health <= 0.0 {
            self.dead = true;
        }
    }
}

impl Movable for Enemy {
    fn move_to(&mut self, destination: Point) {
        self.position = destination;
    }
}

// ── Obstacles & hazards ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    Wall,
    Table,
    Basket { coins: u32 },
}

#[derive(Clone, Debug)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub position: Point,
    pub extent: Extent,
    pub active: bool,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, position: Point, extent: Extent) -> Self {
        Self { kind, position, extent, active: true }
    }
}

/// A river: damages the player every tick they stand in it.
#[derive(Clone, Debug)]
pub struct Hazard {
    pub position: Point,
    pub extent: Extent,
    pub damage_per_tick: f64,
}

// ── Interactables ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct TreasureBox {
    pub position: Point,
    pub extent: Extent,
    pub coins: u32,
    pub active: bool,
}

#[derive(Clone, Debug)]
pub struct KeyPickup {
    pub position: Point,
    pub extent: Extent,
    pub active: bool,
}

#[derive(Clone, Debug)]
pub struct RestartArea {
    pub position: Point,
    pub extent: Extent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorState {
    Locked,
    /// The player was just placed here by a transition.
    JustEntered,
    Settled,
}

#[derive(Clone, Debug)]
pub struct Door {
    pub position: Point,
    pub extent: Extent,
    pub destination: RoomId,
    pub state: DoorState,
    /// Lock again when the player steps off while the room is uncleared.
    pub relock: bool,
}

impl Door {
    pub fn new(position: Point, extent: Extent, destination: RoomId) -> Self {
        Self { position, extent, destination, state: DoorState::Locked, relock: false }
    }

    pub fn is_unlocked(&self) -> bool {
        self.state != DoorState::Locked
    }

    pub fn unlock(&mut self) {
        self.state = DoorState::Settled;
    }

    pub fn lock(&mut self) {
        self.state = DoorState::Locked;
    }

    /// Mark the door the player has just been placed on.
    pub fn arrive(&mut self) {
        self.state = DoorState::JustEntered;
    }
}

/// The upgrade shop. While visible the current room is paused.
#[derive(Clone, Debug)]
pub struct Store {
    pub position: Point,
    pub visible: bool,
}

impl Store {
    pub fn new(position: Point) -> Self {
        Self { position, visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileKind {
    /// Fired by the player; hurts enemies.
    Bullet,
    /// Fired by enemies; hurts the player.
    Fireball,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub position: Point,
    /// Unit vector.
    pub direction: Point,
    pub speed: f64,
    /// Fixed at launch; later weapon upgrades do not apply.
    pub damage: f64,
    pub extent: Extent,
    pub active: bool,
}

impl Projectile {
    /// Aim from `start` toward `target`. `None` when the two coincide.
    pub fn launch(
        kind: ProjectileKind,
        start: Point,
        target: Point,
        speed: f64,
        damage: f64,
        extent: Extent,
    ) -> Option<Self> {
        let direction = (target - start).normalized()?;
        Some(Self { kind, position: start, direction, speed, damage, extent, active: true })
    }
}

impl Movable for Projectile {
    fn move_to(&mut self, destination: Point) {
        self.position = destination;
    }
}

// ── Collision boxes ──────────────────────────────────────────────────────────

macro_rules! impl_collidable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Collidable for $ty {
                fn position(&self) -> Point {
                    self.position
                }

                fn extent(&self) -> Extent {
                    self.extent
                }
            }
        )*
    };
}

impl_collidable!(
    Player,
    Enemy,
    Obstacle,
    Hazard,
    TreasureBox,
    KeyPickup,
    RestartArea,
    Door,
    Projectile,
);
