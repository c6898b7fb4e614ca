//! Game configuration: balance numbers and room layouts, loaded from RON.
//!
//! Stats are typed fields. Room layouts keep the compact coordinate-group
//! format of the level files:
//!
//! * points: `"x,y;x,y;..."`
//! * doors: `"x,y,room;..."` where `room` is `prep`, `A`, `B` or `end`
//! * treasure boxes: `"x,y,coins;..."`
//! * patrol enemies: one string per enemy; its whole point list is the path
//!
//! An empty string (or `"0"`) means the room has none of that entity.
//! Everything is parsed and the room graph validated before any room exists,
//! so a `GameConfig` that loaded successfully can always build a dungeon.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::entities::{RoomId, WeaponTier};
use crate::geometry::{Bounds, Extent, Point};

/// The layout shipped with the game.
pub const DEFAULT_CONFIG: &str = include_str!("../assets/dungeon.ron");

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("malformed coordinates in `{field}`: {value:?}")]
    MalformedCoordinates { field: String, value: String },

    #[error("unknown room `{room}` in `{field}`")]
    UnknownRoom { field: String, room: String },

    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: String, value: f64 },

    #[error("door in room {room} leads back into the same room")]
    SelfLoop { room: RoomId },

    #[error("room {from} has a door to {to}, but {to} has no door leading back")]
    MissingReturnDoor { from: RoomId, to: RoomId },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ── Typed sections (identical in file and memory) ────────────────────────────

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct WindowConfig {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct WeaponConfig {
    pub standard_damage: f64,
    pub advanced_damage: f64,
    pub elite_damage: f64,
}

impl WeaponConfig {
    pub fn damage(&self, tier: WeaponTier) -> f64 {
        match tier {
            WeaponTier::Standard => self.standard_damage,
            WeaponTier::Advanced => self.advanced_damage,
            WeaponTier::Elite => self.elite_damage,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct BulletConfig {
    /// Pixels per tick.
    pub speed: f64,
    /// Ticks between player shots.
    pub fire_rate: u32,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct FireballConfig {
    pub speed: f64,
    pub damage: f64,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ShooterConfig {
    pub health: f64,
    /// Ticks between shots.
    pub shoot_frequency: u32,
    pub coin: u32,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PatrolConfig {
    pub health: f64,
    pub speed: f64,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct EnemiesConfig {
    /// Damage per tick while an enemy overlaps the player.
    pub contact_damage: f64,
    pub bullet_kin: ShooterConfig,
    pub ashen_bullet_kin: ShooterConfig,
    pub key_bullet_kin: PatrolConfig,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct HazardConfig {
    pub river_damage_per_frame: f64,
    pub basket_coin: u32,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ExtentConfig {
    pub player: Extent,
    pub bullet: Extent,
    pub fireball: Extent,
    pub bullet_kin: Extent,
    pub ashen_bullet_kin: Extent,
    pub key_bullet_kin: Extent,
    pub wall: Extent,
    pub table: Extent,
    pub basket: Extent,
    pub river: Extent,
    pub door: Extent,
    pub treasure_box: Extent,
    pub key: Extent,
    pub restart_area: Extent,
}

impl ExtentConfig {
    fn named(&self) -> [(&'static str, Extent); 14] {
        [
            ("extents.player", self.player),
            ("extents.bullet", self.bullet),
            ("extents.fireball", self.fireball),
            ("extents.bullet_kin", self.bullet_kin),
            ("extents.ashen_bullet_kin", self.ashen_bullet_kin),
            ("extents.key_bullet_kin", self.key_bullet_kin),
            ("extents.wall", self.wall),
            ("extents.table", self.table),
            ("extents.basket", self.basket),
            ("extents.river", self.river),
            ("extents.door", self.door),
            ("extents.treasure_box", self.treasure_box),
            ("extents.key", self.key),
            ("extents.restart_area", self.restart_area),
        ]
    }
}

// ── Sections holding coordinates ─────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize)]
struct RawPlayerConfig {
    start: String,
    speed: f64,
    initial_health: f64,
    robot_extra_coin: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct PlayerConfig {
    pub start: Point,
    pub speed: f64,
    pub initial_health: f64,
    /// Extra coins per shooter kill for the Robot.
    pub robot_extra_coin: u32,
}

#[derive(Clone, Debug, Deserialize)]
struct RawStoreConfig {
    position: String,
    weapon_cost: u32,
    health_cost: u32,
    health_bonus: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct StoreConfig {
    pub position: Point,
    pub weapon_cost: u32,
    pub health_cost: u32,
    pub health_bonus: f64,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct RawRoom {
    doors: String,
    restart_area: String,
    bullet_kin: String,
    ashen_bullet_kin: String,
    key_bullet_kin: Vec<String>,
    wall: String,
    table: String,
    basket: String,
    river: String,
    treasure_box: String,
}

#[derive(Clone, Debug, Deserialize)]
struct RawRooms {
    prep: RawRoom,
    battle_a: RawRoom,
    battle_b: RawRoom,
    end: RawRoom,
}

#[derive(Clone, Debug, Deserialize)]
struct RawConfig {
    window: WindowConfig,
    player: RawPlayerConfig,
    store: RawStoreConfig,
    weapons: WeaponConfig,
    bullet: BulletConfig,
    fireball: FireballConfig,
    enemies: EnemiesConfig,
    hazards: HazardConfig,
    extents: ExtentConfig,
    rooms: RawRooms,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorSpec {
    pub position: Point,
    pub destination: RoomId,
}

/// Parsed spawn data for one room.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoomLayout {
    pub doors: Vec<DoorSpec>,
    pub restart_area: Option<Point>,
    pub bullet_kins: Vec<Point>,
    pub ashen_bullet_kins: Vec<Point>,
    pub key_bullet_kins: Vec<Vec<Point>>,
    pub walls: Vec<Point>,
    pub tables: Vec<Point>,
    pub baskets: Vec<Point>,
    pub rivers: Vec<Point>,
    pub treasure_boxes: Vec<(Point, u32)>,
}

/// Fully resolved configuration.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub player: PlayerConfig,
    pub store: StoreConfig,
    pub weapons: WeaponConfig,
    pub bullet: BulletConfig,
    pub fireball: FireballConfig,
    pub enemies: EnemiesConfig,
    pub hazards: HazardConfig,
    pub extents: ExtentConfig,
    /// Indexed by `RoomId::index`.
    pub layouts: [RoomLayout; 4],
}

impl GameConfig {
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// The layout compiled into the binary.
    pub fn builtin() -> ConfigResult<Self> {
        Self::from_ron_str(DEFAULT_CONFIG)
    }

    pub fn from_ron_str(text: &str) -> ConfigResult<Self> {
        let raw: RawConfig = ron::from_str(text)?;
        let config = Self::resolve(raw)?;
        config.validate()?;
        log::debug!(
            "configuration resolved: {}x{} window",
            config.window.width,
            config.window.height
        );
        Ok(config)
    }

    pub fn layout(&self, room: RoomId) -> &RoomLayout {
        &self.layouts[room.index()]
    }

    /// The playable area; projectiles leaving it are dropped.
    pub fn window_bounds(&self) -> Bounds {
        Bounds::window(self.window.width, self.window.height)
    }

    fn resolve(raw: RawConfig) -> ConfigResult<Self> {
        let player = PlayerConfig {
            start: parse_point("player.start", &raw.player.start)?,
            speed: raw.player.speed,
            initial_health: raw.player.initial_health,
            robot_extra_coin: raw.player.robot_extra_coin,
        };
        let store = StoreConfig {
            position: parse_point("store.position", &raw.store.position)?,
            weapon_cost: raw.store.weapon_cost,
            health_cost: raw.store.health_cost,
            health_bonus: raw.store.health_bonus,
        };
        let layouts = [
            parse_layout("rooms.prep", &raw.rooms.prep)?,
            parse_layout("rooms.battle_a", &raw.rooms.battle_a)?,
            parse_layout("rooms.battle_b", &raw.rooms.battle_b)?,
            parse_layout("rooms.end", &raw.rooms.end)?,
        ];
        Ok(Self {
            window: raw.window,
            player,
            store,
            weapons: raw.weapons,
            bullet: raw.bullet,
            fireball: raw.fireball,
            enemies: raw.enemies,
            hazards: raw.hazards,
            extents: raw.extents,
            layouts,
        })
    }

    fn validate(&self) -> ConfigResult<()> {
        let positives = [
            ("window.width", self.window.width),
            ("window.height", self.window.height),
            ("bullet.speed", self.bullet.speed),
            ("bullet.fire_rate", f64::from(self.bullet.fire_rate)),
            ("fireball.speed", self.fireball.speed),
            ("enemies.key_bullet_kin.speed", self.enemies.key_bullet_kin.speed),
            (
                "enemies.bullet_kin.shoot_frequency",
                f64::from(self.enemies.bullet_kin.shoot_frequency),
            ),
            (
                "enemies.ashen_bullet_kin.shoot_frequency",
                f64::from(self.enemies.ashen_bullet_kin.shoot_frequency),
            ),
        ];
        let extents = self
            .extents
            .named()
            .into_iter()
            .flat_map(|(field, e)| [(field, e.width), (field, e.height)]);
        for (field, value) in positives.into_iter().chain(extents) {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field: field.to_string(), value });
            }
        }

        for room in RoomId::ALL {
            for door in &self.layout(room).doors {
                if door.destination == room {
                    return Err(ConfigError::SelfLoop { room });
                }
                let leads_back = self
                    .layout(door.destination)
                    .doors
                    .iter()
                    .any(|d| d.destination == room);
                if !leads_back {
                    return Err(ConfigError::MissingReturnDoor { from: room, to: door.destination });
                }
            }
        }
        Ok(())
    }
}

// ── Coordinate-group parsing ─────────────────────────────────────────────────

fn malformed(field: &str, value: &str) -> ConfigError {
    ConfigError::MalformedCoordinates { field: field.to_string(), value: value.to_string() }
}

/// Split `"a,b;c,d"` into trimmed field groups. `""` and `"0"` yield nothing.
fn groups(value: &str) -> Vec<Vec<&str>> {
    let value = value.trim();
    if value.is_empty() || value == "0" {
        return Vec::new();
    }
    value
        .split(';')
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(|group| group.split(',').map(str::trim).collect())
        .collect()
}

fn number(field: &str, value: &str, raw: &str) -> ConfigResult<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| malformed(field, value))
}

fn point_of(field: &str, value: &str, group: &[&str]) -> ConfigResult<Point> {
    match group {
        [x, y, ..] => Ok(Point::new(number(field, value, x)?, number(field, value, y)?)),
        _ => Err(malformed(field, value)),
    }
}

/// Exactly one `"x,y"` point.
pub fn parse_point(field: &str, value: &str) -> ConfigResult<Point> {
    match parse_points(field, value)?.as_slice() {
        [p] => Ok(*p),
        _ => Err(malformed(field, value)),
    }
}

/// Zero or more `"x,y"` points separated by `;`.
pub fn parse_points(field: &str, value: &str) -> ConfigResult<Vec<Point>> {
    groups(value)
        .iter()
        .map(|group| match group.len() {
            2 => point_of(field, value, group),
            _ => Err(malformed(field, value)),
        })
        .collect()
}

/// Zero or more `"x,y,room"` doors.
pub fn parse_doors(field: &str, value: &str) -> ConfigResult<Vec<DoorSpec>> {
    groups(value)
        .iter()
        .map(|group| match group.as_slice() {
            [_, _, room] => {
                let position = point_of(field, value, group)?;
                let destination = room.parse::<RoomId>().map_err(|room| ConfigError::UnknownRoom {
                    field: field.to_string(),
                    room,
                })?;
                Ok(DoorSpec { position, destination })
            }
            _ => Err(malformed(field, value)),
        })
        .collect()
}

/// Zero or more `"x,y,coins"` treasure boxes.
pub fn parse_treasure_boxes(field: &str, value: &str) -> ConfigResult<Vec<(Point, u32)>> {
    groups(value)
        .iter()
        .map(|group| match group.as_slice() {
            [_, _, coins] => {
                let position = point_of(field, value, group)?;
                let coins = coins.parse::<u32>().map_err(|_| malformed(field, value))?;
                Ok((position, coins))
            }
            _ => Err(malformed(field, value)),
        })
        .collect()
}

fn parse_layout(prefix: &str, raw: &RawRoom) -> ConfigResult<RoomLayout> {
    let field = |name: &str| format!("{prefix}.{name}");

    let restart_area = match parse_points(&field("restart_area"), &raw.restart_area)?.as_slice() {
        [] => None,
        [p] => Some(*p),
        _ => return Err(malformed(&field("restart_area"), &raw.restart_area)),
    };

    let mut key_bullet_kins = Vec::new();
    for path in &raw.key_bullet_kin {
        let points = parse_points(&field("key_bullet_kin"), path)?;
        if !points.is_empty() {
            key_bullet_kins.push(points);
        }
    }

    Ok(RoomLayout {
        doors: parse_doors(&field("doors"), &raw.doors)?,
        restart_area,
        bullet_kins: parse_points(&field("bullet_kin"), &raw.bullet_kin)?,
        ashen_bullet_kins: parse_points(&field("ashen_bullet_kin"), &raw.ashen_bullet_kin)?,
        key_bullet_kins,
        walls: parse_points(&field("wall"), &raw.wall)?,
        tables: parse_points(&field("table"), &raw.table)?,
        baskets: parse_points(&field("basket"), &raw.basket)?,
        rivers: parse_points(&field("river"), &raw.river)?,
        treasure_boxes: parse_treasure_boxes(&field("treasure_box"), &raw.treasure_box)?,
    })
}
