//! Game controller.
//!
//! `tick` follows the pure-update style of the rest of the crate's API: it
//! takes the current `Dungeon` by reference and returns the next one. The
//! in-place `advance` does the actual work and is what `tick` runs on a copy.

use crate::config::GameConfig;
use crate::entities::{Player, RoomId, Store};
use crate::geometry::Movable;
use crate::input::FrameInput;
use crate::projectiles::ProjectileSystem;
use crate::rooms::{Room, RoomEvent, RoomKind, TickContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Reached the end room alive.
    Victory,
    /// Died; parked in the end room.
    GameOver,
}

/// The entire game state.
#[derive(Clone, Debug)]
pub struct Dungeon {
    /// Indexed by `RoomId::index`.
    pub rooms: Vec<Room>,
    pub current: RoomId,
    pub player: Player,
    pub store: Store,
    pub projectiles: ProjectileSystem,
    pub frame: u64,
}

impl Dungeon {
    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.index()]
    }

    pub fn room_mut(&mut self, id: RoomId) -> &mut Room {
        &mut self.rooms[id.index()]
    }

    pub fn current_room(&self) -> &Room {
        self.room(self.current)
    }

    pub fn status(&self) -> GameStatus {
        match (self.current, self.room(RoomId::End).kind) {
            (RoomId::End, RoomKind::End { lost: true }) => GameStatus::GameOver,
            (RoomId::End, _) => GameStatus::Victory,
            _ => GameStatus::Playing,
        }
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build every room from configuration and place a fresh player in the
/// preparation room.
pub fn init_state(config: &GameConfig) -> Dungeon {
    let rooms = RoomId::ALL
        .iter()
        .map(|&id| Room::from_layout(id, config.layout(id), config))
        .collect();
    let player = Player::new(
        config.player.start,
        config.extents.player,
        config.player.speed,
        config.player.initial_health,
    );
    Dungeon {
        rooms,
        current: RoomId::Prep,
        player,
        store: Store::new(config.store.position),
        projectiles: ProjectileSystem::new(),
        frame: 0,
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame, leaving `state` untouched.
pub fn tick(state: &Dungeon, input: &FrameInput, config: &GameConfig) -> Dungeon {
    let mut next = state.clone();
    advance(&mut next, input, config);
    next
}

/// Advance the simulation by one frame in place.
pub fn advance(state: &mut Dungeon, input: &FrameInput, config: &GameConfig) {
    state.frame += 1;

    let event = {
        let Dungeon { rooms, current, player, store, projectiles, .. } = state;
        let mut ctx = TickContext { player, store, projectiles, input, config };
        rooms[current.index()].update(&mut ctx)
    };

    match event {
        None => {}
        Some(RoomEvent::ChangeRoom(destination)) => change_room(state, destination),
        Some(RoomEvent::GameOver) => enter_game_over(state, config),
        Some(RoomEvent::Restart) => {
            log::info!("game restarted");
            *state = init_state(config);
        }
    }
}

// ── Transitions ──────────────────────────────────────────────────────────────

/// Move the player from the current room to `destination`, arriving on the
/// door that leads back.
///
/// A destination without such a door is refused and the player stays put;
/// configuration validation rules this out for loaded layouts.
pub fn change_room(state: &mut Dungeon, destination: RoomId) {
    let from = state.current;
    let Some(door_index) = state.room(destination).door_to(from) else {
        log::error!("room {destination} has no door back to {from}; transition refused");
        return;
    };

    state.projectiles.clear();

    let room = state.room_mut(destination);
    let rearm = matches!(room.kind, RoomKind::Battle { complete: false });
    let door = &mut room.doors[door_index];
    if rearm {
        door.relock = true;
    }
    door.arrive();
    let arrival = door.position;

    state.player.move_to(arrival);
    state.player.prev_position = arrival;
    state.current = destination;
    log::info!("entered room {destination} from {from}");
}

/// The player died: park them at the start position of the end room, whose
/// door stays locked from now on.
pub fn enter_game_over(state: &mut Dungeon, config: &GameConfig) {
    state.projectiles.clear();

    let end = state.room_mut(RoomId::End);
    end.kind = RoomKind::End { lost: true };
    end.doors.iter_mut().for_each(|door| door.lock());

    state.player.move_to(config.player.start);
    state.player.prev_position = config.player.start;
    state.current = RoomId::End;
    log::info!("game over after {} frames", state.frame);
}
