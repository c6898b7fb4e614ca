use shadow_dungeon::compute::*;
use shadow_dungeon::config::GameConfig;
use shadow_dungeon::entities::*;
use shadow_dungeon::geometry::Point;
use shadow_dungeon::input::{FrameInput, GameKey};
use shadow_dungeon::rooms::RoomKind;

fn config() -> GameConfig {
    GameConfig::builtin().unwrap()
}

fn idle() -> FrameInput {
    FrameInput::new()
}

/// A fresh dungeon with a Marine chosen and the prep door open.
fn started(config: &GameConfig) -> Dungeon {
    let s = init_state(config);
    tick(&s, &idle().with_pressed(GameKey::SelectMarine), config)
}

/// Walk through the prep door into battle room A.
fn in_battle_a(config: &GameConfig) -> Dungeon {
    let mut s = started(config);
    s.player.position = s.room(RoomId::Prep).doors[0].position;
    tick(&s, &idle(), config)
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_starts_in_prep() {
    let config = config();
    let s = init_state(&config);
    assert_eq!(s.current, RoomId::Prep);
    assert_eq!(s.status(), GameStatus::Playing);
    assert_eq!(s.player.position, config.player.start);
    assert_eq!(s.player.health, config.player.initial_health);
    assert_eq!(s.player.character, Character::Unset);
    assert_eq!(s.rooms.len(), 4);
    assert!(s.projectiles.is_empty());
    assert!(!s.store.visible);
    assert_eq!(s.frame, 0);
}

#[test]
fn every_door_starts_locked() {
    let s = init_state(&config());
    assert!(s.rooms.iter().flat_map(|r| &r.doors).all(|d| d.state == DoorState::Locked));
    assert!(s.rooms.iter().flat_map(|r| &r.enemies).all(|e| !e.active));
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_does_not_mutate_original() {
    let config = config();
    let s = init_state(&config);
    let next = tick(&s, &idle().with_held(GameKey::Up), &config);
    assert_eq!(s.frame, 0);
    assert_eq!(s.player.position, config.player.start);
    assert_eq!(next.frame, 1);
    let start = config.player.start;
    assert_eq!(next.player.position, Point::new(start.x, start.y - config.player.speed));
}

#[test]
fn character_selection_opens_the_prep_door() {
    let config = config();
    let s = started(&config);
    assert_eq!(s.player.character, Character::Marine);
    assert!(s.room(RoomId::Prep).doors[0].is_unlocked());
}

#[test]
fn shots_fly_toward_the_pointer() {
    let config = config();
    let s = started(&config);
    let start = s.player.position;
    let aim = idle().with_pointer(Point::new(start.x, 100.0)).with_fire(true);

    let s = tick(&s, &aim, &config);
    assert_eq!(s.projectiles.bullets.len(), 1);
    let expected = Point::new(start.x, start.y - config.bullet.speed);
    assert_eq!(s.projectiles.bullets[0].position, expected);
}

// ── Room transitions ──────────────────────────────────────────────────────────

#[test]
fn walking_through_a_door_changes_room() {
    let config = config();
    let s = in_battle_a(&config);

    assert_eq!(s.current, RoomId::BattleA);
    let arrival = &s.room(RoomId::BattleA).doors[0];
    assert_eq!(arrival.destination, RoomId::Prep);
    assert_eq!(arrival.state, DoorState::JustEntered);
    assert!(arrival.relock);
    assert_eq!(s.player.position, arrival.position);
    assert!(s.projectiles.is_empty());
}

#[test]
fn standing_on_the_arrival_door_does_not_bounce_back() {
    let config = config();
    let mut s = in_battle_a(&config);
    for _ in 0..5 {
        s = tick(&s, &idle(), &config);
    }
    assert_eq!(s.current, RoomId::BattleA);
    assert_eq!(s.room(RoomId::BattleA).doors[0].state, DoorState::JustEntered);
}

#[test]
fn leaving_the_arrival_door_starts_the_fight() {
    let config = config();
    let mut s = in_battle_a(&config);
    s.player.position = Point::new(512.0, 640.0);
    let s = tick(&s, &idle(), &config);

    let room = s.room(RoomId::BattleA);
    assert_eq!(room.doors[0].state, DoorState::Locked);
    assert!(!room.doors[0].relock);
    assert!(room.enemies.iter().all(|e| e.active));
    assert_eq!(room.kind, RoomKind::Battle { complete: false });
    assert!(!s.projectiles.fireballs.is_empty(), "shooters fire on their first active tick");
}

#[test]
fn clearing_the_room_opens_every_door() {
    let config = config();
    let mut s = in_battle_a(&config);
    s.player.position = Point::new(512.0, 640.0);
    s = tick(&s, &idle(), &config);

    for enemy in &mut s.room_mut(RoomId::BattleA).enemies {
        enemy.take_damage(1000.0);
    }
    s = tick(&s, &idle(), &config);

    let room = s.room(RoomId::BattleA);
    assert_eq!(room.kind, RoomKind::Battle { complete: true });
    assert!(room.doors.iter().all(Door::is_unlocked));
    assert_eq!(room.keys.len(), 1, "the key carrier dropped its key");
    assert_eq!(s.player.coins, 2 * config.enemies.bullet_kin.coin);
}

#[test]
fn missing_return_door_refuses_transition() {
    let config = config();
    let mut s = init_state(&config);
    change_room(&mut s, RoomId::End);
    assert_eq!(s.current, RoomId::Prep);
    assert_eq!(s.player.position, config.player.start);
}

#[test]
fn reaching_the_end_room_wins() {
    let config = config();
    let mut s = init_state(&config);
    s.current = RoomId::BattleB;
    change_room(&mut s, RoomId::End);
    assert_eq!(s.current, RoomId::End);
    assert_eq!(s.status(), GameStatus::Victory);
}

// ── Game over & restart ───────────────────────────────────────────────────────

#[test]
fn death_moves_the_player_to_the_locked_end_room() {
    let config = config();
    let mut s = in_battle_a(&config);
    s.player.health = 0.0;
    let s = tick(&s, &idle(), &config);

    assert_eq!(s.status(), GameStatus::GameOver);
    assert_eq!(s.current, RoomId::End);
    assert_eq!(s.player.position, config.player.start);
    assert!(s.room(RoomId::End).doors.iter().all(|d| !d.is_unlocked()));
    assert!(s.projectiles.is_empty());

    let s = tick(&s, &idle(), &config);
    assert_eq!(s.status(), GameStatus::GameOver);
    assert!(s.room(RoomId::End).doors.iter().all(|d| !d.is_unlocked()));
}

#[test]
fn restart_area_resets_everything() {
    let config = config();
    let mut s = in_battle_a(&config);
    s.player.health = 0.0;
    s.player.earn_coins(50);
    let mut s = tick(&s, &idle(), &config);

    s.player.position = config.layout(RoomId::End).restart_area.unwrap();
    let s = tick(&s, &idle().with_pressed(GameKey::Confirm), &config);

    assert_eq!(s.current, RoomId::Prep);
    assert_eq!(s.status(), GameStatus::Playing);
    assert_eq!(s.player.health, config.player.initial_health);
    assert_eq!(s.player.coins, 0);
    assert_eq!(s.player.character, Character::Unset);
    assert_eq!(s.frame, 0);
}

#[test]
fn store_restart_resets_everything() {
    let config = config();
    let s = started(&config);
    let s = tick(&s, &idle().with_pressed(GameKey::ToggleStore), &config);
    assert!(s.store.visible);

    let s = tick(&s, &idle().with_pressed(GameKey::StoreRestart), &config);
    assert!(!s.store.visible);
    assert_eq!(s.player.character, Character::Unset);
    assert!(!s.room(RoomId::Prep).doors[0].is_unlocked());
}

#[test]
fn paused_game_keeps_counting_frames() {
    let config = config();
    let s = started(&config);
    let s = tick(&s, &idle().with_pressed(GameKey::ToggleStore), &config);
    let before = s.player.position;
    let s = tick(&s, &idle().with_held(GameKey::Left), &config);
    assert_eq!(s.player.position, before);
    assert_eq!(s.frame, 3);
}
