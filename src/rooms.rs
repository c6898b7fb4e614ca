//! Rooms: entity registries and the ordered per-tick update.

use crate::config::{GameConfig, RoomLayout};
use crate::enemies;
use crate::entities::{
    Character, Door, Enemy, EnemyKind, Hazard, KeyPickup, Obstacle, ObstacleKind, Player,
    RestartArea, RoomId, Store, TreasureBox,
};
use crate::input::{FrameInput, GameKey};
use crate::interactables::{self, DoorEvent, StoreAction};
use crate::player;
use crate::projectiles::ProjectileSystem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoomKind {
    /// Character selection; the door opens once a character is chosen.
    Prep,
    /// Doors open once every enemy is dead.
    Battle { complete: bool },
    /// Reached by winning or by dying; `lost` keeps the door shut.
    End { lost: bool },
}

impl RoomKind {
    pub fn for_room(id: RoomId) -> Self {
        match id {
            RoomId::Prep => RoomKind::Prep,
            RoomId::BattleA | RoomId::BattleB => RoomKind::Battle { complete: false },
            RoomId::End => RoomKind::End { lost: false },
        }
    }
}

/// Why a room stopped its tick early. The controller applies it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoomEvent {
    ChangeRoom(RoomId),
    GameOver,
    Restart,
}

/// Everything outside the room that a tick reads or changes.
pub struct TickContext<'a> {
    pub player: &'a mut Player,
    pub store: &'a mut Store,
    pub projectiles: &'a mut ProjectileSystem,
    pub input: &'a FrameInput,
    pub config: &'a GameConfig,
}

#[derive(Clone, Debug)]
pub struct Room {
    pub id: RoomId,
    pub kind: RoomKind,
    pub doors: Vec<Door>,
    pub enemies: Vec<Enemy>,
    pub obstacles: Vec<Obstacle>,
    pub hazards: Vec<Hazard>,
    pub treasure_boxes: Vec<TreasureBox>,
    /// Keys dropped by patrol enemies.
    pub keys: Vec<KeyPickup>,
    pub restart_area: Option<RestartArea>,
}

impl Room {
    pub fn empty(id: RoomId) -> Self {
        Self {
            id,
            kind: RoomKind::for_room(id),
            doors: Vec::new(),
            enemies: Vec::new(),
            obstacles: Vec::new(),
            hazards: Vec::new(),
            treasure_boxes: Vec::new(),
            keys: Vec::new(),
            restart_area: None,
        }
    }

    /// Populate a room from its parsed layout.
    pub fn from_layout(id: RoomId, layout: &RoomLayout, config: &GameConfig) -> Self {
        let ext = &config.extents;
        let mut room = Room::empty(id);

        room.doors = layout
            .doors
            .iter()
            .map(|spec| Door::new(spec.position, ext.door, spec.destination))
            .collect();
        room.restart_area = layout
            .restart_area
            .map(|position| RestartArea { position, extent: ext.restart_area });

        let shooters = layout
            .bullet_kins
            .iter()
            .map(|&p| enemies::spawn(EnemyKind::BulletKin, p, config))
            .chain(
                layout
                    .ashen_bullet_kins
                    .iter()
                    .map(|&p| enemies::spawn(EnemyKind::AshenBulletKin, p, config)),
            );
        let patrols = layout
            .key_bullet_kins
            .iter()
            .map(|path| enemies::spawn_patrol(path.clone(), config));
        room.enemies = shooters.chain(patrols).collect();

        let walls = layout.walls.iter().map(|&p| Obstacle::new(ObstacleKind::Wall, p, ext.wall));
        let tables = layout
            .tables
            .iter()
            .map(|&p| Obstacle::new(ObstacleKind::Table, p, ext.table));
        let baskets = layout.baskets.iter().map(|&p| {
            Obstacle::new(ObstacleKind::Basket { coins: config.hazards.basket_coin }, p, ext.basket)
        });
        room.obstacles = walls.chain(tables).chain(baskets).collect();

        room.hazards = layout
            .rivers
            .iter()
            .map(|&position| Hazard {
                position,
                extent: ext.river,
                damage_per_tick: config.hazards.river_damage_per_frame,
            })
            .collect();
        room.treasure_boxes = layout
            .treasure_boxes
            .iter()
            .map(|&(position, coins)| TreasureBox {
                position,
                extent: ext.treasure_box,
                coins,
                active: true,
            })
            .collect();
        room
    }

    pub fn is_battle(&self) -> bool {
        matches!(self.kind, RoomKind::Battle { .. })
    }

    /// True once every enemy in the room is dead (vacuously for rooms
    /// without enemies).
    pub fn encounter_cleared(&self) -> bool {
        self.enemies.iter().all(Enemy::is_dead)
    }

    /// Wake every living enemy. Returns how many changed state.
    pub fn activate_enemies(&mut self) -> usize {
        let mut woken = 0;
        for enemy in self.enemies.iter_mut().filter(|e| !e.is_dead() && !e.active) {
            enemy.active = true;
            woken += 1;
        }
        woken
    }

    /// Index of the door leading to `destination`.
    pub fn door_to(&self, destination: RoomId) -> Option<usize> {
        self.doors.iter().position(|d| d.destination == destination)
    }

    /// Run one tick. Returns early with an event as soon as a sub-step moves
    /// the player out of the room, kills them or asks for a restart; the rest
    /// of the room is left untouched for this tick.
    pub fn update(&mut self, ctx: &mut TickContext<'_>) -> Option<RoomEvent> {
        let input = ctx.input;
        let config = ctx.config;

        let action = interactables::update_store(ctx.store, ctx.player, input, &config.store);
        if action == StoreAction::Restart {
            return Some(RoomEvent::Restart);
        }
        if ctx.store.visible {
            return None;
        }

        if let RoomKind::End { lost: true } = self.kind {
            self.doors.iter_mut().for_each(Door::lock);
        }

        let cleared = self.encounter_cleared();
        let mut relocked = false;
        for door in &mut self.doors {
            match interactables::update_door(door, ctx.player, cleared) {
                Some(DoorEvent::Enter(destination)) => {
                    return Some(RoomEvent::ChangeRoom(destination))
                }
                Some(DoorEvent::Relocked) => relocked = true,
                None => {}
            }
        }
        if relocked {
            let woken = self.activate_enemies();
            log::info!("room {} locked again, {woken} enemies engaged", self.id);
        }

        player::apply_hazards(ctx.player, &self.hazards);
        if self.player_died(ctx.player) {
            return Some(RoomEvent::GameOver);
        }

        interactables::open_treasure_boxes(&mut self.treasure_boxes, ctx.player, input);
        if interactables::restart_requested(self.restart_area.as_ref(), ctx.player, input) {
            return Some(RoomEvent::Restart);
        }
        interactables::collect_keys(&mut self.keys, ctx.player);

        enemies::update_enemies(
            &mut self.enemies,
            &mut self.keys,
            ctx.player,
            ctx.projectiles,
            config,
        );
        if self.player_died(ctx.player) {
            return Some(RoomEvent::GameOver);
        }

        let blockers = player::blockers(&self.doors, &self.obstacles);
        player::step_player(ctx.player, input, &config.window_bounds(), &blockers);

        match self.kind {
            RoomKind::Prep => self.select_character(ctx.player, input),
            RoomKind::Battle { complete: false } if self.encounter_cleared() => {
                self.kind = RoomKind::Battle { complete: true };
                // The arrival door stays as it is so the player is not
                // bounced straight back through it.
                for door in self.doors.iter_mut().filter(|d| !d.is_unlocked()) {
                    door.unlock();
                }
                log::info!("room {} cleared", self.id);
            }
            _ => {}
        }

        let window = config.window_bounds();
        ctx.projectiles.handle_firing(input, ctx.player, config);
        ctx.projectiles.update_bullets(
            ctx.player,
            &mut self.obstacles,
            &self.doors,
            &mut self.enemies,
            &window,
        );
        ctx.projectiles.update_fireballs(ctx.player, &self.obstacles, &self.doors, &window);
        if self.player_died(ctx.player) {
            return Some(RoomEvent::GameOver);
        }
        None
    }

    /// The room that already shows the loss never reports it again.
    fn player_died(&self, player: &Player) -> bool {
        player.is_dead() && !matches!(self.kind, RoomKind::End { lost: true })
    }

    fn select_character(&mut self, player: &mut Player, input: &FrameInput) {
        let choice = if input.was_pressed(GameKey::SelectMarine) {
            Character::Marine
        } else if input.was_pressed(GameKey::SelectRobot) {
            Character::Robot
        } else {
            return;
        };
        if player.select_character(choice) {
            log::info!("character selected: {choice:?}");
        }
        for door in self.doors.iter_mut().filter(|d| !d.is_unlocked()) {
            door.unlock();
        }
    }
}
