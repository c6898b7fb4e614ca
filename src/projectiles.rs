//! Bullets and fireballs: spawning, movement and first-hit resolution.
//!
//! Both collections are owned by a `ProjectileSystem` that the controller
//! passes into the active room each tick, so a room change or reset clears
//! them with one explicit call.

use crate::config::GameConfig;
use crate::entities::{Door, Enemy, Obstacle, ObstacleKind, Player, Projectile, ProjectileKind};
use crate::geometry::{Bounds, Collidable, Movable, Point};
use crate::input::FrameInput;

/// What a projectile ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    Obstacle,
    Door,
    Enemy,
    Player,
}

#[derive(Clone, Debug, Default)]
pub struct ProjectileSystem {
    /// Player shots.
    pub bullets: Vec<Projectile>,
    /// Enemy shots.
    pub fireballs: Vec<Projectile>,
    /// Ticks until the player may fire again.
    pub fire_cooldown: u32,
}

impl ProjectileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty() && self.fireballs.is_empty()
    }

    /// Drop every projectile in flight.
    pub fn clear(&mut self) {
        self.bullets.clear();
        self.fireballs.clear();
    }

    /// Fire a bullet carrying the player's current weapon damage.
    pub fn spawn_bullet(&mut self, player: &Player, target: Point, config: &GameConfig) -> bool {
        let damage = config.weapons.damage(player.weapon);
        let launched = Projectile::launch(
            ProjectileKind::Bullet,
            player.position,
            target,
            config.bullet.speed,
            damage,
            config.extents.bullet,
        );
        match launched {
            Some(bullet) => {
                self.bullets.push(bullet);
                true
            }
            None => false,
        }
    }

    pub fn spawn_fireball(&mut self, start: Point, target: Point, config: &GameConfig) -> bool {
        let launched = Projectile::launch(
            ProjectileKind::Fireball,
            start,
            target,
            config.fireball.speed,
            config.fireball.damage,
            config.extents.fireball,
        );
        match launched {
            Some(fireball) => {
                self.fireballs.push(fireball);
                true
            }
            None => false,
        }
    }

    /// Count the fire cooldown down and shoot at the pointer while a mouse
    /// button is held. The cooldown is re-armed only when a bullet leaves.
    pub fn handle_firing(&mut self, input: &FrameInput, player: &Player, config: &GameConfig) {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        if input.fire
            && self.fire_cooldown == 0
            && self.spawn_bullet(player, input.pointer, config)
        {
            self.fire_cooldown = config.bullet.fire_rate;
            log::debug!("bullet fired toward ({:.0}, {:.0})", input.pointer.x, input.pointer.y);
        }
    }

    /// Advance all bullets and resolve their hits. Bullets that hit something
    /// or left the window are gone when this returns.
    pub fn update_bullets(
        &mut self,
        player: &mut Player,
        obstacles: &mut [Obstacle],
        doors: &[Door],
        enemies: &mut [Enemy],
        window: &Bounds,
    ) {
        self.bullets.retain_mut(|bullet| {
            if !advance(bullet, window) {
                return false;
            }
            if bullet_hit(bullet, player, obstacles, doors, enemies).is_some() {
                bullet.active = false;
            }
            bullet.active
        });
    }

    /// Advance all fireballs and resolve their hits against the player.
    pub fn update_fireballs(
        &mut self,
        player: &mut Player,
        obstacles: &[Obstacle],
        doors: &[Door],
        window: &Bounds,
    ) {
        self.fireballs.retain_mut(|fireball| {
            if !advance(fireball, window) {
                return false;
            }
            if fireball_hit(fireball, player, obstacles, doors).is_some() {
                fireball.active = false;
            }
            fireball.active
        });
    }
}

/// Move one step along the direction. A projectile whose centre ends up
/// outside the window is deactivated and reports false.
pub fn advance(projectile: &mut Projectile, window: &Bounds) -> bool {
    if !projectile.active {
        return false;
    }
    let next = projectile.position + projectile.direction * projectile.speed;
    projectile.move_to(next);
    if !window.contains(next) {
        projectile.active = false;
    }
    projectile.active
}

fn blocked_by_locked_door(projectile: &Projectile, doors: &[Door]) -> bool {
    doors.iter().any(|d| !d.is_unlocked() && projectile.collides_with(d))
}

/// First match wins: obstacles, then locked doors, then the first active enemy.
pub fn bullet_hit(
    bullet: &Projectile,
    player: &mut Player,
    obstacles: &mut [Obstacle],
    doors: &[Door],
    enemies: &mut [Enemy],
) -> Option<Hit> {
    for obstacle in obstacles.iter_mut().filter(|o| o.active) {
        if !bullet.collides_with(&*obstacle) {
            continue;
        }
        match obstacle.kind {
            ObstacleKind::Wall => {}
            ObstacleKind::Table => obstacle.active = false,
            ObstacleKind::Basket { coins } => {
                obstacle.active = false;
                player.earn_coins(coins);
                log::debug!("basket broken for {coins} coins");
            }
        }
        return Some(Hit::Obstacle);
    }

    if blocked_by_locked_door(bullet, doors) {
        return Some(Hit::Door);
    }

    if let Some(enemy) = enemies.iter_mut().find(|e| e.active && bullet.collides_with(&**e)) {
        enemy.take_damage(bullet.damage);
        return Some(Hit::Enemy);
    }
    None
}

/// Fireballs are stopped by obstacles without breaking them.
pub fn fireball_hit(
    fireball: &Projectile,
    player: &mut Player,
    obstacles: &[Obstacle],
    doors: &[Door],
) -> Option<Hit> {
    if obstacles.iter().any(|o| o.active && fireball.collides_with(o)) {
        return Some(Hit::Obstacle);
    }
    if blocked_by_locked_door(fireball, doors) {
        return Some(Hit::Door);
    }
    if fireball.collides_with(&*player) {
        player.receive_damage(fireball.damage);
        return Some(Hit::Player);
    }
    None
}
