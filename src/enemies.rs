//! Enemy profiles, per-tick behaviour and death resolution.

use crate::config::GameConfig;
use crate::entities::{
    Attack, DeathReward, Enemy, EnemyKind, EnemyProfile, KeyPickup, Movement, Player,
};
use crate::geometry::{Collidable, Movable, Point};
use crate::projectiles::ProjectileSystem;

// ── Profiles ─────────────────────────────────────────────────────────────────

/// Behaviour table for each enemy kind.
pub fn profile(kind: EnemyKind, config: &GameConfig) -> EnemyProfile {
    let enemies = &config.enemies;
    match kind {
        EnemyKind::BulletKin => EnemyProfile {
            health: enemies.bullet_kin.health,
            attack: Attack::Shoots { period: enemies.bullet_kin.shoot_frequency },
            movement: Movement::Stationary,
            reward: DeathReward::Coins(enemies.bullet_kin.coin),
        },
        EnemyKind::AshenBulletKin => EnemyProfile {
            health: enemies.ashen_bullet_kin.health,
            attack: Attack::Shoots { period: enemies.ashen_bullet_kin.shoot_frequency },
            movement: Movement::Stationary,
            reward: DeathReward::Coins(enemies.ashen_bullet_kin.coin),
        },
        EnemyKind::KeyBulletKin => EnemyProfile {
            health: enemies.key_bullet_kin.health,
            attack: Attack::Melee,
            movement: Movement::Patrol { speed: enemies.key_bullet_kin.speed },
            reward: DeathReward::Key,
        },
    }
}

pub fn spawn(kind: EnemyKind, position: Point, config: &GameConfig) -> Enemy {
    let extent = match kind {
        EnemyKind::BulletKin => config.extents.bullet_kin,
        EnemyKind::AshenBulletKin => config.extents.ashen_bullet_kin,
        EnemyKind::KeyBulletKin => config.extents.key_bullet_kin,
    };
    Enemy::new(kind, position, extent, profile(kind, config))
}

/// A key-carrying patroller walking `path` in a loop.
pub fn spawn_patrol(path: Vec<Point>, config: &GameConfig) -> Enemy {
    let start = path.first().copied().unwrap_or_default();
    spawn(EnemyKind::KeyBulletKin, start, config).with_path(path)
}

// ── Per-tick behaviour ───────────────────────────────────────────────────────

/// Update every active enemy in order. A dead enemy is retired and rewarded
/// before anything else happens to it. Stops early once the player is dead.
pub fn update_enemies(
    enemies: &mut [Enemy],
    keys: &mut Vec<KeyPickup>,
    player: &mut Player,
    projectiles: &mut ProjectileSystem,
    config: &GameConfig,
) {
    for enemy in enemies.iter_mut().filter(|e| e.active) {
        if enemy.is_dead() {
            resolve_death(enemy, keys, player, config);
            continue;
        }
        update_enemy(enemy, player, projectiles, config);
        if player.is_dead() {
            return;
        }
    }
}

/// Retire a dead enemy exactly once: deactivate it and hand out its reward.
pub fn resolve_death(
    enemy: &mut Enemy,
    keys: &mut Vec<KeyPickup>,
    player: &mut Player,
    config: &GameConfig,
) {
    if !enemy.active {
        return;
    }
    enemy.active = false;
    match enemy.reward {
        DeathReward::Key => {
            keys.push(KeyPickup {
                position: enemy.position,
                extent: config.extents.key,
                active: true,
            });
            log::debug!("{:?} dropped a key", enemy.kind);
        }
        DeathReward::Coins(base) => {
            let coins = base.saturating_add(kill_bonus(player, config));
            player.earn_coins(coins);
            log::debug!("{:?} killed for {coins} coins", enemy.kind);
        }
    }
}

/// Extra coins a shooter kill pays for the player's character.
pub fn kill_bonus(player: &Player, config: &GameConfig) -> u32 {
    if player.character.traits().kill_bonus {
        config.player.robot_extra_coin
    } else {
        0
    }
}

/// Contact damage, then the enemy's attack and movement.
pub fn update_enemy(
    enemy: &mut Enemy,
    player: &mut Player,
    projectiles: &mut ProjectileSystem,
    config: &GameConfig,
) {
    if enemy.collides_with(&*player) {
        player.receive_damage(config.enemies.contact_damage);
    }

    if let Attack::Shoots { period } = enemy.attack {
        if enemy.cooldown > 0 {
            enemy.cooldown -= 1;
        }
        if enemy.cooldown == 0 {
            // Aimed at wherever the player is now, every shot.
            projectiles.spawn_fireball(enemy.position, player.position, config);
            enemy.cooldown = period;
        }
    }

    if let Movement::Patrol { speed } = enemy.movement {
        patrol_step(enemy, speed);
    }
}

/// Walk toward the current waypoint; snap onto it when it is within one
/// step, then aim for the next one, wrapping after the last.
pub fn patrol_step(enemy: &mut Enemy, speed: f64) {
    if enemy.path.len() < 2 {
        return;
    }
    let target = enemy.path[enemy.path_index];
    let offset = target - enemy.position;

    if offset.length() <= speed {
        enemy.move_to(target);
        enemy.path_index = (enemy.path_index + 1) % enemy.path.len();
    } else if let Some(direction) = offset.normalized() {
        enemy.move_to(enemy.position + direction * speed);
    }
}
