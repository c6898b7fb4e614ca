use shadow_dungeon::config::GameConfig;
use shadow_dungeon::entities::*;
use shadow_dungeon::geometry::*;
use shadow_dungeon::input::FrameInput;
use shadow_dungeon::projectiles::*;

fn config() -> GameConfig {
    GameConfig::builtin().unwrap()
}

fn player_at(x: f64, y: f64) -> Player {
    Player::new(Point::new(x, y), Extent::new(40.0, 40.0), 4.0, 100.0)
}

fn bullet(from: Point, to: Point, speed: f64, damage: f64) -> Projectile {
    let extent = Extent::new(8.0, 8.0);
    Projectile::launch(ProjectileKind::Bullet, from, to, speed, damage, extent).unwrap()
}

fn shooter(x: f64, y: f64, health: f64) -> Enemy {
    let profile = EnemyProfile {
        health,
        attack: Attack::Shoots { period: 60 },
        movement: Movement::Stationary,
        reward: DeathReward::Coins(5),
    };
    let extent = Extent::new(40.0, 40.0);
    let mut e = Enemy::new(EnemyKind::BulletKin, Point::new(x, y), extent, profile);
    e.active = true;
    e
}

fn window() -> Bounds {
    Bounds::window(1024.0, 768.0)
}

// ── Kinematics ────────────────────────────────────────────────────────────────

#[test]
fn advance_moves_speed_along_direction() {
    let mut b = bullet(Point::new(100.0, 100.0), Point::new(130.0, 140.0), 10.0, 10.0);
    assert!(advance(&mut b, &window()));
    assert_eq!(b.position, Point::new(106.0, 108.0));
    assert!(advance(&mut b, &window()));
    assert_eq!(b.position, Point::new(112.0, 116.0));
}

#[test]
fn leaving_the_window_deactivates() {
    let mut b = bullet(Point::new(1020.0, 100.0), Point::new(2000.0, 100.0), 10.0, 10.0);
    assert!(!advance(&mut b, &window()));
    assert!(!b.active);
}

#[test]
fn offscreen_bullets_are_purged() {
    let mut system = ProjectileSystem::new();
    system.bullets.push(bullet(Point::new(1020.0, 100.0), Point::new(2000.0, 100.0), 10.0, 10.0));
    system.bullets.push(bullet(Point::new(500.0, 500.0), Point::new(500.0, 0.0), 10.0, 10.0));
    let mut p = player_at(100.0, 700.0);

    system.update_bullets(&mut p, &mut [], &[], &mut [], &window());
    assert_eq!(system.bullets.len(), 1);
    assert_eq!(system.bullets[0].position, Point::new(500.0, 490.0));
}

// ── Bullet hits ───────────────────────────────────────────────────────────────

#[test]
fn bullet_damages_the_enemy_and_disappears() {
    let mut system = ProjectileSystem::new();
    system.bullets.push(bullet(Point::new(300.0, 400.0), Point::new(300.0, 0.0), 10.0, 20.0));
    let mut enemies = vec![shooter(300.0, 385.0, 30.0)];
    let mut p = player_at(100.0, 700.0);

    system.update_bullets(&mut p, &mut [], &[], &mut enemies, &window());
    assert!(system.bullets.is_empty());
    assert_eq!(enemies[0].health, 10.0);
    assert!(!enemies[0].is_dead());
}

#[test]
fn inactive_enemies_are_not_hit() {
    let mut system = ProjectileSystem::new();
    system.bullets.push(bullet(Point::new(300.0, 400.0), Point::new(300.0, 0.0), 10.0, 20.0));
    let mut enemies = vec![shooter(300.0, 385.0, 30.0)];
    enemies[0].active = false;
    let mut p = player_at(100.0, 700.0);

    system.update_bullets(&mut p, &mut [], &[], &mut enemies, &window());
    assert_eq!(system.bullets.len(), 1);
    assert_eq!(enemies[0].health, 30.0);
}

#[test]
fn obstacle_hit_wins_over_enemy() {
    let ext = Extent::new(40.0, 40.0);
    let mut system = ProjectileSystem::new();
    system.bullets.push(bullet(Point::new(300.0, 400.0), Point::new(300.0, 0.0), 10.0, 20.0));
    let mut obstacles = vec![Obstacle::new(ObstacleKind::Wall, Point::new(300.0, 390.0), ext)];
    let mut enemies = vec![shooter(300.0, 390.0, 30.0)];
    let mut p = player_at(100.0, 700.0);

    system.update_bullets(&mut p, &mut obstacles, &[], &mut enemies, &window());
    assert!(system.bullets.is_empty());
    assert_eq!(enemies[0].health, 30.0);
    assert!(obstacles[0].active, "walls survive bullets");
}

#[test]
fn bullets_break_tables_and_baskets() {
    let config = config();
    let mut p = player_at(100.0, 700.0);
    let mut obstacles = vec![
        Obstacle::new(ObstacleKind::Table, Point::new(300.0, 390.0), Extent::new(60.0, 40.0)),
        Obstacle::new(
            ObstacleKind::Basket { coins: config.hazards.basket_coin },
            Point::new(600.0, 390.0),
            Extent::new(30.0, 30.0),
        ),
    ];
    let mut system = ProjectileSystem::new();
    system.bullets.push(bullet(Point::new(300.0, 400.0), Point::new(300.0, 0.0), 10.0, 10.0));
    system.bullets.push(bullet(Point::new(600.0, 400.0), Point::new(600.0, 0.0), 10.0, 10.0));

    system.update_bullets(&mut p, &mut obstacles, &[], &mut [], &window());
    assert!(system.bullets.is_empty());
    assert!(obstacles.iter().all(|o| !o.active));
    assert_eq!(p.coins, config.hazards.basket_coin);
}

#[test]
fn only_locked_doors_stop_bullets() {
    let mut locked = Door::new(Point::new(300.0, 390.0), Extent::new(48.0, 32.0), RoomId::Prep);
    let mut p = player_at(100.0, 700.0);
    let b = bullet(Point::new(300.0, 400.0), Point::new(300.0, 0.0), 10.0, 10.0);

    let hit = bullet_hit(&b, &mut p, &mut [], std::slice::from_ref(&locked), &mut []);
    assert_eq!(hit, Some(Hit::Door));
    locked.unlock();
    let hit = bullet_hit(&b, &mut p, &mut [], std::slice::from_ref(&locked), &mut []);
    assert_eq!(hit, None);
}

// ── Fireballs ─────────────────────────────────────────────────────────────────

#[test]
fn fireball_damages_player() {
    let config = config();
    let mut system = ProjectileSystem::new();
    assert!(system.spawn_fireball(Point::new(100.0, 100.0), Point::new(100.0, 200.0), &config));
    let mut p = player_at(100.0, 120.0);

    system.update_fireballs(&mut p, &[], &[], &window());
    assert!(system.fireballs.is_empty());
    assert_eq!(p.health, 100.0 - config.fireball.damage);
}

#[test]
fn fireball_is_stopped_by_obstacles_without_breaking_them() {
    let config = config();
    let mut system = ProjectileSystem::new();
    system.spawn_fireball(Point::new(100.0, 100.0), Point::new(100.0, 200.0), &config);
    let extent = Extent::new(60.0, 40.0);
    let obstacles = vec![Obstacle::new(ObstacleKind::Table, Point::new(100.0, 110.0), extent)];
    let mut p = player_at(100.0, 120.0);

    system.update_fireballs(&mut p, &obstacles, &[], &window());
    assert!(system.fireballs.is_empty());
    assert_eq!(p.health, 100.0);
    assert!(obstacles[0].active);
}

// ── Firing ────────────────────────────────────────────────────────────────────

#[test]
fn firing_respects_the_fire_rate() {
    let config = config();
    let p = player_at(512.0, 560.0);
    let input = FrameInput::new().with_pointer(Point::new(512.0, 100.0)).with_fire(true);
    let mut system = ProjectileSystem::new();

    let rate = config.bullet.fire_rate as usize;
    let mut fired_on = Vec::new();
    for tick in 0..=rate * 2 {
        let before = system.bullets.len();
        system.handle_firing(&input, &p, &config);
        if system.bullets.len() > before {
            fired_on.push(tick);
        }
    }
    assert_eq!(fired_on, vec![0, rate, rate * 2]);
}

#[test]
fn no_fire_without_button() {
    let config = config();
    let p = player_at(512.0, 560.0);
    let input = FrameInput::new().with_pointer(Point::new(512.0, 100.0));
    let mut system = ProjectileSystem::new();
    system.handle_firing(&input, &p, &config);
    assert!(system.is_empty());
}

#[test]
fn bullet_damage_is_fixed_at_launch() {
    let config = config();
    let mut p = player_at(512.0, 560.0);
    let mut system = ProjectileSystem::new();
    assert!(system.spawn_bullet(&p, Point::new(512.0, 0.0), &config));
    p.upgrade_weapon();
    assert!(system.spawn_bullet(&p, Point::new(512.0, 0.0), &config));

    assert_eq!(system.bullets[0].damage, config.weapons.standard_damage);
    assert_eq!(system.bullets[1].damage, config.weapons.advanced_damage);
}

#[test]
fn clear_drops_everything() {
    let config = config();
    let p = player_at(512.0, 560.0);
    let mut system = ProjectileSystem::new();
    system.spawn_bullet(&p, Point::new(0.0, 0.0), &config);
    system.spawn_fireball(Point::new(0.0, 0.0), p.position, &config);
    assert!(!system.is_empty());
    system.clear();
    assert!(system.is_empty());
}
