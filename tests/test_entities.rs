use shadow_dungeon::entities::*;
use shadow_dungeon::geometry::*;

fn player() -> Player {
    Player::new(Point::new(100.0, 100.0), Extent::new(40.0, 40.0), 4.0, 100.0)
}

fn enemy_at_origin(kind: EnemyKind, profile: EnemyProfile) -> Enemy {
    Enemy::new(kind, Point::new(0.0, 0.0), Extent::new(40.0, 40.0), profile)
}

fn bullet_kin_profile(health: f64) -> EnemyProfile {
    EnemyProfile {
        health,
        attack: Attack::Shoots { period: 60 },
        movement: Movement::Stationary,
        reward: DeathReward::Coins(5),
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

#[test]
fn boxes_touching_on_an_edge_do_not_intersect() {
    let a = Bounds::centered(Point::new(10.0, 10.0), Extent::new(20.0, 20.0));
    let b = Bounds::centered(Point::new(30.0, 10.0), Extent::new(20.0, 20.0));
    assert!(!a.intersects(&b));
    assert!(!b.intersects(&a));

    let c = Bounds::centered(Point::new(29.0, 10.0), Extent::new(20.0, 20.0));
    assert!(a.intersects(&c));
    assert!(c.intersects(&a));
}

#[test]
fn bounds_are_centred_on_the_position() {
    let b = Bounds::centered(Point::new(100.0, 50.0), Extent::new(20.0, 10.0));
    assert_eq!(b, Bounds { left: 90.0, top: 45.0, right: 110.0, bottom: 55.0 });
}

#[test]
fn within_allows_coinciding_edges() {
    let window = Bounds::window(100.0, 100.0);
    assert!(Bounds::centered(Point::new(10.0, 10.0), Extent::new(20.0, 20.0)).is_within(&window));
    assert!(!Bounds::centered(Point::new(9.0, 10.0), Extent::new(20.0, 20.0)).is_within(&window));
}

#[test]
fn normalized_is_unit_length_or_none() {
    let v = Point::new(3.0, 4.0).normalized().unwrap();
    assert!((v.length() - 1.0).abs() < 1e-12);
    assert_eq!(v, Point::new(0.6, 0.8));
    assert!(Point::new(0.0, 0.0).normalized().is_none());
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn damage_floors_health_at_zero() {
    let mut p = player();
    assert!(!p.receive_damage(30.0));
    assert_eq!(p.health, 70.0);
    assert!(p.receive_damage(500.0));
    assert_eq!(p.health, 0.0);
    assert!(p.is_dead());
}

#[test]
fn spending_needs_enough_coins() {
    let mut p = player();
    p.earn_coins(15);
    assert!(!p.spend_coins(20));
    assert_eq!(p.coins, 15);
    assert!(p.spend_coins(15));
    assert_eq!(p.coins, 0);
}

#[test]
fn keys_are_consumed_one_at_a_time() {
    let mut p = player();
    assert!(!p.use_key());
    p.earn_key();
    assert!(p.use_key());
    assert_eq!(p.keys, 0);
    assert!(!p.use_key());
}

#[test]
fn weapon_upgrade_stops_at_elite() {
    let mut p = player();
    assert_eq!(p.weapon, WeaponTier::Standard);
    assert!(p.upgrade_weapon());
    assert!(p.upgrade_weapon());
    assert_eq!(p.weapon, WeaponTier::Elite);
    assert_eq!(p.weapon.level(), 2);

    assert!(!p.upgrade_weapon());
    assert_eq!(p.weapon, WeaponTier::Elite);
}

#[test]
fn character_is_chosen_once() {
    let mut p = player();
    assert!(!p.select_character(Character::Unset));
    assert!(p.select_character(Character::Robot));
    assert!(!p.select_character(Character::Marine));
    assert_eq!(p.character, Character::Robot);
}

#[test]
fn character_traits_table() {
    assert!(Character::Marine.traits().hazard_immune);
    assert!(!Character::Marine.traits().kill_bonus);
    assert!(Character::Robot.traits().kill_bonus);
    assert!(!Character::Robot.traits().hazard_immune);
    assert_eq!(
        Character::Unset.traits(),
        CharacterTraits { hazard_immune: false, kill_bonus: false }
    );
}

#[test]
fn player_clone_is_independent() {
    let original = player();
    let mut cloned = original.clone();
    cloned.earn_coins(10);
    cloned.move_to(Point::new(0.0, 0.0));
    assert_eq!(original.coins, 0);
    assert_eq!(original.position, Point::new(100.0, 100.0));
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[test]
fn enemy_death_is_permanent() {
    let mut e = enemy_at_origin(EnemyKind::BulletKin, bullet_kin_profile(30.0));
    assert!(!e.active);
    e.take_damage(10.0);
    assert!(!e.is_dead());
    e.take_damage(20.0);
    assert!(e.is_dead());

    e.health = 50.0;
    e.take_damage(1.0);
    assert!(e.is_dead());
}

#[test]
fn enemy_with_zero_health_starts_dead() {
    let e = enemy_at_origin(EnemyKind::BulletKin, bullet_kin_profile(0.0));
    assert!(e.is_dead());
}

#[test]
fn patrol_starts_on_first_waypoint() {
    let path = vec![Point::new(5.0, 5.0), Point::new(50.0, 5.0)];
    let e = enemy_at_origin(EnemyKind::KeyBulletKin, bullet_kin_profile(40.0)).with_path(path);
    assert_eq!(e.position, Point::new(5.0, 5.0));
    assert_eq!(e.path_index, 1);
}

// ── Doors, rooms & projectiles ────────────────────────────────────────────────

#[test]
fn door_state_helpers() {
    let mut door = Door::new(Point::new(0.0, 0.0), Extent::new(48.0, 32.0), RoomId::BattleA);
    assert_eq!(door.state, DoorState::Locked);
    assert!(!door.is_unlocked());

    door.arrive();
    assert_eq!(door.state, DoorState::JustEntered);
    assert!(door.is_unlocked());

    door.lock();
    door.unlock();
    assert_eq!(door.state, DoorState::Settled);
}

#[test]
fn room_ids_round_trip_through_names() {
    for id in RoomId::ALL {
        assert_eq!(id.name().parse::<RoomId>(), Ok(id));
        assert_eq!(RoomId::ALL[id.index()], id);
    }
    assert_eq!("A".parse::<RoomId>(), Ok(RoomId::BattleA));
    assert_eq!("C".parse::<RoomId>(), Err("C".to_string()));
}

#[test]
fn projectile_direction_is_unit_vector() {
    let p = Projectile::launch(
        ProjectileKind::Bullet,
        Point::new(10.0, 10.0),
        Point::new(10.0, -90.0),
        10.0,
        10.0,
        Extent::new(8.0, 8.0),
    )
    .unwrap();
    assert_eq!(p.direction, Point::new(0.0, -1.0));
    assert!(p.active);
}

#[test]
fn projectile_at_its_own_target_is_not_launched() {
    let at = Point::new(10.0, 10.0);
    let extent = Extent::new(16.0, 16.0);
    assert!(Projectile::launch(ProjectileKind::Fireball, at, at, 5.0, 10.0, extent).is_none());
}

#[test]
fn store_toggles() {
    let mut store = Store::new(Point::new(0.0, 0.0));
    assert!(!store.visible);
    store.toggle();
    assert!(store.visible);
    store.toggle();
    assert!(!store.visible);
}
